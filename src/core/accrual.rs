//! Rent accrual
//!
//! Derives how much a tenant owes purely from elapsed time and the policy
//! constants. The derived amount replaces the balance outright: anything a
//! tenant paid or was manually charged before the recompute is forgotten.
//! Call sites therefore wrap the result in [`DueMutation::Recompute`].

use crate::policy::{GracePolicy, LifetimeGrace};
use crate::types::{DueMutation, LedgerConfig, LedgerError, Tenant};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// Accrual calculator
///
/// `rent_due = overdue_days * daily_rate`, with overdue days taken from the
/// [`LifetimeGrace`] policy. A tenant without a rent start date is treated as
/// starting today, so nothing is owed.
#[derive(Debug, Clone, PartialEq)]
pub struct AccrualCalculator {
    policy: LifetimeGrace,
    daily_rate: Decimal,
}

impl AccrualCalculator {
    pub fn new(grace_period_days: u32, daily_rate: Decimal) -> Self {
        AccrualCalculator {
            policy: LifetimeGrace::new(grace_period_days),
            daily_rate,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.grace_period_days, config.daily_rate)
    }

    /// Compute the amount owed by `tenant` on `today`
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the product does not fit
    /// in a decimal.
    pub fn compute_due(
        &self,
        name: &str,
        tenant: &Tenant,
        today: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let rent_start = tenant.last_rent_date.unwrap_or(today);
        let overdue_days = self.policy.overdue_days(rent_start, today);
        debug!(
            policy = self.policy.name(),
            name,
            %rent_start,
            overdue_days,
            "accrual computed"
        );

        Decimal::from(overdue_days)
            .checked_mul(self.daily_rate)
            .ok_or_else(|| LedgerError::arithmetic_overflow("accrual", name))
    }

    /// Overwrite the tenant's balance with the accrued amount
    pub fn recompute(
        &self,
        name: &str,
        tenant: &mut Tenant,
        today: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let due = self.compute_due(name, tenant, today)?;
        tenant
            .apply_due(DueMutation::Recompute(due))
            .ok_or_else(|| LedgerError::arithmetic_overflow("accrual", name))
    }
}

impl Default for AccrualCalculator {
    fn default() -> Self {
        Self::from_config(&LedgerConfig::default())
    }
}
