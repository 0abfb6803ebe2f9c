//! Read-only portfolio queries
//!
//! Views over the tenant mapping that never write back to the store:
//!
//! - [`status_of`]: outstanding balance of one tenant
//! - [`profile_of`]: display record of one tenant
//! - [`pending_report`]: tenants overdue in the current monthly cycle
//!
//! Each result implements `Display` with the text the CLI prints.

use crate::policy::{days_between, GracePolicy, MonthlyCycleGrace};
use crate::types::{LedgerError, TenantMap};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use tracing::debug;

/// Format used when showing dates to people, e.g. `Fri Mar 01 2024`
const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Rent status of a single tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentStatus {
    /// Nothing is owed
    NoRentDue,

    /// An outstanding balance exists
    Pending {
        rent_due: Decimal,
        /// Whole days since the rent start date (0 when none is set)
        days_since_last_rent: i64,
    },
}

impl fmt::Display for RentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentStatus::NoRentDue => write!(f, "No rent due."),
            RentStatus::Pending {
                rent_due,
                days_since_last_rent,
            } => write!(
                f,
                "Pending Rent: {} (Due for {} days)",
                rent_due.normalize(),
                days_since_last_rent
            ),
        }
    }
}

/// Display record of a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantProfile {
    pub name: String,
    pub phone: String,
    pub last_rent_date: Option<NaiveDate>,
    pub last_rent_increment_date: Option<NaiveDate>,
    pub rent_due: Decimal,
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

impl fmt::Display for TenantProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Phone: {}", self.phone)?;
        writeln!(f, "Last Rent Date: {}", display_date(self.last_rent_date))?;
        writeln!(
            f,
            "Last Rent Increment Date: {}",
            display_date(self.last_rent_increment_date)
        )?;
        write!(f, "Rent Due: {}", self.rent_due.normalize())
    }
}

/// One overdue tenant in the pending report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub name: String,
    pub last_rent_date: NaiveDate,
    pub overdue_days: i64,
}

/// Overdue tenants, most recent rent start first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingReport {
    pub entries: Vec<PendingEntry>,
}

impl PendingReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for PendingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No pending rent.");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "Tenant: {}, Overdue Days: {}",
                entry.name, entry.overdue_days
            )?;
        }
        Ok(())
    }
}

/// Rent status of `name` on `today`
///
/// # Errors
///
/// Returns [`LedgerError::TenantNotFound`] if no such tenant exists.
pub fn status_of(
    tenants: &TenantMap,
    name: &str,
    today: NaiveDate,
) -> Result<RentStatus, LedgerError> {
    let tenant = tenants
        .get(name)
        .ok_or_else(|| LedgerError::tenant_not_found(name))?;

    if tenant.rent_due().is_zero() {
        return Ok(RentStatus::NoRentDue);
    }

    let rent_start = tenant.last_rent_date.unwrap_or(today);
    Ok(RentStatus::Pending {
        rent_due: tenant.rent_due(),
        days_since_last_rent: days_between(rent_start, today),
    })
}

/// Display record of `name`
///
/// # Errors
///
/// Returns [`LedgerError::TenantNotFound`] if no such tenant exists.
pub fn profile_of(tenants: &TenantMap, name: &str) -> Result<TenantProfile, LedgerError> {
    let tenant = tenants
        .get(name)
        .ok_or_else(|| LedgerError::tenant_not_found(name))?;

    Ok(TenantProfile {
        name: name.to_string(),
        phone: tenant.phone.clone(),
        last_rent_date: tenant.last_rent_date,
        last_rent_increment_date: tenant.last_rent_increment_date,
        rent_due: tenant.rent_due(),
    })
}

/// Tenants overdue in the monthly cycle containing `today`
///
/// Only tenants with a rent start date are considered. Entries are ordered by
/// rent start date, most recent first, ties broken by name.
pub fn pending_report(
    tenants: &TenantMap,
    today: NaiveDate,
    policy: &MonthlyCycleGrace,
) -> PendingReport {
    let mut dated: Vec<(&String, NaiveDate)> = tenants
        .iter()
        .filter_map(|(name, tenant)| tenant.last_rent_date.map(|date| (name, date)))
        .collect();
    dated.sort_by(|(a_name, a_date), (b_name, b_date)| {
        b_date.cmp(a_date).then_with(|| a_name.cmp(b_name))
    });

    let entries = dated
        .into_iter()
        .filter_map(|(name, last_rent_date)| {
            let overdue_days = policy.overdue_days(last_rent_date, today);
            (overdue_days > 0).then(|| PendingEntry {
                name: name.clone(),
                last_rent_date,
                overdue_days,
            })
        })
        .collect::<Vec<_>>();
    debug!(
        policy = policy.name(),
        %today,
        overdue = entries.len(),
        "pending report built"
    );

    PendingReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DueMutation, Tenant};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn portfolio() -> TenantMap {
        let mut tenants = TenantMap::new();
        let mut alice = Tenant::new("555-0100", Some(day(2024, 5, 1)));
        assert!(alice
            .apply_due(DueMutation::Recompute(Decimal::from(500)))
            .is_some());
        tenants.insert("Alice".to_string(), alice);
        tenants.insert(
            "Bob".to_string(),
            Tenant::new("555-0101", Some(day(2024, 5, 20))),
        );
        tenants.insert(
            "Carol".to_string(),
            Tenant::new("555-0102", Some(day(2024, 5, 20))),
        );
        tenants.insert("Dave".to_string(), Tenant::new("555-0103", None));
        tenants.insert(
            "Erin".to_string(),
            Tenant::new("555-0104", Some(day(2024, 6, 18))),
        );
        tenants
    }

    #[test]
    fn test_status_pending() {
        let status = status_of(&portfolio(), "Alice", day(2024, 6, 5)).unwrap();
        assert_eq!(
            status,
            RentStatus::Pending {
                rent_due: Decimal::from(500),
                days_since_last_rent: 35,
            }
        );
        assert_eq!(status.to_string(), "Pending Rent: 500 (Due for 35 days)");
    }

    #[test]
    fn test_status_no_rent_due() {
        let status = status_of(&portfolio(), "Bob", day(2024, 6, 5)).unwrap();
        assert_eq!(status, RentStatus::NoRentDue);
        assert_eq!(status.to_string(), "No rent due.");
    }

    #[test]
    fn test_status_unknown_tenant() {
        let err = status_of(&portfolio(), "Zed", day(2024, 6, 5)).unwrap_err();
        assert_eq!(err, LedgerError::tenant_not_found("Zed"));
    }

    #[test]
    fn test_profile_rendering() {
        let profile = profile_of(&portfolio(), "Alice").unwrap();
        assert_eq!(
            profile.to_string(),
            "Name: Alice\nPhone: 555-0100\nLast Rent Date: Wed May 01 2024\n\
             Last Rent Increment Date: N/A\nRent Due: 500"
        );
    }

    #[test]
    fn test_profile_without_dates() {
        let profile = profile_of(&portfolio(), "Dave").unwrap();
        assert_eq!(profile.last_rent_date, None);
        assert!(profile.to_string().contains("Last Rent Date: N/A"));
    }

    #[test]
    fn test_profile_unknown_tenant() {
        assert!(matches!(
            profile_of(&portfolio(), "Zed"),
            Err(LedgerError::TenantNotFound { .. })
        ));
    }

    #[test]
    fn test_pending_report_order_and_filter() {
        // 2024-06-05: 6 grace days remain in the month
        let report = pending_report(&portfolio(), day(2024, 6, 5), &MonthlyCycleGrace::new(10));

        let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
        // Bob and Carol share a date and sort by name; Erin starts after
        // today and Dave has no date
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
        assert_eq!(report.entries[0].overdue_days, 16 - 6);
        assert_eq!(report.entries[2].overdue_days, 35 - 6);
        assert_eq!(
            report.to_string(),
            "Tenant: Bob, Overdue Days: 10\nTenant: Carol, Overdue Days: 10\n\
             Tenant: Alice, Overdue Days: 29"
        );
    }

    #[test]
    fn test_pending_report_empty() {
        let report = pending_report(&portfolio(), day(2024, 5, 1), &MonthlyCycleGrace::new(10));
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No pending rent.");
    }
}
