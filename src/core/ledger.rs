//! Rent ledger
//!
//! This module provides the [`RentLedger`] that owns a tenant store and
//! applies every ledger operation through it.
//!
//! The ledger enforces business rules such as:
//! - Inputs are validated before any state is touched
//! - Every successful mutation is saved immediately
//! - A failed save rolls the in-memory state back, so memory and storage agree
//! - Accrual overwrites the balance while payments and increments adjust it

use crate::core::accrual::AccrualCalculator;
use crate::core::portfolio::{self, PendingReport, RentStatus, TenantProfile};
use crate::core::traits::TenantStore;
use crate::io::{read_tenants_csv, write_tenants_csv, ImportSummary};
use crate::policy::MonthlyCycleGrace;
use crate::types::input::{parse_required_text, validate_amount};
use crate::types::{DueMutation, LedgerConfig, LedgerError, Payment, Tenant, TenantMap};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{Read, Write};
use tracing::{debug, info, warn};

/// Rent ledger over an injected tenant store
///
/// The store is the durable source of truth. The ledger keeps a copy of the
/// mapping in memory and writes the whole mapping back after each mutation.
pub struct RentLedger<S: TenantStore> {
    store: S,
    tenants: TenantMap,
    accrual: AccrualCalculator,
    pending_policy: MonthlyCycleGrace,
}

impl<S: TenantStore> RentLedger<S> {
    /// Open a ledger on `store`
    ///
    /// A corrupt persisted payload is logged and replaced by an empty
    /// mapping; it is overwritten by the next successful save.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the store cannot be read at all.
    pub fn open(store: S, config: LedgerConfig) -> Result<Self, LedgerError> {
        let tenants = match store.load() {
            Ok(tenants) => tenants,
            Err(LedgerError::Format { line, message }) => {
                warn!(?line, %message, "persisted tenants are corrupt, starting empty");
                TenantMap::new()
            }
            Err(e) => return Err(e),
        };
        info!(
            tenants = tenants.len(),
            grace_period_days = config.grace_period_days,
            daily_rate = %config.daily_rate,
            "ledger opened"
        );

        Ok(RentLedger {
            store,
            tenants,
            accrual: AccrualCalculator::from_config(&config),
            pending_policy: MonthlyCycleGrace::new(config.grace_period_days),
        })
    }

    /// Current tenant mapping
    pub fn tenants(&self) -> &TenantMap {
        &self.tenants
    }

    pub fn tenant(&self, name: &str) -> Option<&Tenant> {
        self.tenants.get(name)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a new tenant and accrue what they already owe
    ///
    /// Returns the tenant's balance after accrual.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if the name or phone is empty or a
    /// tenant with this name already exists.
    pub fn add_tenant(
        &mut self,
        name: &str,
        phone: &str,
        last_rent_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let name = parse_required_text("name", name)?;
        let phone = parse_required_text("phone", phone)?;
        if self.tenants.contains_key(&name) {
            return Err(LedgerError::validation(
                "name",
                format!("tenant '{}' already exists", name),
            ));
        }

        let mut tenant = Tenant::new(phone, last_rent_date);
        let due = self.accrual.recompute(&name, &mut tenant, today)?;
        self.commit(&name, tenant)?;

        info!(name = %name, rent_due = %due, "tenant added");
        Ok(due)
    }

    /// Record a payment and reduce the balance, never below zero
    ///
    /// Overpayment is absorbed; no credit is kept. Returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] if `amount` is negative
    /// - [`LedgerError::TenantNotFound`] if the tenant does not exist
    pub fn record_payment(
        &mut self,
        name: &str,
        amount: Decimal,
        date_paid: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let amount = validate_amount("amount", amount)?;

        let due = self.update(name, "payment", |tenant| {
            tenant.push_payment(Payment { amount, date_paid });
            tenant.apply_due(DueMutation::Adjust(-amount))
        })?;

        info!(name, amount = %amount, %date_paid, rent_due = %due, "payment recorded");
        Ok(due)
    }

    /// Add `amount` to the balance and stamp the increment date
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] if `amount` is negative
    /// - [`LedgerError::TenantNotFound`] if the tenant does not exist
    /// - [`LedgerError::ArithmeticOverflow`] if the balance would overflow
    pub fn increment_rent(
        &mut self,
        name: &str,
        amount: Decimal,
        now: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let amount = validate_amount("amount", amount)?;

        let due = self.update(name, "increment", |tenant| {
            tenant.last_rent_increment_date = Some(now);
            tenant.apply_due(DueMutation::Adjust(amount))
        })?;

        info!(name, amount = %amount, rent_due = %due, "rent incremented");
        Ok(due)
    }

    /// Move the rent start date and re-accrue from it
    ///
    /// The accrued amount replaces the balance, discarding earlier payments
    /// and increments. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TenantNotFound`] if the tenant does not exist.
    pub fn update_rent_start_date(
        &mut self,
        name: &str,
        new_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let accrual = self.accrual.clone();
        let due = self.update(name, "rent date update", |tenant| {
            tenant.last_rent_date = Some(new_date);
            accrual.recompute(name, tenant, today).ok()
        })?;

        info!(name, %new_date, rent_due = %due, "rent start date updated");
        Ok(due)
    }

    /// Rent status of one tenant
    pub fn status_of(&self, name: &str, today: NaiveDate) -> Result<RentStatus, LedgerError> {
        portfolio::status_of(&self.tenants, name, today)
    }

    /// Display record of one tenant
    pub fn profile_of(&self, name: &str) -> Result<TenantProfile, LedgerError> {
        portfolio::profile_of(&self.tenants, name)
    }

    /// Tenants overdue in the current monthly cycle
    pub fn pending_report(&self, today: NaiveDate) -> PendingReport {
        portfolio::pending_report(&self.tenants, today, &self.pending_policy)
    }

    /// Write every tenant in interchange format
    pub fn export_csv(&self, output: &mut dyn Write) -> Result<(), LedgerError> {
        write_tenants_csv(&self.tenants, output)?;
        debug!(tenants = self.tenants.len(), "tenants exported");
        Ok(())
    }

    /// Replace every tenant with the contents of an interchange source
    ///
    /// This is not a merge: tenants absent from the source are gone
    /// afterwards. Malformed rows are skipped and counted.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the source or the store fails; the
    /// ledger is unchanged in that case.
    pub fn import_csv<R: Read>(&mut self, source: R) -> Result<ImportSummary, LedgerError> {
        let (imported, summary) = read_tenants_csv(source)?;
        self.store.save(&imported)?;
        self.tenants = imported;

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            tenants = self.tenants.len(),
            "tenants imported"
        );
        Ok(summary)
    }

    /// Apply `mutate` to a copy of the tenant and commit the copy
    ///
    /// `mutate` returns the new balance, or `None` if balance arithmetic
    /// overflowed.
    fn update<F>(&mut self, name: &str, operation: &str, mutate: F) -> Result<Decimal, LedgerError>
    where
        F: FnOnce(&mut Tenant) -> Option<Decimal>,
    {
        let mut tenant = self
            .tenants
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::tenant_not_found(name))?;

        let due = mutate(&mut tenant)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, name))?;
        self.commit(name, tenant)?;
        Ok(due)
    }

    /// Store `tenant` under `name` and persist, rolling back on failure
    fn commit(&mut self, name: &str, tenant: Tenant) -> Result<(), LedgerError> {
        let previous = self.tenants.insert(name.to_string(), tenant);

        if let Err(e) = self.store.save(&self.tenants) {
            match previous {
                Some(previous) => self.tenants.insert(name.to_string(), previous),
                None => self.tenants.remove(name),
            };
            return Err(e);
        }
        Ok(())
    }
}
