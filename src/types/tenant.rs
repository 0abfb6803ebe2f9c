//! Tenant-related types for the Rent Ledger
//!
//! This module defines the tenant record, its payment history, and the two
//! kinds of balance mutation the ledger is allowed to perform.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tenant identifier
///
/// The mapping key doubles as the tenant's identity and never changes after
/// creation.
pub type TenantName = String;

/// Full tenant mapping, iterated in name order
pub type TenantMap = BTreeMap<TenantName, Tenant>;

/// A single recorded rent payment
///
/// Payments are immutable once recorded; there is no edit or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Amount paid
    pub amount: Decimal,

    /// Calendar day the payment was made
    pub date_paid: NaiveDate,
}

/// How a balance mutation treats the existing `rent_due`
///
/// Accrual overwrites the balance outright, while payments and increments
/// shift it. Call sites pick one explicitly so the overwrite semantics of
/// accrual can never be mistaken for an additive change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueMutation {
    /// Replace the balance with a freshly derived value
    Recompute(Decimal),

    /// Add a signed delta to the balance
    Adjust(Decimal),
}

/// Tenant record
///
/// The name is not stored here: it is the key of the [`TenantMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Contact phone number, free text
    pub phone: String,

    /// Start of the current rent period, if ever set
    pub last_rent_date: Option<NaiveDate>,

    /// Outstanding balance
    ///
    /// Private so that every change goes through [`Tenant::apply_due`], which
    /// keeps it non-negative.
    #[serde(deserialize_with = "deserialize_non_negative")]
    rent_due: Decimal,

    /// Day of the most recent manual rent increase
    pub last_rent_increment_date: Option<NaiveDate>,

    /// Payment history in the order payments were recorded
    #[serde(default)]
    payments: Vec<Payment>,
}

impl Tenant {
    /// Create a new tenant with nothing owed and no payment history
    pub fn new(phone: impl Into<String>, last_rent_date: Option<NaiveDate>) -> Self {
        Tenant {
            phone: phone.into(),
            last_rent_date,
            rent_due: Decimal::ZERO,
            last_rent_increment_date: None,
            payments: Vec::new(),
        }
    }

    /// Rebuild a tenant from stored or imported fields
    ///
    /// A negative `rent_due` is clamped to zero.
    pub fn from_parts(
        phone: impl Into<String>,
        last_rent_date: Option<NaiveDate>,
        rent_due: Decimal,
        last_rent_increment_date: Option<NaiveDate>,
        payments: Vec<Payment>,
    ) -> Self {
        Tenant {
            phone: phone.into(),
            last_rent_date,
            rent_due: rent_due.max(Decimal::ZERO),
            last_rent_increment_date,
            payments,
        }
    }

    /// Current outstanding balance (never negative)
    pub fn rent_due(&self) -> Decimal {
        self.rent_due
    }

    /// Recorded payments, oldest first
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Apply a balance mutation and clamp the result at zero
    ///
    /// Returns `None` if an adjustment would overflow, leaving the balance
    /// untouched.
    #[must_use = "an overflowing adjustment leaves the balance unchanged"]
    pub fn apply_due(&mut self, mutation: DueMutation) -> Option<Decimal> {
        let next = match mutation {
            DueMutation::Recompute(value) => value,
            DueMutation::Adjust(delta) => self.rent_due.checked_add(delta)?,
        };
        self.rent_due = next.max(Decimal::ZERO);
        Some(self.rent_due)
    }

    /// Append a payment to the history
    pub fn push_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }
}

fn deserialize_non_negative<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer).map(|due| due.max(Decimal::ZERO))
}
