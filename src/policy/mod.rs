//! Grace-period policies
//!
//! The ledger answers two different questions with two different grace rules:
//!
//! - "how much does this tenant owe?" uses [`LifetimeGrace`]: a fixed grace
//!   window counted from the tenant's rent start date.
//! - "who is overdue this month?" uses [`MonthlyCycleGrace`]: the grace window
//!   shrinks as the current calendar month progresses.
//!
//! Both sit behind the [`GracePolicy`] trait so callers name the rule they
//! apply instead of sharing one formula.

use chrono::NaiveDate;

pub mod lifetime;
pub mod monthly;

pub use lifetime::LifetimeGrace;
pub use monthly::MonthlyCycleGrace;

/// Whole calendar days from `start` to `today`
///
/// Negative when `start` lies in the future.
pub fn days_between(start: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(start).num_days()
}

/// Grace-period rule turning elapsed days into overdue days
pub trait GracePolicy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Overdue days for a rent period starting at `rent_start`, seen on `today`
    ///
    /// Implementations may return zero or negative values to mean "not
    /// overdue"; callers decide whether to clamp or filter.
    fn overdue_days(&self, rent_start: NaiveDate, today: NaiveDate) -> i64;
}
