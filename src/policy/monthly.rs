//! Monthly-cycle grace policy used by the pending report

use super::{days_between, GracePolicy};
use chrono::{Datelike, NaiveDate};

/// Grace window that shrinks as the current month progresses
///
/// On the first of the month the full `grace_period_days` applies; each
/// later day of the month removes one day of grace, down to zero:
///
/// `overdue = days_since_start - max(0, grace_period_days - (today.day - 1))`
///
/// The result is not clamped; the pending report keeps only positive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCycleGrace {
    pub grace_period_days: u32,
}

impl MonthlyCycleGrace {
    pub fn new(grace_period_days: u32) -> Self {
        MonthlyCycleGrace { grace_period_days }
    }

    /// Grace days still left in the month containing `today`
    pub fn remaining_grace(&self, today: NaiveDate) -> i64 {
        let days_into_month = i64::from(today.day()) - 1;
        (i64::from(self.grace_period_days) - days_into_month).max(0)
    }
}

impl GracePolicy for MonthlyCycleGrace {
    fn name(&self) -> &'static str {
        "monthly-cycle"
    }

    fn overdue_days(&self, rent_start: NaiveDate, today: NaiveDate) -> i64 {
        days_between(rent_start, today) - self.remaining_grace(today)
    }
}
