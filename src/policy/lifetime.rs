//! Lifetime grace policy used for accrual

use super::{days_between, GracePolicy};
use chrono::NaiveDate;

/// Fixed grace window counted from the rent start date
///
/// `overdue = max(0, days_since_start - grace_period_days)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimeGrace {
    pub grace_period_days: u32,
}

impl LifetimeGrace {
    pub fn new(grace_period_days: u32) -> Self {
        LifetimeGrace { grace_period_days }
    }
}

impl GracePolicy for LifetimeGrace {
    fn name(&self) -> &'static str {
        "lifetime"
    }

    fn overdue_days(&self, rent_start: NaiveDate, today: NaiveDate) -> i64 {
        let elapsed = days_between(rent_start, today);
        (elapsed - i64::from(self.grace_period_days)).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::same_day(day(2024, 3, 1), 0)]
    #[case::inside_grace(day(2024, 3, 8), 0)]
    #[case::grace_boundary(day(2024, 3, 11), 0)]
    #[case::first_overdue_day(day(2024, 3, 12), 1)]
    #[case::fifteen_days(day(2024, 3, 16), 5)]
    #[case::across_month(day(2024, 4, 10), 30)]
    #[case::start_in_future(day(2024, 2, 1), 0)]
    fn test_overdue_days(#[case] today: NaiveDate, #[case] expected: i64) {
        let policy = LifetimeGrace::new(10);
        assert_eq!(policy.overdue_days(day(2024, 3, 1), today), expected);
    }

    #[test]
    fn test_zero_grace_counts_every_day() {
        let policy = LifetimeGrace::new(0);
        assert_eq!(policy.overdue_days(day(2024, 3, 1), day(2024, 3, 4)), 3);
    }
}
