//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveDate};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current calendar date in local time
    fn today(&self) -> NaiveDate;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed clock implementation for testing (returns a fixed date)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_date: NaiveDate,
}

impl FixedClock {
    /// Create a new fixed clock with the given date
    pub fn new(fixed_date: NaiveDate) -> Self {
        Self { fixed_date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.fixed_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_plausible_date() {
        // テスト項目: SystemClock が妥当な範囲の日付を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let today = clock.today();

        // then (期待する結果):
        assert!(today > NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_fixed_clock_returns_fixed_date() {
        // テスト項目: FixedClock が固定された日付を返す
        // given (前提条件):
        let fixed_date = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let clock = FixedClock::new(fixed_date);

        // when (操作):
        let today = clock.today();

        // then (期待する結果):
        assert_eq!(today, fixed_date);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_date() {
        // テスト項目: FixedClock が複数回呼び出しても同じ日付を返す
        // given (前提条件):
        let fixed_date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let clock = FixedClock::new(fixed_date);

        // when (操作):
        let first = clock.today();
        let second = clock.today();

        // then (期待する結果):
        assert_eq!(first, fixed_date);
        assert_eq!(second, fixed_date);
    }
}
