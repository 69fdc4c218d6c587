//! Calendar date source for release stamping

use chrono::NaiveDate;

/// Provides the current calendar date.
///
/// Release stamping goes through this seam so tests can pin the date.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// System clock, local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2100, 12, 3).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
