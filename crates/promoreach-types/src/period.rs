//! Campaign flight dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::PeriodError;

/// Date format accepted for campaign start and end dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The dates a campaign runs between.
///
/// A period is not required to be well ordered: estimates for drafts are
/// computed on every edit, so reversed or equal dates are representable and
/// simply count as a single day. Use [`CampaignPeriod::validate`] before
/// launching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignPeriod {
    /// First day of delivery.
    pub start: NaiveDate,
    /// Day delivery stops.
    pub end: NaiveDate,
}

impl CampaignPeriod {
    /// Creates a period, validating that `end` is strictly after `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        let period = Self::unchecked(start, end);
        period.validate()?;
        Ok(period)
    }

    /// Creates a period without checking the order of the dates.
    #[must_use]
    pub const fn unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a period of `days` days beginning on `start`.
    #[must_use]
    pub fn starting(start: NaiveDate, days: u32) -> Self {
        Self {
            start,
            end: start + chrono::TimeDelta::days(i64::from(days)),
        }
    }

    /// Checks that the end date is strictly after the start date.
    ///
    /// # Errors
    ///
    /// Returns an error if `end <= start`.
    pub fn validate(&self) -> Result<(), PeriodError> {
        if self.end <= self.start {
            return Err(PeriodError::EndNotAfterStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Returns the signed number of whole days from start to end.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }

    /// Returns the delivery duration in days, never less than one.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        u32::try_from(self.span_days().max(1)).unwrap_or(u32::MAX)
    }
}

impl std::fmt::Display for CampaignPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns the chrono parse error if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_new() {
        let period = CampaignPeriod::new(date(2024, 1, 1), date(2024, 1, 8)).unwrap();
        assert_eq!(period.duration_days(), 7);
    }

    #[test]
    fn test_period_rejects_equal_and_reversed() {
        assert!(CampaignPeriod::new(date(2024, 1, 1), date(2024, 1, 1)).is_err());
        assert!(matches!(
            CampaignPeriod::new(date(2024, 1, 8), date(2024, 1, 1)),
            Err(PeriodError::EndNotAfterStart { .. })
        ));
    }

    #[test]
    fn test_duration_floor() {
        let same = CampaignPeriod::unchecked(date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(same.duration_days(), 1);

        let reversed = CampaignPeriod::unchecked(date(2024, 3, 10), date(2024, 3, 1));
        assert_eq!(reversed.span_days(), -9);
        assert_eq!(reversed.duration_days(), 1);
    }

    #[test]
    fn test_starting() {
        let period = CampaignPeriod::starting(date(2024, 2, 25), 7);
        assert_eq!(period.end, date(2024, 3, 3));
        assert_eq!(period.duration_days(), 7);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2024-05-01 ").unwrap(), date(2024, 5, 1));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_display() {
        let period = CampaignPeriod::unchecked(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(period.to_string(), "2024-01-01 to 2024-01-31");
    }
}
