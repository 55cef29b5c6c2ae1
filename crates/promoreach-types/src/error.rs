//! Error types for promoreach.

use chrono::NaiveDate;
use thiserror::Error;

/// Error for campaign periods that cannot be launched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// End date is not after the start date.
    #[error("Invalid campaign period: end date {end} must be after start date {start}")]
    EndNotAfterStart {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

/// Errors raised while sanitizing raw campaign input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A date field is not in `YYYY-MM-DD` form.
    #[error("Invalid {field} date: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Which field was rejected ("start" or "end").
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Unknown device name.
    #[error("Unknown device: {0:?}. Valid options: desktop, mobile, tablet")]
    UnknownDevice(String),

    /// Unknown gender option.
    #[error("Unknown gender: {0:?}. Valid options: all, male, female")]
    UnknownGender(String),
}
