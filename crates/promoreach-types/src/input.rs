//! Form-shaped campaign input and its sanitization.
//!
//! Everything a user types arrives as text. [`RawCampaignInput::sanitize`]
//! is the single place that coerces it into a [`CampaignConfig`] the
//! estimator can take as-is: numbers that don't parse become zero, ages are
//! clamped into the targetable range, and duplicates collapse.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::{MAX_AGE, MIN_AGE};
use crate::period::parse_date;
use crate::{CampaignConfig, CampaignPeriod, Device, Gender, InputError, Objective};

/// Unvalidated campaign form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCampaignInput {
    /// Budget as typed.
    pub budget: String,
    /// Start date (`YYYY-MM-DD`).
    pub start_date: String,
    /// End date (`YYYY-MM-DD`).
    pub end_date: String,
    /// Objective name.
    pub objective: String,
    /// Selected country codes.
    pub countries: Vec<String>,
    /// Selected interests.
    pub interests: Vec<String>,
    /// Selected industries.
    pub industries: Vec<String>,
    /// Selected device names.
    pub devices: Vec<String>,
    /// Lower age bound as typed.
    pub age_from: String,
    /// Upper age bound as typed.
    pub age_to: String,
    /// Gender option.
    pub gender: String,
}

impl RawCampaignInput {
    /// Coerces the raw values into a [`CampaignConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error for unparseable dates and unknown device or gender
    /// names. Numeric fields never fail; they fall back to zero.
    pub fn sanitize(&self) -> Result<CampaignConfig, InputError> {
        let start = parse_date(&self.start_date).map_err(|_| InputError::InvalidDate {
            field: "start",
            value: self.start_date.clone(),
        })?;
        let end = parse_date(&self.end_date).map_err(|_| InputError::InvalidDate {
            field: "end",
            value: self.end_date.clone(),
        })?;

        let devices = self
            .devices
            .iter()
            .filter(|d| !d.trim().is_empty())
            .map(|d| d.parse::<Device>())
            .collect::<Result<BTreeSet<_>, _>>()?;

        let (age_from, age_to) = clamp_ages(parse_age(&self.age_from), parse_age(&self.age_to));

        Ok(CampaignConfig {
            budget: parse_amount(&self.budget),
            period: CampaignPeriod::unchecked(start, end),
            objective: Objective::parse_lenient(&self.objective),
            countries: clean_set(&self.countries),
            interests: clean_set(&self.interests),
            industries: clean_set(&self.industries),
            devices,
            age_from,
            age_to,
            gender: self.gender.parse()?,
        })
    }
}

/// Parses a currency amount, returning zero for anything that is not a
/// finite, non-negative number.
#[must_use]
pub fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .map_or(0.0, sanitize_amount)
}

/// Maps non-finite and negative amounts to zero.
#[must_use]
pub const fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parses an age, returning zero when the value isn't an integer.
fn parse_age(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

/// Clamps both bounds into the targetable range and keeps them ordered.
#[must_use]
pub fn clamp_ages(age_from: i32, age_to: i32) -> (i32, i32) {
    let from = age_from.clamp(MIN_AGE, MAX_AGE);
    let to = age_to.clamp(MIN_AGE, MAX_AGE).max(from);
    (from, to)
}

fn clean_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
