//! Campaign configuration consumed by the reach estimator.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CampaignPeriod, Device, Gender, Objective};

/// Youngest age that can be targeted.
pub const MIN_AGE: i32 = 13;

/// Oldest age that can be targeted.
pub const MAX_AGE: i32 = 99;

/// Budget, schedule and audience targeting for one promotion.
///
/// Targeting sets are ordered, so two configurations with the same
/// selections compare equal no matter what order they were picked in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignConfig {
    /// Total spend over the whole period, in currency units.
    pub budget: f64,
    /// Delivery dates.
    pub period: CampaignPeriod,
    /// Campaign objective.
    pub objective: Objective,
    /// Country codes to deliver in; empty means worldwide.
    #[serde(default)]
    pub countries: BTreeSet<String>,
    /// Interest categories.
    #[serde(default)]
    pub interests: BTreeSet<String>,
    /// Industries.
    #[serde(default)]
    pub industries: BTreeSet<String>,
    /// Device classes; empty means every device.
    #[serde(default)]
    pub devices: BTreeSet<Device>,
    /// Lower bound of the age range.
    pub age_from: i32,
    /// Upper bound of the age range.
    pub age_to: i32,
    /// Gender targeting.
    #[serde(default)]
    pub gender: Gender,
}

impl CampaignConfig {
    /// Creates an untargeted configuration: worldwide, ages 18 to 65, every
    /// device and gender.
    #[must_use]
    pub const fn new(budget: f64, period: CampaignPeriod, objective: Objective) -> Self {
        Self {
            budget,
            period,
            objective,
            countries: BTreeSet::new(),
            interests: BTreeSet::new(),
            industries: BTreeSet::new(),
            devices: BTreeSet::new(),
            age_from: 18,
            age_to: 65,
            gender: Gender::All,
        }
    }

    /// Sets the budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the objective.
    #[must_use]
    pub const fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the delivery dates.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = CampaignPeriod::unchecked(start, end);
        self
    }

    /// Replaces the targeted countries.
    #[must_use]
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the targeted interests.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the targeted industries.
    #[must_use]
    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the targeted devices.
    #[must_use]
    pub fn with_devices(mut self, devices: impl IntoIterator<Item = Device>) -> Self {
        self.devices = devices.into_iter().collect();
        self
    }

    /// Sets the age range.
    #[must_use]
    pub const fn with_ages(mut self, age_from: i32, age_to: i32) -> Self {
        self.age_from = age_from;
        self.age_to = age_to;
        self
    }

    /// Sets the gender targeting.
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Returns the delivery duration in days (at least one).
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        self.period.duration_days()
    }

    /// Returns the width of the targeted age range.
    ///
    /// Negative when the range is inverted. Computed in `i64`, so any pair of
    /// ages is representable.
    #[must_use]
    pub const fn age_span(&self) -> i64 {
        self.age_to as i64 - self.age_from as i64
    }

    /// Returns true if delivery is restricted to some, but not all, devices.
    #[must_use]
    pub fn devices_narrowed(&self) -> bool {
        !self.devices.is_empty() && self.devices.len() < Device::all().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> CampaignPeriod {
        CampaignPeriod::unchecked(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = CampaignConfig::new(50.0, period(), Objective::Awareness);
        assert!(config.countries.is_empty());
        assert_eq!(config.age_span(), 47);
        assert_eq!(config.duration_days(), 7);
        assert_eq!(config.gender, Gender::All);
        assert!(!config.devices_narrowed());
    }

    #[test]
    fn test_age_span_extremes() {
        let wide = CampaignConfig::new(50.0, period(), Objective::Awareness)
            .with_ages(i32::MIN, i32::MAX);
        assert_eq!(wide.age_span(), i64::from(u32::MAX));

        let inverted = wide.with_ages(i32::MAX, i32::MIN);
        assert_eq!(inverted.age_span(), -i64::from(u32::MAX));
    }

    #[test]
    fn test_selection_order_is_irrelevant() {
        let a = CampaignConfig::new(10.0, period(), Objective::Traffic).with_countries(["US", "CA"]);
        let b = CampaignConfig::new(10.0, period(), Objective::Traffic)
            .with_countries(["CA", "US", "CA"]);
        assert_eq!(a, b);
        assert_eq!(b.countries.len(), 2);
    }

    #[test]
    fn test_devices_narrowed() {
        let base = CampaignConfig::new(10.0, period(), Objective::Traffic);
        assert!(
            base.clone()
                .with_devices([Device::Mobile, Device::Tablet])
                .devices_narrowed()
        );
        assert!(
            !base
                .with_devices(Device::all().iter().copied())
                .devices_narrowed()
        );
    }

    #[test]
    fn test_json_shape() {
        let config = CampaignConfig::new(25.0, period(), Objective::Engagement)
            .with_devices([Device::Mobile])
            .with_ages(21, 35);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["ageFrom"], 21);
        assert_eq!(json["objective"], "engagement");
        assert_eq!(json["devices"][0], "mobile");
        assert_eq!(json["period"]["start"], "2024-01-01");

        let back: CampaignConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
