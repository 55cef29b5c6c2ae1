//! Reach and cost estimation logic.

use std::sync::OnceLock;

use promoreach_types::{CampaignConfig, sanitize_amount};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::EstimateModel;

/// Static estimator instance.
static ESTIMATOR: OnceLock<ReachEstimator> = OnceLock::new();

/// A cost quoted to two decimal places, stored as hundredths.
///
/// Serialized as a string such as `"0.95"`, which is the shape the campaign
/// payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UnitCost {
    hundredths: u64,
}

impl UnitCost {
    /// A zero cost.
    pub const ZERO: Self = Self { hundredths: 0 };

    /// Rounds a raw amount to two decimal places.
    ///
    /// Rounding works on the exact value of `amount`, so it always agrees
    /// with `format!("{amount:.2}")`. Non-finite and negative amounts become
    /// zero; amounts too large to count in hundredths saturate.
    #[must_use]
    pub fn from_amount(amount: f64) -> Self {
        let amount = sanitize_amount(amount);
        format!("{amount:.2}").parse().unwrap_or(Self {
            hundredths: u64::MAX,
        })
    }

    /// Creates a cost from a count of hundredths.
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    /// Returns the cost in hundredths of a currency unit.
    #[must_use]
    pub const fn hundredths(&self) -> u64 {
        self.hundredths
    }
}

impl std::fmt::Display for UnitCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl std::str::FromStr for UnitCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() || frac.len() > 2 {
            return Err(format!("invalid cost: {s:?}"));
        }
        let whole: u64 = whole.parse().map_err(|_| format!("invalid cost: {s:?}"))?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| format!("invalid cost: {s:?}"))? * 10,
            _ => frac.parse().map_err(|_| format!("invalid cost: {s:?}"))?,
        };
        Ok(Self {
            hundredths: whole.saturating_mul(100).saturating_add(frac),
        })
    }
}

impl Serialize for UnitCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UnitCost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Estimated delivery and cost for one campaign configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachEstimate {
    /// Total impressions over the whole period.
    pub impressions: u64,
    /// Impressions per day.
    pub impressions_per_day: u64,
    /// Expected clicks.
    pub clicks: u64,
    /// Cost per thousand impressions.
    pub cpm: UnitCost,
    /// Cost per click.
    pub cpc: UnitCost,
    /// Cumulative audience multiplier.
    pub targeting_score: f64,
}

impl ReachEstimate {
    /// Creates an empty estimate (nothing delivered, nothing spent).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            impressions: 0,
            impressions_per_day: 0,
            clicks: 0,
            cpm: UnitCost::ZERO,
            cpc: UnitCost::ZERO,
            targeting_score: 1.0,
        }
    }
}

/// The individual audience factors behind a targeting score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudienceBreakdown {
    /// Country breadth factor.
    pub countries: f64,
    /// Interest breadth factor.
    pub interests: f64,
    /// Age range factor.
    pub age: f64,
    /// Gender factor.
    pub gender: f64,
    /// Device factor.
    pub devices: f64,
    /// Industry factor.
    pub industries: f64,
}

impl AudienceBreakdown {
    /// Returns the product of all factors, multiplied in a fixed order.
    #[must_use]
    pub fn score(&self) -> f64 {
        let mut score = 1.0;
        for factor in self.factors() {
            score *= factor.1;
        }
        score
    }

    /// Returns each factor with its label, in application order.
    #[must_use]
    pub const fn factors(&self) -> [(&'static str, f64); 6] {
        [
            ("countries", self.countries),
            ("interests", self.interests),
            ("age", self.age),
            ("gender", self.gender),
            ("devices", self.devices),
            ("industries", self.industries),
        ]
    }
}

/// Reach and cost estimator.
///
/// Estimation is pure: the same configuration always yields the same
/// estimate, and nothing is cached or logged above trace level.
#[derive(Debug, Clone, Default)]
pub struct ReachEstimator {
    model: EstimateModel,
}

impl ReachEstimator {
    /// Creates an estimator for the given model.
    ///
    /// The model is used as-is; call [`EstimateModel::validate`] first when
    /// it comes from user input.
    #[must_use]
    pub const fn new(model: EstimateModel) -> Self {
        Self { model }
    }

    /// Returns the global estimator instance with the default model.
    #[must_use]
    pub fn global() -> &'static Self {
        ESTIMATOR.get_or_init(|| Self::new(EstimateModel::DEFAULT))
    }

    /// Returns the model in use.
    #[must_use]
    pub const fn model(&self) -> &EstimateModel {
        &self.model
    }

    /// Returns the audience factors for a configuration.
    #[must_use]
    pub fn breakdown(&self, config: &CampaignConfig) -> AudienceBreakdown {
        let model = &self.model;

        let countries = match config.countries.len() {
            0 => model.countries.global,
            n if n <= model.countries.focused_max => model.countries.focused,
            _ => model.countries.broad,
        };

        let interests = match config.interests.len() {
            0 => 1.0,
            n if n > model.interests.many_above => model.interests.many,
            _ => model.interests.some,
        };

        let span = config.age_span();
        let age = if span < i64::from(model.age.narrow_below) {
            model.age.narrow
        } else if span < i64::from(model.age.moderate_below) {
            model.age.moderate
        } else {
            1.0
        };

        let gender = if config.gender.is_targeted() {
            model.gender_targeted
        } else {
            1.0
        };

        let devices = if config.devices_narrowed() {
            model.devices_narrowed
        } else {
            1.0
        };

        let industries = if config.industries.is_empty() {
            1.0
        } else {
            model.industries_targeted
        };

        AudienceBreakdown {
            countries,
            interests,
            age,
            gender,
            devices,
            industries,
        }
    }

    /// Estimates reach and cost for a configuration.
    ///
    /// Never fails: a non-finite or negative budget counts as zero, the
    /// duration is at least one day, and every division is guarded.
    #[must_use]
    pub fn estimate(&self, config: &CampaignConfig) -> ReachEstimate {
        let budget = sanitize_amount(config.budget);
        let duration = f64::from(config.duration_days());

        let base_impressions = budget * self.model.impressions_per_unit_per_day * duration;
        let targeting_score = self.breakdown(config).score();
        let ctr = self.model.ctr.for_objective(config.objective);

        let impressions = round_count(base_impressions * targeting_score);
        let impressions_per_day = round_count(impressions as f64 / duration);
        let clicks = round_count(impressions as f64 * ctr);

        let cpm = if impressions > 0 {
            UnitCost::from_amount(budget / impressions as f64 * 1000.0)
        } else {
            UnitCost::ZERO
        };
        let cpc = if clicks > 0 {
            UnitCost::from_amount(budget / clicks as f64)
        } else {
            UnitCost::ZERO
        };

        tracing::trace!(
            budget,
            duration,
            targeting_score,
            impressions,
            clicks,
            "estimated campaign reach"
        );

        ReachEstimate {
            impressions,
            impressions_per_day,
            clicks,
            cpm,
            cpc,
            targeting_score: if targeting_score.is_finite() {
                targeting_score
            } else {
                0.0
            },
        }
    }

    /// Formats an estimate as a human-readable summary.
    #[must_use]
    pub fn format_estimate(estimate: &ReachEstimate) -> String {
        format!(
            "Impressions: ~{} ({}/day)\n\
             Clicks: ~{}\n\
             CPM: ${}  CPC: ${}\n\
             Targeting score: {:.3}",
            Self::format_count(estimate.impressions),
            Self::format_count(estimate.impressions_per_day),
            Self::format_count(estimate.clicks),
            estimate.cpm,
            estimate.cpc,
            estimate.targeting_score,
        )
    }

    /// Formats a count in human-readable form (e.g., "52.50K", "1.20M").
    #[must_use]
    pub fn format_count(count: u64) -> String {
        if count >= 1_000_000_000 {
            format!("{:.2}B", count as f64 / 1_000_000_000.0)
        } else if count >= 1_000_000 {
            format!("{:.2}M", count as f64 / 1_000_000.0)
        } else if count >= 1_000 {
            format!("{:.2}K", count as f64 / 1_000.0)
        } else {
            format!("{count}")
        }
    }

    /// Formats a currency amount with two decimals (e.g., "$50.00").
    #[must_use]
    pub fn format_currency(amount: f64) -> String {
        format!("${}", UnitCost::from_amount(amount))
    }
}

/// Rounds a non-negative quantity to a whole count. NaN and negative values
/// become zero; values past `u64::MAX`, infinity included, saturate.
fn round_count(value: f64) -> u64 {
    if value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use promoreach_types::{CampaignPeriod, Device, Gender, Objective};

    fn week() -> CampaignPeriod {
        CampaignPeriod::unchecked(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        )
    }

    fn base_config(budget: f64) -> CampaignConfig {
        CampaignConfig::new(budget, week(), Objective::Awareness).with_ages(18, 65)
    }

    #[test]
    fn test_global_awareness_example() {
        let estimate = ReachEstimator::default().estimate(&base_config(50.0));

        assert_eq!(estimate.impressions, 52_500);
        assert_eq!(estimate.impressions_per_day, 7_500);
        assert_eq!(estimate.clicks, 1_050);
        assert_eq!(estimate.cpm.to_string(), "0.95");
        assert_eq!(estimate.cpc.to_string(), "0.05");
        assert_relative_eq!(estimate.targeting_score, 1.5);
    }

    #[test]
    fn test_two_countries_example() {
        let estimator = ReachEstimator::default();
        let global = estimator.estimate(&base_config(50.0));
        let focused = estimator.estimate(&base_config(50.0).with_countries(["US", "CA"]));

        assert_eq!(focused.impressions, 28_000);
        assert_relative_eq!(focused.targeting_score, 0.8);
        assert!(global.impressions > focused.impressions);
    }

    #[test]
    fn test_zero_budget() {
        let estimator = ReachEstimator::default();
        for objective in Objective::all() {
            let config = base_config(0.0)
                .with_objective(*objective)
                .with_countries(["US"]);
            let estimate = estimator.estimate(&config);
            assert_eq!(estimate.impressions, 0);
            assert_eq!(estimate.impressions_per_day, 0);
            assert_eq!(estimate.clicks, 0);
            assert_eq!(estimate.cpm.to_string(), "0.00");
            assert_eq!(estimate.cpc.to_string(), "0.00");
        }
    }

    #[test]
    fn test_non_finite_budget_is_zero() {
        let estimator = ReachEstimator::default();
        for budget in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -10.0] {
            let estimate = estimator.estimate(&base_config(budget));
            assert_eq!(estimate.impressions, 0);
            assert_eq!(estimate.cpm, UnitCost::ZERO);
            assert_eq!(estimate.cpc, UnitCost::ZERO);
        }
    }

    #[test]
    fn test_duration_floor() {
        let estimator = ReachEstimator::default();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let one_day = CampaignPeriod::unchecked(day, day + chrono::TimeDelta::days(1));

        let same_day = base_config(10.0).with_dates(day, day);
        let reversed = base_config(10.0).with_dates(day, day - chrono::TimeDelta::days(5));
        let mut single = base_config(10.0);
        single.period = one_day;

        let expected = estimator.estimate(&single);
        assert_eq!(estimator.estimate(&same_day), expected);
        assert_eq!(estimator.estimate(&reversed), expected);
        assert_eq!(expected.impressions, 1_500);
        assert_eq!(expected.impressions_per_day, 1_500);
    }

    #[test]
    fn test_determinism() {
        let estimator = ReachEstimator::default();
        let config = base_config(123.45)
            .with_countries(["DE", "FR", "NL"])
            .with_interests(["ai", "robotics"])
            .with_industries(["software"])
            .with_devices([Device::Mobile])
            .with_ages(25, 40)
            .with_gender(Gender::Female)
            .with_objective(Objective::Engagement);

        let a = estimator.estimate(&config);
        let b = estimator.estimate(&config);
        assert_eq!(a, b);
        assert_eq!(a.targeting_score.to_bits(), b.targeting_score.to_bits());
    }

    #[test]
    fn test_monotonic_in_budget() {
        let estimator = ReachEstimator::default();
        let template = base_config(0.0)
            .with_interests(["ai"])
            .with_objective(Objective::Traffic);

        let mut previous = ReachEstimate::empty();
        for step in 0..200 {
            let budget = f64::from(step) * 7.5;
            let estimate = estimator.estimate(&template.clone().with_budget(budget));
            assert!(estimate.impressions >= previous.impressions);
            assert!(estimate.clicks >= previous.clicks);
            previous = estimate;
        }
    }

    #[test]
    fn test_huge_budgets_saturate() {
        let estimator = ReachEstimator::default();
        let large = estimator.estimate(&base_config(1e300));
        let larger = estimator.estimate(&base_config(1e306));

        assert_eq!(large.impressions, u64::MAX);
        assert_eq!(larger.impressions, u64::MAX);
        assert!(larger.impressions >= large.impressions);
        assert!(larger.clicks >= large.clicks);
        assert!(larger.impressions_per_day >= large.impressions_per_day);
        assert!(larger.cpm >= large.cpm);
    }

    #[test]
    fn test_extreme_age_range() {
        let config = base_config(50.0).with_ages(i32::MIN, i32::MAX);
        let breakdown = ReachEstimator::default().breakdown(&config);
        assert_relative_eq!(breakdown.age, 1.0);

        let inverted = base_config(50.0).with_ages(i32::MAX, i32::MIN);
        let breakdown = ReachEstimator::default().breakdown(&inverted);
        assert_relative_eq!(breakdown.age, 0.75);
    }

    #[test]
    fn test_cost_matches_two_decimal_display() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let period = CampaignPeriod::unchecked(day, day + chrono::TimeDelta::days(3));
        let mut config = base_config(3.0)
            .with_objective(Objective::Traffic)
            .with_countries(["US"])
            .with_interests(["a", "b", "c", "d"]);
        config.period = period;

        let estimate = ReachEstimator::default().estimate(&config);
        assert_eq!(estimate.impressions, 504);
        assert_eq!(estimate.clicks, 40);

        let raw_cpc = 3.0 / 40.0;
        assert_eq!(estimate.cpc.to_string(), format!("{raw_cpc:.2}"));
        assert_eq!(estimate.cpc.to_string(), "0.07");
    }

    #[test]
    fn test_objective_click_ordering() {
        let estimator = ReachEstimator::default();
        let clicks = |objective| {
            estimator
                .estimate(&base_config(50.0).with_objective(objective))
                .clicks
        };

        let traffic = clicks(Objective::Traffic);
        let engagement = clicks(Objective::Engagement);
        let conversions = clicks(Objective::Conversions);
        let awareness = clicks(Objective::Awareness);

        assert!(traffic > engagement);
        assert!(engagement > conversions);
        assert!(conversions > awareness);
        assert_eq!(clicks(Objective::Unspecified), conversions);
    }

    #[test]
    fn test_breakdown_thresholds() {
        let estimator = ReachEstimator::default();

        let b = estimator.breakdown(&base_config(1.0).with_countries(["A", "B", "C", "D"]));
        assert_relative_eq!(b.countries, 1.0);
        let b = estimator.breakdown(&base_config(1.0).with_countries(["A", "B", "C"]));
        assert_relative_eq!(b.countries, 0.8);

        let b = estimator.breakdown(&base_config(1.0).with_interests(["a", "b", "c"]));
        assert_relative_eq!(b.interests, 0.85);
        let b = estimator.breakdown(&base_config(1.0).with_interests(["a", "b", "c", "d"]));
        assert_relative_eq!(b.interests, 0.7);

        let b = estimator.breakdown(&base_config(1.0).with_ages(20, 39));
        assert_relative_eq!(b.age, 0.75);
        let b = estimator.breakdown(&base_config(1.0).with_ages(20, 40));
        assert_relative_eq!(b.age, 0.85);
        let b = estimator.breakdown(&base_config(1.0).with_ages(20, 50));
        assert_relative_eq!(b.age, 1.0);

        let b = estimator.breakdown(&base_config(1.0).with_gender(Gender::Male));
        assert_relative_eq!(b.gender, 0.85);

        let b = estimator.breakdown(
            &base_config(1.0).with_devices([Device::Desktop, Device::Mobile]),
        );
        assert_relative_eq!(b.devices, 0.9);
        let b = estimator.breakdown(&base_config(1.0).with_devices(Device::all().iter().copied()));
        assert_relative_eq!(b.devices, 1.0);

        let b = estimator.breakdown(&base_config(1.0).with_industries(["finance"]));
        assert_relative_eq!(b.industries, 0.8);
    }

    #[test]
    fn test_fully_targeted_score() {
        let config = base_config(100.0)
            .with_countries(["US"])
            .with_interests(["a", "b", "c", "d"])
            .with_ages(25, 30)
            .with_gender(Gender::Female)
            .with_devices([Device::Mobile])
            .with_industries(["tech"]);
        let breakdown = ReachEstimator::default().breakdown(&config);
        assert_relative_eq!(
            breakdown.score(),
            0.8 * 0.7 * 0.75 * 0.85 * 0.9 * 0.8,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_custom_model() {
        let mut model = EstimateModel::DEFAULT;
        model.impressions_per_unit_per_day = 200.0;
        let estimate = ReachEstimator::new(model).estimate(&base_config(50.0));
        assert_eq!(estimate.impressions, 105_000);
    }

    #[test]
    fn test_unit_cost_text() {
        assert_eq!(UnitCost::from_amount(0.952_380_95).to_string(), "0.95");
        assert_eq!(UnitCost::from_amount(12.0).to_string(), "12.00");
        assert_eq!(UnitCost::from_amount(f64::NAN), UnitCost::ZERO);
        assert_eq!("0.5".parse::<UnitCost>().unwrap().hundredths(), 50);
        assert_eq!("3".parse::<UnitCost>().unwrap().hundredths(), 300);
        assert!("1.234".parse::<UnitCost>().is_err());
        assert!(".5".parse::<UnitCost>().is_err());

        for amount in [0.075, 0.015, 1.005, 2.675, 0.952_380_95, 1_234.5] {
            assert_eq!(
                UnitCost::from_amount(amount).to_string(),
                format!("{amount:.2}")
            );
        }
        assert_eq!(UnitCost::from_amount(1e300).hundredths(), u64::MAX);
    }

    #[test]
    fn test_estimate_json_shape() {
        let estimate = ReachEstimator::default().estimate(&base_config(50.0));
        let json = serde_json::to_value(estimate).unwrap();
        assert_eq!(json["impressionsPerDay"], 7_500);
        assert_eq!(json["cpm"], "0.95");
        assert_eq!(json["cpc"], "0.05");
        assert_eq!(json["targetingScore"], 1.5);

        let back: ReachEstimate = serde_json::from_value(json).unwrap();
        assert_eq!(back, estimate);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(ReachEstimator::format_count(999), "999");
        assert_eq!(ReachEstimator::format_count(52_500), "52.50K");
        assert_eq!(ReachEstimator::format_count(1_200_000), "1.20M");
        assert_eq!(ReachEstimator::format_currency(50.0), "$50.00");
    }
}
