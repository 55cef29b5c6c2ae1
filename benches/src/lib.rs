//! Benchmark fixtures for promoreach.

use chrono::NaiveDate;
use promoreach_types::{CampaignConfig, CampaignPeriod, Device, Gender, Objective};

/// A named campaign configuration used as benchmark input.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short label used as the benchmark id.
    pub name: &'static str,
    /// Configuration to estimate.
    pub config: CampaignConfig,
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Returns scenarios from untargeted to heavily targeted.
pub fn scenarios() -> Vec<Scenario> {
    let base = CampaignConfig::new(
        50.0,
        CampaignPeriod::starting(start_date(), 7),
        Objective::Awareness,
    );

    vec![
        Scenario {
            name: "global",
            config: base.clone(),
        },
        Scenario {
            name: "focused",
            config: base
                .clone()
                .with_countries(["US", "CA"])
                .with_interests(["rust", "devtools"])
                .with_objective(Objective::Traffic),
        },
        Scenario {
            name: "narrow",
            config: base
                .with_budget(1_250.0)
                .with_countries(["US", "CA", "GB", "DE", "FR", "NL", "SE"])
                .with_interests(["rust", "go", "wasm", "databases", "compilers", "cloud"])
                .with_industries(["software"])
                .with_devices([Device::Mobile])
                .with_ages(25, 34)
                .with_gender(Gender::Female)
                .with_objective(Objective::Conversions),
        },
    ]
}

/// Returns `count` configurations with distinct budgets.
pub fn budget_sweep(count: usize) -> Vec<CampaignConfig> {
    let base = CampaignConfig::new(
        10.0,
        CampaignPeriod::starting(start_date(), 14),
        Objective::Engagement,
    )
    .with_countries(["US"]);

    (0..count)
        .map(|i| base.clone().with_budget(10.0 + i as f64 * 2.5))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_are_distinct() {
        let scenarios = scenarios();
        assert_eq!(scenarios.len(), 3);
        assert_ne!(scenarios[0].config, scenarios[1].config);
    }

    #[test]
    fn test_budget_sweep() {
        let sweep = budget_sweep(4);
        assert_eq!(sweep.len(), 4);
        assert!((sweep[3].budget - 17.5).abs() < f64::EPSILON);
    }
}
