//! Estimate command implementation.

use crate::display::{
    CampaignArgs, Format, load_estimator, print_breakdown, print_campaign, print_estimate,
    write_records,
};
use anyhow::Result;
use promoreach_lib::prelude::*;
use std::path::Path;

/// Estimate reach and cost for one campaign configuration.
pub(crate) fn estimate(
    campaign: &CampaignArgs,
    format: Format,
    model: Option<&Path>,
    breakdown: bool,
) -> Result<()> {
    let config = campaign.to_config()?;
    let estimator = load_estimator(model)?;

    if config.budget <= 0.0 {
        tracing::warn!(budget = %campaign.budget, "budget is zero or not a number");
    }

    let estimate = estimator.estimate(&config);

    if format != Format::Text {
        let record = EstimateRecord::new(config.objective.as_str(), &config, estimate);
        return write_records(&[record], format);
    }

    print_campaign(&config);
    println!();
    print_estimate(&estimate);

    if breakdown {
        print_breakdown(&estimator.breakdown(&config));
    }

    if config.period.validate().is_err() {
        println!("\nNote: end date is not after start date; estimated as a 1-day campaign.");
    }

    Ok(())
}
