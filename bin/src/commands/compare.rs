//! Compare command implementation.

use crate::display::{CampaignArgs, Format, load_estimator, write_records};
use anyhow::Result;
use promoreach_lib::prelude::*;
use std::path::Path;

/// Estimate the same campaign once per objective.
pub(crate) fn compare(campaign: &CampaignArgs, format: Format, model: Option<&Path>) -> Result<()> {
    let base = campaign.to_config()?;
    let estimator = load_estimator(model)?;

    let records: Vec<_> = Objective::all()
        .iter()
        .map(|&objective| {
            let config = base.clone().with_objective(objective);
            let estimate = estimator.estimate(&config);
            EstimateRecord::new(objective.as_str(), &config, estimate)
        })
        .collect();

    if format == Format::Text {
        println!(
            "{} over {} ({} days)\n",
            ReachEstimator::format_currency(base.budget),
            base.period,
            base.duration_days()
        );
    }

    write_records(&records, format)
}
