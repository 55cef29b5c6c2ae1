//! Display utilities and argument handling for the promoreach CLI.

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeDelta};
use clap::{Args, ValueEnum};
use promoreach_lib::prelude::*;
use promoreach_lib::{AudienceBreakdown, DATE_FORMAT, parse_date};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Campaign length used when no end date is given.
const DEFAULT_DURATION_DAYS: i64 = 7;

/// Output format for estimates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Csv,
    Json,
    Ndjson,
}

/// Budget, schedule and targeting flags shared by several commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CampaignArgs {
    /// Total budget
    #[arg(short, long)]
    pub(crate) budget: String,

    /// Start date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub(crate) start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to 7 days after start.
    #[arg(short, long)]
    pub(crate) end: Option<String>,

    /// Objective (awareness, engagement, traffic, conversions)
    #[arg(short, long, default_value = "awareness")]
    pub(crate) objective: String,

    /// Target country (repeatable or comma-separated)
    #[arg(long = "country", value_delimiter = ',')]
    pub(crate) countries: Vec<String>,

    /// Target interest (repeatable or comma-separated)
    #[arg(long = "interest", value_delimiter = ',')]
    pub(crate) interests: Vec<String>,

    /// Target industry (repeatable or comma-separated)
    #[arg(long = "industry", value_delimiter = ',')]
    pub(crate) industries: Vec<String>,

    /// Target device: desktop, mobile, tablet (repeatable or comma-separated)
    #[arg(long = "device", value_delimiter = ',')]
    pub(crate) devices: Vec<String>,

    /// Youngest age targeted
    #[arg(long, default_value = "18")]
    pub(crate) age_from: String,

    /// Oldest age targeted
    #[arg(long, default_value = "65")]
    pub(crate) age_to: String,

    /// Gender (all, male, female)
    #[arg(long, default_value = "all")]
    pub(crate) gender: String,
}

impl CampaignArgs {
    /// Converts the flags to form input, filling in default dates.
    pub(crate) fn to_input(&self, today: NaiveDate) -> RawCampaignInput {
        let start = self
            .start
            .clone()
            .unwrap_or_else(|| today.format(DATE_FORMAT).to_string());

        let end = self.end.clone().unwrap_or_else(|| {
            parse_date(&start)
                .map(|d| {
                    (d + TimeDelta::days(DEFAULT_DURATION_DAYS))
                        .format(DATE_FORMAT)
                        .to_string()
                })
                .unwrap_or_default()
        });

        RawCampaignInput {
            budget: self.budget.clone(),
            start_date: start,
            end_date: end,
            objective: self.objective.clone(),
            countries: self.countries.clone(),
            interests: self.interests.clone(),
            industries: self.industries.clone(),
            devices: self.devices.clone(),
            age_from: self.age_from.clone(),
            age_to: self.age_to.clone(),
            gender: self.gender.clone(),
        }
    }

    /// Sanitizes the flags into a campaign configuration.
    pub(crate) fn to_config(&self) -> Result<CampaignConfig> {
        let today = chrono::Local::now().date_naive();
        let config = self
            .to_input(today)
            .sanitize()
            .context("Invalid campaign options")?;
        Ok(config)
    }
}

/// Loads the estimator for an optional model file.
pub(crate) fn load_estimator(model: Option<&Path>) -> Result<ReachEstimator> {
    match model {
        Some(path) => {
            let model = EstimateModel::from_path(path)
                .with_context(|| format!("Failed to load model from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded estimate model");
            Ok(ReachEstimator::new(model))
        }
        None => Ok(ReachEstimator::default()),
    }
}

/// Writes estimate records to stdout in a machine-readable format.
pub(crate) fn write_records(records: &[EstimateRecord], format: Format) -> Result<()> {
    let mut writer = BufWriter::new(std::io::stdout());

    match format {
        Format::Text => print_table(records),
        Format::Csv => CsvFormatter::new().write_estimates(records, &mut writer)?,
        Format::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_estimates(records, &mut writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_estimates(records, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

/// Prints the campaign parameters an estimate was computed for.
pub(crate) fn print_campaign(config: &CampaignConfig) {
    println!("Budget:      {}", ReachEstimator::format_currency(config.budget));
    println!(
        "Schedule:    {} ({} days)",
        config.period,
        config.duration_days()
    );
    println!("Objective:   {}", config.objective);
    println!("Countries:   {}", list_or(&config.countries, "worldwide"));
    println!("Interests:   {}", list_or(&config.interests, "any"));
    println!("Industries:  {}", list_or(&config.industries, "any"));
    println!("Devices:     {}", list_or(&config.devices, "all"));
    println!(
        "Audience:    ages {}-{}, {}",
        config.age_from, config.age_to, config.gender
    );
}

/// Prints an estimate summary.
pub(crate) fn print_estimate(estimate: &ReachEstimate) {
    println!("{}", ReachEstimator::format_estimate(estimate));
}

/// Prints the audience factors behind a targeting score.
pub(crate) fn print_breakdown(breakdown: &AudienceBreakdown) {
    println!("\nAudience factors:");
    for (name, factor) in breakdown.factors() {
        println!("  {name:<12} x{factor:.2}");
    }
    println!("  {:<12} ={:.3}", "score", breakdown.score());
}

fn print_table(records: &[EstimateRecord]) {
    println!(
        "{:<14} {:>12} {:>10} {:>10} {:>8} {:>8} {:>7}",
        "SCENARIO", "IMPRESSIONS", "PER DAY", "CLICKS", "CPM", "CPC", "SCORE"
    );
    println!("{}", "-".repeat(75));

    for record in records {
        let est = &record.estimate;
        let cpm = format!("${}", est.cpm);
        let cpc = format!("${}", est.cpc);
        println!(
            "{:<14} {:>12} {:>10} {:>10} {cpm:>8} {cpc:>8} {:>7.3}",
            record.scenario,
            ReachEstimator::format_count(est.impressions),
            ReachEstimator::format_count(est.impressions_per_day),
            ReachEstimator::format_count(est.clicks),
            est.targeting_score,
        );
    }
}

fn list_or<T: std::fmt::Display>(items: impl IntoIterator<Item = T>, empty: &str) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        empty.to_string()
    } else {
        joined
    }
}
