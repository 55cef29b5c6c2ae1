//! Launch and cancel commands.
//!
//! Launching re-estimates the draft, posts its checkout payload and records
//! the created session. A failed checkout leaves the campaign in the
//! `failed` state so it can be launched again.

use crate::commands::draft::{load_campaign, open_store};
use crate::display::print_estimate;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Confirm;
use promoreach_campaign::{CampaignStatus, CheckoutPayload};
use promoreach_checkout::{CheckoutClient, CheckoutConfig};
use promoreach_lib::ReachEstimator;
use std::path::PathBuf;
use std::time::Duration;

/// Submit a draft for payment.
pub(crate) async fn launch(
    data_dir: Option<PathBuf>,
    id: Option<&str>,
    checkout_url: String,
    api_key: Option<String>,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut draft = load_campaign(
        &store,
        id,
        "launch",
        &[CampaignStatus::Draft, CampaignStatus::Failed],
    )?;

    draft
        .validate_for_launch()
        .with_context(|| format!("Campaign {} cannot be launched", draft.id))?;
    draft.reestimate(ReachEstimator::global())?;
    store.save(&draft)?;

    if !quiet {
        println!("Campaign: {} ({})", draft.name, draft.id);
        println!(
            "Budget: {} {} ({})",
            ReachEstimator::format_currency(draft.config.budget),
            draft.currency,
            draft.config.period
        );
        print_estimate(&draft.estimated_reach);
        println!();
    }

    if !yes {
        let confirmed = Confirm::new("Proceed to checkout?")
            .with_default(false)
            .prompt()
            .context("Launch cancelled")?;
        if !confirmed {
            println!("Launch aborted. The draft was kept.");
            return Ok(());
        }
    }

    let config = CheckoutConfig::with_endpoint(checkout_url).api_key(api_key);
    let client = CheckoutClient::new(config).context("Failed to create checkout client")?;
    let payload = CheckoutPayload::from(&draft);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?,
        );
        pb.set_message("Creating checkout session...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    match client.create_session(&payload).await {
        Ok(session) => {
            progress.finish_with_message("Checkout session created");
            draft.mark_pending_payment(session.session_id.clone())?;
            store.save(&draft)?;

            println!("Session: {}", session.session_id);
            println!("Complete payment at: {}", session.url);
            Ok(())
        }
        Err(e) => {
            progress.abandon_with_message("Checkout failed");
            let message = e.to_string();
            draft.mark_failed(message)?;
            store.save(&draft)?;
            Err(anyhow::Error::new(e).context(format!("Failed to launch campaign {}", draft.id)))
        }
    }
}

/// Cancel a draft or a campaign awaiting payment.
pub(crate) fn cancel(data_dir: Option<PathBuf>, id: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut draft = load_campaign(
        &store,
        id,
        "cancel",
        &[CampaignStatus::Draft, CampaignStatus::PendingPayment],
    )?;

    draft.mark_cancelled()?;
    store.save(&draft)?;

    println!("Campaign {} cancelled.", draft.id);
    Ok(())
}
