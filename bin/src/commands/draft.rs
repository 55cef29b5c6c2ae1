//! Draft management commands (create, list, show, edit, delete).

use crate::display::{CampaignArgs, print_campaign, print_estimate};
use anyhow::{Context, Result};
use inquire::{Confirm, Select};
use promoreach_campaign::{
    CampaignDraft, CampaignId, CampaignStatus, CampaignStore, ContentKind, PromotedContent,
};
use promoreach_lib::ReachEstimator;
use std::path::PathBuf;

/// Opens the draft store at `data_dir` or the default location.
pub(crate) fn open_store(data_dir: Option<PathBuf>) -> Result<CampaignStore> {
    let store = match data_dir {
        Some(dir) => CampaignStore::new(dir),
        None => CampaignStore::with_default_path(),
    };
    store.context("Failed to open campaign store")
}

/// Loads a campaign by id, or prompts for one among those in `statuses`.
pub(crate) fn load_campaign(
    store: &CampaignStore,
    id: Option<&str>,
    action: &str,
    statuses: &[CampaignStatus],
) -> Result<CampaignDraft> {
    let id: CampaignId = match id {
        Some(id) => id.parse().context("Invalid campaign ID format")?,
        None => prompt_selection(store, action, statuses)?,
    };
    store
        .load(id)
        .with_context(|| format!("Failed to load campaign {id}"))
}

fn prompt_selection(
    store: &CampaignStore,
    action: &str,
    statuses: &[CampaignStatus],
) -> Result<CampaignId> {
    let drafts: Vec<_> = store
        .list()?
        .into_iter()
        .filter(|d| statuses.is_empty() || statuses.contains(&d.status))
        .collect();

    if drafts.is_empty() {
        anyhow::bail!("No campaigns found to {action}.");
    }

    let options: Vec<String> = drafts
        .iter()
        .map(|d| {
            format!(
                "{} | {} | {} | {}",
                d.id,
                d.status,
                ReachEstimator::format_currency(d.config.budget),
                d.name
            )
        })
        .collect();

    let selection = Select::new(&format!("Select a campaign to {action}:"), options)
        .prompt()
        .context("Campaign selection cancelled")?;

    // The id is the first field of the option label.
    selection
        .split(" | ")
        .next()
        .context("Failed to parse campaign selection")?
        .parse()
        .context("Invalid campaign ID format")
}

/// Create and store a draft.
pub(crate) fn create(
    data_dir: Option<PathBuf>,
    name: &str,
    content_type: &str,
    content_id: &str,
    campaign: &CampaignArgs,
) -> Result<()> {
    let kind: ContentKind = content_type.parse()?;
    let config = campaign.to_config()?;
    let store = open_store(data_dir)?;

    let draft = CampaignDraft::new(
        name,
        PromotedContent::new(kind, content_id),
        config,
        ReachEstimator::global(),
    );
    store.save(&draft).context("Failed to save draft")?;

    println!("Draft created: {}", draft.id);
    println!();
    print_estimate(&draft.estimated_reach);
    println!("\nLaunch with: promoreach launch {}", draft.id);
    Ok(())
}

/// List stored campaigns.
pub(crate) fn list(data_dir: Option<PathBuf>, status: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    let drafts = match status {
        Some(s) => store.by_status(s.parse()?)?,
        None => store.list()?,
    };

    if drafts.is_empty() {
        println!("No campaigns found.");
        return Ok(());
    }

    println!(
        "{:<36} {:<16} {:>10} {:>12} {:<20}",
        "CAMPAIGN ID", "STATUS", "BUDGET", "IMPRESSIONS", "NAME"
    );
    println!("{}", "-".repeat(98));

    for draft in &drafts {
        println!(
            "{:<36} {:<16} {:>10} {:>12} {:<20}",
            draft.id,
            draft.status,
            ReachEstimator::format_currency(draft.config.budget),
            ReachEstimator::format_count(draft.estimated_reach.impressions),
            draft.name,
        );
    }

    println!("\nTotal: {} campaign(s)", drafts.len());
    Ok(())
}

/// Show a campaign in detail.
pub(crate) fn show(data_dir: Option<PathBuf>, id: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    let draft = load_campaign(&store, id, "show", &[])?;

    println!("Campaign: {}", draft.id);
    println!("Name: {}", draft.name);
    println!("Content: {} {}", draft.content.kind, draft.content.id);
    println!("Status: {}", draft.status);
    println!("Currency: {}", draft.currency);
    println!("Created: {}", draft.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Updated: {}", draft.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(session) = &draft.checkout_session_id {
        println!("Checkout session: {session}");
    }
    if let Some(err) = &draft.error_message {
        println!("Error: {err}");
    }

    println!();
    print_campaign(&draft.config);
    println!();
    print_estimate(&draft.estimated_reach);
    Ok(())
}

/// Replace a draft's budget, schedule and targeting, and re-estimate it.
pub(crate) fn edit(
    data_dir: Option<PathBuf>,
    id: Option<&str>,
    campaign: &CampaignArgs,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let draft = apply_edit(&store, id, campaign)?;

    println!("Draft updated: {}", draft.id);
    println!();
    print_campaign(&draft.config);
    println!();
    print_estimate(&draft.estimated_reach);
    Ok(())
}

fn apply_edit(
    store: &CampaignStore,
    id: Option<&str>,
    campaign: &CampaignArgs,
) -> Result<CampaignDraft> {
    let config = campaign.to_config()?;
    let mut draft = load_campaign(
        store,
        id,
        "edit",
        &[CampaignStatus::Draft, CampaignStatus::Failed],
    )?;

    draft
        .update_config(config, ReachEstimator::global())
        .with_context(|| format!("Campaign {} cannot be edited", draft.id))?;
    store.save(&draft).context("Failed to save draft")?;
    Ok(draft)
}

/// Delete a campaign after confirmation.
pub(crate) fn delete(data_dir: Option<PathBuf>, id: Option<&str>, yes: bool) -> Result<()> {
    let store = open_store(data_dir)?;
    let draft = load_campaign(&store, id, "delete", &[])?;

    if draft.status == CampaignStatus::Active {
        anyhow::bail!("Campaign {} is active and cannot be deleted", draft.id);
    }

    if !yes {
        let confirmed = Confirm::new(&format!("Delete campaign '{}' ({})?", draft.name, draft.id))
            .with_default(false)
            .prompt()
            .context("Deletion cancelled")?;
        if !confirmed {
            println!("Nothing deleted.");
            return Ok(());
        }
    }

    store.delete(draft.id)?;
    println!("Campaign {} deleted.", draft.id);
    Ok(())
}
