//! promoreach CLI - Promotion reach and cost estimator.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use promoreach_checkout::DEFAULT_CHECKOUT_URL;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{CampaignArgs, Format};

#[derive(Parser)]
#[command(name = "promoreach")]
#[command(about = "Promotion reach and cost estimator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and logs)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory where campaign drafts are stored
    #[arg(long, global = true, env = "PROMOREACH_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate reach and cost for a campaign
    Estimate {
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Estimate model file (JSON). Defaults to the built-in model.
        #[arg(long)]
        model: Option<PathBuf>,

        /// Show the individual audience factors
        #[arg(long)]
        breakdown: bool,
    },

    /// Compare estimates across all objectives
    Compare {
        #[command(flatten)]
        campaign: CampaignArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Estimate model file (JSON). Defaults to the built-in model.
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Print the active estimate model as JSON
    Model {
        /// Estimate model file (JSON). Defaults to the built-in model.
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Manage campaign drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Submit a draft for payment
    Launch {
        /// Campaign ID (prompts when omitted)
        id: Option<String>,

        /// Checkout endpoint
        #[arg(long, env = "PROMOREACH_CHECKOUT_URL", default_value = DEFAULT_CHECKOUT_URL)]
        checkout_url: String,

        /// API key sent as a bearer token
        #[arg(long, env = "PROMOREACH_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Cancel a draft or a campaign awaiting payment
    Cancel {
        /// Campaign ID (prompts when omitted)
        id: Option<String>,
    },
}

/// Actions for managing drafts.
#[derive(Subcommand)]
enum DraftAction {
    /// Create a draft and show its estimate
    Create {
        /// Campaign name
        #[arg(long)]
        name: String,

        /// Kind of content promoted (post, article, tool, event, group, company)
        #[arg(long, default_value = "post")]
        content_type: String,

        /// Identifier of the promoted content
        #[arg(long)]
        content_id: String,

        #[command(flatten)]
        campaign: CampaignArgs,
    },

    /// List stored drafts
    List {
        /// Only show campaigns with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a draft in detail
    Show {
        /// Campaign ID (prompts when omitted)
        id: Option<String>,
    },

    /// Change a draft's budget, schedule and targeting
    Edit {
        /// Campaign ID (prompts when omitted)
        id: Option<String>,

        #[command(flatten)]
        campaign: CampaignArgs,
    },

    /// Delete a draft
    Delete {
        /// Campaign ID (prompts when omitted)
        id: Option<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let data_dir = cli.data_dir;

    match command {
        Commands::Estimate {
            campaign,
            format,
            model,
            breakdown,
        } => commands::estimate::estimate(&campaign, format, model.as_deref(), breakdown),
        Commands::Compare {
            campaign,
            format,
            model,
        } => commands::compare::compare(&campaign, format, model.as_deref()),
        Commands::Model { model } => commands::model::show_model(model.as_deref()),
        Commands::Draft { action } => match action {
            DraftAction::Create {
                name,
                content_type,
                content_id,
                campaign,
            } => commands::draft::create(
                data_dir,
                &name,
                &content_type,
                &content_id,
                &campaign,
            ),
            DraftAction::List { status } => commands::draft::list(data_dir, status.as_deref()),
            DraftAction::Show { id } => commands::draft::show(data_dir, id.as_deref()),
            DraftAction::Edit { id, campaign } => {
                commands::draft::edit(data_dir, id.as_deref(), &campaign)
            }
            DraftAction::Delete { id, yes } => {
                commands::draft::delete(data_dir, id.as_deref(), yes)
            }
        },
        Commands::Launch {
            id,
            checkout_url,
            api_key,
            yes,
        } => {
            commands::launch::launch(
                data_dir,
                id.as_deref(),
                checkout_url,
                api_key,
                yes,
                cli.quiet,
            )
            .await
        }
        Commands::Cancel { id } => commands::launch::cancel(data_dir, id.as_deref()),
    }
}
