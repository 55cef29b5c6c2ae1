//! Campaign draft definitions and lifecycle.

use chrono::{DateTime, Utc};
use promoreach_estimate::{ReachEstimate, ReachEstimator};
use promoreach_types::{CampaignConfig, PeriodError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a campaign.
pub type CampaignId = Uuid;

/// Currency used when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Errors raised by campaign lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    /// The requested transition is not allowed from the current status.
    #[error("Cannot {action} a campaign that is {status}")]
    InvalidTransition {
        /// What was attempted.
        action: &'static str,
        /// The campaign's status at the time.
        status: CampaignStatus,
    },

    /// The budget is zero, negative or not a number.
    #[error("Budget must be greater than zero (got {0})")]
    InvalidBudget(String),

    /// The campaign dates are not launchable.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// Unknown campaign status.
    #[error(
        "Unknown status: {0}. Valid options: draft, pending_payment, active, completed, cancelled, failed"
    )]
    UnknownStatus(String),

    /// Unknown content kind.
    #[error("Unknown content type: {0}. Valid options: post, article, tool, event, group, company")]
    UnknownContentKind(String),
}

/// Status of a promotion campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Being edited; not yet submitted.
    #[default]
    Draft,
    /// A checkout session was created and awaits payment.
    PendingPayment,
    /// Paid and delivering.
    Active,
    /// Delivery finished.
    Completed,
    /// Withdrawn by the advertiser.
    Cancelled,
    /// Checkout could not be created; may be launched again.
    Failed,
}

impl CampaignStatus {
    /// Returns true if the campaign is in a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if the configuration may still be edited and launched.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Failed)
    }

    /// Returns the status as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingPayment => "pending_payment",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(Self::Draft),
            "pending_payment" | "pending" => Ok(Self::PendingPayment),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "failed" => Ok(Self::Failed),
            _ => Err(CampaignError::UnknownStatus(s.to_string())),
        }
    }
}

/// Kind of content being promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A feed post.
    Post,
    /// A long-form article.
    Article,
    /// A submitted tool listing.
    Tool,
    /// A community event.
    Event,
    /// A community group.
    Group,
    /// A company page.
    Company,
}

impl ContentKind {
    /// Returns the kind as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Article => "article",
            Self::Tool => "tool",
            Self::Event => "event",
            Self::Group => "group",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "article" => Ok(Self::Article),
            "tool" => Ok(Self::Tool),
            "event" => Ok(Self::Event),
            "group" => Ok(Self::Group),
            "company" => Ok(Self::Company),
            _ => Err(CampaignError::UnknownContentKind(s.to_string())),
        }
    }
}

/// Reference to the content a campaign promotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotedContent {
    /// Kind of content.
    pub kind: ContentKind,
    /// Identifier of the content record.
    pub id: String,
}

impl PromotedContent {
    /// Creates a content reference.
    #[must_use]
    pub fn new(kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// A promotion campaign and its latest estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Unique identifier for this campaign.
    pub id: CampaignId,
    /// Display name.
    pub name: String,
    /// What is being promoted.
    pub content: PromotedContent,
    /// Budget, schedule and targeting.
    pub config: CampaignConfig,
    /// Estimate for `config`, refreshed on every edit.
    pub estimated_reach: ReachEstimate,
    /// Current status.
    pub status: CampaignStatus,
    /// Currency code for the budget.
    pub currency: String,
    /// Timestamp when the draft was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last change.
    pub updated_at: DateTime<Utc>,
    /// Checkout session created at launch.
    pub checkout_session_id: Option<String>,
    /// Error message if launching failed.
    pub error_message: Option<String>,
}

impl CampaignDraft {
    /// Creates a draft and computes its estimate.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content: PromotedContent,
        config: CampaignConfig,
        estimator: &ReachEstimator,
    ) -> Self {
        let now = Utc::now();
        let estimated_reach = estimator.estimate(&config);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content,
            config,
            estimated_reach,
            status: CampaignStatus::Draft,
            currency: DEFAULT_CURRENCY.to_string(),
            created_at: now,
            updated_at: now,
            checkout_session_id: None,
            error_message: None,
        }
    }

    /// Returns true if the campaign is in a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Replaces the configuration and recomputes the estimate.
    ///
    /// # Errors
    ///
    /// Returns an error unless the campaign is a draft or a failed launch.
    pub fn update_config(
        &mut self,
        config: CampaignConfig,
        estimator: &ReachEstimator,
    ) -> Result<(), CampaignError> {
        self.ensure_editable("edit")?;
        self.config = config;
        self.estimated_reach = estimator.estimate(&self.config);
        self.touch();
        Ok(())
    }

    /// Recomputes the estimate for the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error unless the campaign is a draft or a failed launch.
    pub fn reestimate(&mut self, estimator: &ReachEstimator) -> Result<(), CampaignError> {
        self.ensure_editable("re-estimate")?;
        self.estimated_reach = estimator.estimate(&self.config);
        self.touch();
        Ok(())
    }

    /// Checks that the campaign can be submitted for payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the status, budget or dates forbid launching.
    pub fn validate_for_launch(&self) -> Result<(), CampaignError> {
        self.ensure_editable("launch")?;
        let budget = self.config.budget;
        if !budget.is_finite() || budget <= 0.0 {
            return Err(CampaignError::InvalidBudget(budget.to_string()));
        }
        self.config.period.validate()?;
        Ok(())
    }

    /// Records a created checkout session.
    ///
    /// # Errors
    ///
    /// Returns an error unless the campaign is a draft or a failed launch.
    pub fn mark_pending_payment(
        &mut self,
        session_id: impl Into<String>,
    ) -> Result<(), CampaignError> {
        self.ensure_editable("submit")?;
        self.status = CampaignStatus::PendingPayment;
        self.checkout_session_id = Some(session_id.into());
        self.error_message = None;
        self.touch();
        tracing::info!(campaign = %self.id, "campaign awaiting payment");
        Ok(())
    }

    /// Marks the campaign as paid and delivering.
    ///
    /// # Errors
    ///
    /// Returns an error unless payment is pending.
    pub fn mark_active(&mut self) -> Result<(), CampaignError> {
        self.transition("activate", &[CampaignStatus::PendingPayment], CampaignStatus::Active)
    }

    /// Marks delivery as finished.
    ///
    /// # Errors
    ///
    /// Returns an error unless the campaign is active.
    pub fn mark_completed(&mut self) -> Result<(), CampaignError> {
        self.transition("complete", &[CampaignStatus::Active], CampaignStatus::Completed)
    }

    /// Withdraws the campaign.
    ///
    /// # Errors
    ///
    /// Returns an error unless the campaign is a draft or awaiting payment.
    pub fn mark_cancelled(&mut self) -> Result<(), CampaignError> {
        self.transition(
            "cancel",
            &[CampaignStatus::Draft, CampaignStatus::PendingPayment],
            CampaignStatus::Cancelled,
        )
    }

    /// Records a failed launch with an error message.
    ///
    /// # Errors
    ///
    /// Returns an error if the campaign is already active or finished.
    pub fn mark_failed(&mut self, error: impl Into<String>) -> Result<(), CampaignError> {
        self.transition(
            "fail",
            &[
                CampaignStatus::Draft,
                CampaignStatus::Failed,
                CampaignStatus::PendingPayment,
            ],
            CampaignStatus::Failed,
        )?;
        self.error_message = Some(error.into());
        Ok(())
    }

    fn ensure_editable(&self, action: &'static str) -> Result<(), CampaignError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(CampaignError::InvalidTransition {
                action,
                status: self.status,
            })
        }
    }

    fn transition(
        &mut self,
        action: &'static str,
        from: &[CampaignStatus],
        to: CampaignStatus,
    ) -> Result<(), CampaignError> {
        if !from.contains(&self.status) {
            return Err(CampaignError::InvalidTransition {
                action,
                status: self.status,
            });
        }
        tracing::info!(campaign = %self.id, from = %self.status, to = %to, "campaign status changed");
        self.status = to;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
