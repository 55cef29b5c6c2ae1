//! Checkout request body built from a campaign.

use crate::{CampaignDraft, CampaignId, ContentKind};
use chrono::NaiveDate;
use promoreach_estimate::ReachEstimate;
use promoreach_types::{Device, Gender, Objective};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Audience targeting as sent to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingSummary {
    /// Country codes.
    pub countries: BTreeSet<String>,
    /// Interest topics.
    pub interests: BTreeSet<String>,
    /// Industries.
    pub industries: BTreeSet<String>,
    /// Device types.
    pub devices: BTreeSet<Device>,
    /// Lower age bound.
    pub age_from: i32,
    /// Upper age bound.
    pub age_to: i32,
    /// Gender filter.
    pub gender: Gender,
}

/// Body of a checkout session request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    /// Campaign being paid for.
    pub campaign_id: CampaignId,
    /// Campaign display name.
    pub name: String,
    /// Kind of promoted content.
    pub content_type: ContentKind,
    /// Identifier of the promoted content.
    pub content_id: String,
    /// Budget amount.
    pub budget: f64,
    /// Currency code.
    pub currency: String,
    /// First delivery day.
    pub start_date: NaiveDate,
    /// Last delivery day.
    pub end_date: NaiveDate,
    /// Campaign objective.
    pub objective: Objective,
    /// Audience targeting.
    pub targeting: TargetingSummary,
    /// Estimate shown to the advertiser.
    pub estimated_reach: ReachEstimate,
}

impl From<&CampaignDraft> for CheckoutPayload {
    fn from(draft: &CampaignDraft) -> Self {
        let config = &draft.config;
        Self {
            campaign_id: draft.id,
            name: draft.name.clone(),
            content_type: draft.content.kind,
            content_id: draft.content.id.clone(),
            budget: config.budget,
            currency: draft.currency.clone(),
            start_date: config.period.start,
            end_date: config.period.end,
            objective: config.objective,
            targeting: TargetingSummary {
                countries: config.countries.clone(),
                interests: config.interests.clone(),
                industries: config.industries.clone(),
                devices: config.devices.clone(),
                age_from: config.age_from,
                age_to: config.age_to,
                gender: config.gender,
            },
            estimated_reach: draft.estimated_reach,
        }
    }
}
