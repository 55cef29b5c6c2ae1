//! Campaign drafts and their lifecycle for promoreach.
//!
//! - [`CampaignDraft`] - A campaign with its configuration and latest estimate
//! - [`CampaignStatus`] - Lifecycle from draft through payment to completion
//! - [`CheckoutPayload`] - Request body sent when launching a campaign
//! - [`CampaignStore`] - JSON-file persistence for drafts

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod campaign;
mod payload;
mod store;

pub use campaign::{
    CampaignDraft, CampaignError, CampaignId, CampaignStatus, ContentKind, DEFAULT_CURRENCY,
    PromotedContent,
};
pub use payload::{CheckoutPayload, TargetingSummary};
pub use store::{CampaignStore, Result, StoreError};
