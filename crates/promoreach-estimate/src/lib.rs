//! Promotion reach and cost estimation for promoreach.
//!
//! This crate turns a campaign budget, schedule and targeting into an
//! estimated audience and cost:
//!
//! - [`EstimateModel`] - Delivery rate, audience multipliers and click-through rates
//! - [`ReachEstimator`] - Computes estimates for a [`CampaignConfig`](promoreach_types::CampaignConfig)
//! - [`ReachEstimate`] - Estimated impressions, clicks, CPM and CPC
//! - [`AudienceBreakdown`] - The individual factors behind the targeting score
//! - [`MemoizedEstimator`] - Estimator with an LRU cache of recent results

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;
mod memo;
mod model;

pub use estimator::{AudienceBreakdown, ReachEstimate, ReachEstimator, UnitCost};
pub use memo::{DEFAULT_MEMO_CAPACITY, MemoStats, MemoizedEstimator};
pub use model::{
    AgeFactors, CountryFactors, CtrTable, DEFAULT_MODEL_JSON, EstimateModel, InterestFactors,
    ModelError,
};
