//! Promotion reach and cost estimation.
//!
//! This is a facade crate that re-exports functionality from the promoreach
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use promoreach_lib::prelude::*;
//!
//! let config = RawCampaignInput {
//!     budget: "50".into(),
//!     start_date: "2024-01-01".into(),
//!     end_date: "2024-01-08".into(),
//!     countries: vec!["US".into(), "CA".into()],
//!     ..Default::default()
//! }
//! .sanitize()?;
//!
//! let estimator = ReachEstimator::global();
//! println!("{}", ReachEstimator::format_estimate(&estimator.estimate(&config)));
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use promoreach_types::*;

// Re-export estimation
pub use promoreach_estimate::{
    AudienceBreakdown, EstimateModel, MemoStats, MemoizedEstimator, ModelError, ReachEstimate,
    ReachEstimator, UnitCost,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use promoreach_format::{
    CsvFormatter, EstimateRecord, FormatError, Formatter, JsonFormatter, OutputFormat,
};

// Re-export campaigns
#[cfg(feature = "campaign")]
pub use promoreach_campaign::{
    CampaignDraft, CampaignError, CampaignId, CampaignStatus, CampaignStore, CheckoutPayload,
    ContentKind, PromotedContent, StoreError,
};

// Re-export checkout
#[cfg(feature = "checkout")]
pub use promoreach_checkout::{CheckoutClient, CheckoutConfig, CheckoutError, CheckoutSession};

/// Prelude module for convenient imports.
///
/// ```
/// use promoreach_lib::prelude::*;
/// ```
pub mod prelude {
    pub use promoreach_types::{
        CampaignConfig, CampaignPeriod, Device, Gender, Objective, RawCampaignInput,
    };

    pub use promoreach_estimate::{EstimateModel, MemoizedEstimator, ReachEstimate, ReachEstimator};

    #[cfg(feature = "format")]
    pub use promoreach_format::{CsvFormatter, EstimateRecord, Formatter, JsonFormatter, OutputFormat};

    #[cfg(feature = "campaign")]
    pub use promoreach_campaign::{CampaignDraft, CampaignStatus, CampaignStore, PromotedContent};

    #[cfg(feature = "checkout")]
    pub use promoreach_checkout::{CheckoutClient, CheckoutConfig};
}
