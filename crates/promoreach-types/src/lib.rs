//! Core types for the promoreach reach and cost estimator.
//!
//! This crate provides the fundamental data structures used throughout promoreach:
//!
//! - [`CampaignConfig`] - Budget, dates, objective and audience targeting
//! - [`CampaignPeriod`] - Delivery dates with a floored day count
//! - [`Objective`], [`Gender`], [`Device`] - Targeting options
//! - [`RawCampaignInput`] - Form-shaped input and its sanitization

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod input;
mod period;
mod targeting;

pub use config::{CampaignConfig, MAX_AGE, MIN_AGE};
pub use error::{InputError, PeriodError};
pub use input::{RawCampaignInput, clamp_ages, parse_amount, sanitize_amount};
pub use period::{CampaignPeriod, DATE_FORMAT, parse_date};
pub use targeting::{Device, Gender, Objective};
