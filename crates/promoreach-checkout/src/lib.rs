//! Checkout client for promoreach.
//!
//! - [`CheckoutClient`] - Posts a [`CheckoutPayload`](promoreach_campaign::CheckoutPayload) and returns the session
//! - [`CheckoutConfig`] - Endpoint, credentials, timeouts and retry policy
//! - [`CheckoutSession`] - The created checkout session

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;

pub use client::{
    CheckoutClient, CheckoutConfig, CheckoutError, CheckoutSession, DEFAULT_CHECKOUT_URL,
};
