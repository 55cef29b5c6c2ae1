//! Output formatters for promoreach estimate reports.
//!
//! This crate provides formatters for writing [`EstimateRecord`] rows
//! to various output formats:
//!
//! - [`CsvFormatter`] - CSV or TSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/promoreach/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{EstimateRecord, FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonLayout};
