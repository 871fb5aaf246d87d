//! Storage price and capacity estimation engine for arprice.
//!
//! This crate estimates what storing bytes on Arweave costs, and how many
//! bytes a budget buys:
//!
//! - [`PriceEstimator`] - The capability shared by every estimator
//! - [`PriceRegression`] - Least-squares fit of price against byte count
//! - [`OracleEstimator`] - Queries the oracle on every call
//! - [`RegressionEstimator`] - Answers from a cached regression with single-flight refresh
//! - [`EstimatorStrategy`] - Picks an estimator for an upload

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ardrive/arprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;
mod oracle_estimator;
mod regression;
mod regression_estimator;
mod strategy;

#[cfg(test)]
mod testing;

pub use estimator::{
    PROBE_REFERENCE_BYTES, PriceEstimator, byte_count_by_probing, byte_count_for_ar_after_tip,
};
pub use oracle_estimator::OracleEstimator;
pub use regression::PriceRegression;
pub use regression_estimator::{
    DEFAULT_SAMPLE_BYTE_VOLUMES, RegressionConfig, RegressionEstimator,
};
pub use strategy::{EstimatorStrategy, build_estimator};
