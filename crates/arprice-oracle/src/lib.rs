//! Pricing oracle capability and Arweave gateway adapter for arprice.
//!
//! This crate provides the oracle boundary of the estimation engine:
//!
//! - [`PriceOracle`] - The "price for N bytes" capability
//! - [`GatewayOracle`] - HTTP adapter with timeouts and retries
//! - [`LinearOracle`] - Fixed-rate oracle for tests and offline estimation
//! - [`url::price_url`] - Builds gateway price endpoint URLs

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ardrive/arprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod linear;
mod oracle;
pub mod url;

pub use client::{GatewayOracle, OracleConfig};
pub use linear::LinearOracle;
pub use oracle::{OracleError, PriceOracle};
