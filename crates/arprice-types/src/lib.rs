//! Core value types for the arprice storage price estimator.
//!
//! This crate provides the fundamental data structures used throughout arprice:
//!
//! - [`ByteCount`] - A non-negative number of bytes
//! - [`Winston`] - A price in the smallest unit of the network currency
//! - [`Ar`] - An amount in the major currency unit (10^12 Winston)
//! - [`DataPriceSample`] - A byte count paired with its quoted price
//! - [`CommunityTip`] - Percentage-or-minimum fee deducted from a spend

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ardrive/arprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod sample;
mod tip;
mod units;

pub use error::{EstimateError, Result};
pub use sample::DataPriceSample;
pub use tip::{CommunityTip, DEFAULT_MIN_WINSTON_FEE, DEFAULT_TIP_PERCENTAGE};
pub use units::{Ar, ByteCount, WINSTON_PER_AR, Winston};
