//! Arweave storage price and capacity estimation library.
//!
//! This is a facade crate that re-exports functionality from the arprice
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use arprice_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oracle = GatewayOracle::with_defaults()?;
//!     let estimator = RegressionEstimator::new(oracle)?;
//!
//!     let price = estimator
//!         .base_winston_price_for_byte_count(ByteCount::new(1024 * 1024))
//!         .await?;
//!     println!("1 MiB costs {price} Winston");
//!
//!     let budget: Ar = "0.5".parse()?;
//!     let bytes = estimator
//!         .byte_count_for_ar(budget, &CommunityTip::default())
//!         .await?;
//!     println!("0.5 AR buys {bytes} bytes");
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ardrive/arprice/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use arprice_types::*;

// Re-export the oracle boundary
pub use arprice_oracle::{
    GatewayOracle, LinearOracle, OracleConfig, OracleError, PriceOracle, url,
};

// Re-export the estimation engine
pub use arprice_estimate::{
    DEFAULT_SAMPLE_BYTE_VOLUMES, EstimatorStrategy, OracleEstimator, PriceEstimator,
    PriceRegression, RegressionConfig, RegressionEstimator, build_estimator,
};

/// Prelude module for convenient imports.
///
/// ```
/// use arprice_lib::prelude::*;
/// ```
pub mod prelude {
    pub use arprice_types::{
        Ar, ByteCount, CommunityTip, DataPriceSample, EstimateError, Result, Winston,
    };

    pub use arprice_oracle::{GatewayOracle, LinearOracle, OracleConfig, PriceOracle};

    pub use arprice_estimate::{
        EstimatorStrategy, OracleEstimator, PriceEstimator, PriceRegression, RegressionConfig,
        RegressionEstimator, build_estimator,
    };
}
