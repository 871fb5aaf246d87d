//! Choosing between oracle-direct and regression estimation.

use std::str::FromStr;

use arprice_oracle::PriceOracle;
use arprice_types::{EstimateError, Result};

use crate::{
    DEFAULT_SAMPLE_BYTE_VOLUMES, OracleEstimator, PriceEstimator, RegressionConfig,
    RegressionEstimator,
};

/// Which estimator answers price and capacity queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstimatorStrategy {
    /// Query the oracle for every estimate.
    #[default]
    OracleDirect,
    /// Answer from a regression of a few sampled prices.
    Regression,
}

impl EstimatorStrategy {
    /// Picks a strategy for an upload.
    ///
    /// Regression pays off once an upload needs more estimates than the
    /// regression needs samples, or when it includes a folder whose size is
    /// not known up front.
    #[must_use]
    pub const fn for_upload(file_count: usize, includes_folder: bool) -> Self {
        if includes_folder || file_count > DEFAULT_SAMPLE_BYTE_VOLUMES.len() {
            Self::Regression
        } else {
            Self::OracleDirect
        }
    }

    /// Returns the strategy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OracleDirect => "oracle-direct",
            Self::Regression => "regression",
        }
    }

    /// Returns all strategies.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::OracleDirect, Self::Regression]
    }
}

impl std::fmt::Display for EstimatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EstimatorStrategy {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "oracle-direct" | "oracle" | "direct" => Ok(Self::OracleDirect),
            "regression" => Ok(Self::Regression),
            _ => Err(EstimateError::invalid_input(format!(
                "unknown estimator strategy: {s}"
            ))),
        }
    }
}

/// Builds the estimator for `strategy`.
///
/// `config` only applies to [`EstimatorStrategy::Regression`].
///
/// # Errors
///
/// Returns [`EstimateError::InvalidInput`] if the regression configuration is invalid.
pub fn build_estimator<O: PriceOracle + 'static>(
    strategy: EstimatorStrategy,
    oracle: O,
    config: RegressionConfig,
) -> Result<Box<dyn PriceEstimator>> {
    tracing::debug!(%strategy, "building price estimator");
    let estimator: Box<dyn PriceEstimator> = match strategy {
        EstimatorStrategy::OracleDirect => Box::new(OracleEstimator::new(oracle)),
        EstimatorStrategy::Regression => {
            Box::new(RegressionEstimator::with_config(oracle, config)?)
        }
    };
    Ok(estimator)
}
