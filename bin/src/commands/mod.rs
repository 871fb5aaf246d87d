//! CLI command implementations.

pub(crate) mod capacity;
pub(crate) mod price;
pub(crate) mod samples;

use anyhow::{Context, Result};
use arprice_lib::prelude::*;
use std::sync::Arc;

/// Builds the regression settings, using the default volumes when none are given.
fn regression_config(sample_volumes: Option<Vec<ByteCount>>) -> RegressionConfig {
    let mut config = RegressionConfig::default();
    if let Some(volumes) = sample_volumes {
        config.sample_byte_volumes = volumes;
    }
    config
}

/// Connects to the gateway and builds the estimator for `strategy`.
fn estimator(
    strategy: EstimatorStrategy,
    sample_volumes: Option<Vec<ByteCount>>,
    oracle_config: OracleConfig,
) -> Result<Box<dyn PriceEstimator>> {
    let oracle = Arc::new(
        GatewayOracle::new(oracle_config).context("Failed to create gateway client")?,
    );
    tracing::info!(%strategy, gateway = %oracle.config().gateway_url, "using price estimator");
    build_estimator(strategy, oracle, regression_config(sample_volumes))
        .context("Invalid estimator configuration")
}
