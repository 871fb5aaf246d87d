//! Samples command implementation.
//!
//! Fetches a fresh set of price samples and shows the fitted regression.

use crate::display::{Output, format_ar, format_bytes};
use anyhow::{Context, Result};
use arprice_lib::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// JSON report for the samples command.
#[derive(Serialize)]
struct SamplesReport<'a> {
    samples: &'a [DataPriceSample],
    base_winston_price: f64,
    marginal_winston_price: f64,
    fitted_at: String,
}

/// Fetch price samples and print the fitted regression.
pub(crate) async fn samples(
    sample_volumes: Option<Vec<ByteCount>>,
    oracle_config: OracleConfig,
    output: Output,
) -> Result<()> {
    let oracle = Arc::new(
        GatewayOracle::new(oracle_config).context("Failed to create gateway client")?,
    );
    let config = super::regression_config(sample_volumes).skip_setup(true);
    let estimator =
        RegressionEstimator::with_config(oracle, config).context("Invalid sample volumes")?;

    let progress = output.spinner(&format!(
        "Sampling {} byte volumes",
        estimator.sample_byte_volumes().len()
    ));
    let model = estimator.refresh().await;
    progress.finish_and_clear();
    let model = model.context("Failed to fetch price samples")?;

    if output.json {
        return output.print_json(&SamplesReport {
            samples: model.samples(),
            base_winston_price: model.base_winston_price(),
            marginal_winston_price: model.marginal_winston_price(),
            fitted_at: model.fitted_at().to_rfc3339(),
        });
    }

    println!("{:<16} {:>12} {:>20} {:>22}", "BYTES", "SIZE", "WINSTON", "AR");
    println!("{}", "-".repeat(73));
    for sample in model.samples() {
        println!(
            "{:<16} {:>12} {:>20} {:>22}",
            sample.byte_count,
            format_bytes(sample.byte_count),
            sample.winston_price,
            format_ar(sample.winston_price),
        );
    }

    println!("\nBase price:     {:.0} Winston", model.base_winston_price());
    println!("Marginal price: {:.6} Winston/byte", model.marginal_winston_price());
    println!("Fitted at:      {}", model.fitted_at().format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}
