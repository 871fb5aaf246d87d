//! Price command implementation.
//!
//! Estimates the base network price of storing each given file size.

use crate::display::{Output, StrategyArg, format_ar, format_bytes};
use anyhow::{Context, Result};
use arprice_lib::prelude::*;
use futures::future::try_join_all;
use serde::Serialize;

/// JSON report for the price command.
#[derive(Serialize)]
struct PriceReport {
    strategy: String,
    estimates: Vec<DataPriceSample>,
    total_byte_count: ByteCount,
    total_winston_price: Winston,
}

/// Estimate the price of storing files of the given sizes.
pub(crate) async fn price(
    byte_counts: &[ByteCount],
    strategy: StrategyArg,
    includes_folder: bool,
    sample_volumes: Option<Vec<ByteCount>>,
    oracle_config: OracleConfig,
    output: Output,
) -> Result<()> {
    let strategy = strategy.resolve(byte_counts.len(), includes_folder);
    let estimator = super::estimator(strategy, sample_volumes, oracle_config)?;

    let progress = output.spinner(&format!("Pricing {} file(s) via {strategy}", byte_counts.len()));
    let estimator = &estimator;
    let estimates = try_join_all(byte_counts.iter().map(|&byte_count| async move {
        let price = estimator.base_winston_price_for_byte_count(byte_count).await?;
        Ok::<_, EstimateError>(DataPriceSample::new(byte_count, price))
    }))
    .await;
    progress.finish_and_clear();
    let estimates = estimates.context("Failed to estimate storage price")?;

    let total_byte_count = ByteCount::new(
        estimates
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.byte_count.get())),
    );
    let total_winston_price = estimates
        .iter()
        .fold(Winston::ZERO, |acc, e| acc.saturating_add(e.winston_price));

    if output.json {
        return output.print_json(&PriceReport {
            strategy: strategy.to_string(),
            estimates,
            total_byte_count,
            total_winston_price,
        });
    }

    println!("{:<16} {:>12} {:>20} {:>22}", "BYTES", "SIZE", "WINSTON", "AR");
    println!("{}", "-".repeat(73));
    for estimate in &estimates {
        println!(
            "{:<16} {:>12} {:>20} {:>22}",
            estimate.byte_count,
            format_bytes(estimate.byte_count),
            estimate.winston_price,
            format_ar(estimate.winston_price),
        );
    }
    if estimates.len() > 1 {
        println!("{}", "-".repeat(73));
        println!(
            "{:<16} {:>12} {:>20} {:>22}",
            total_byte_count,
            format_bytes(total_byte_count),
            total_winston_price,
            format_ar(total_winston_price),
        );
    }
    println!("\nStrategy: {strategy}");
    Ok(())
}
