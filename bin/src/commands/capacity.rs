//! Capacity command implementation.
//!
//! Estimates how many bytes a Winston or AR budget buys.

use crate::display::{Output, StrategyArg, format_ar, format_bytes};
use anyhow::{Context, Result};
use arprice_lib::prelude::*;
use serde::Serialize;

/// A spending budget.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Budget {
    /// Winston budget, spent entirely on storage.
    Winston(Winston),
    /// AR budget, with the community tip deducted first.
    Ar {
        /// Amount to spend.
        ar: Ar,
        /// Tip deducted from the amount.
        tip: CommunityTip,
    },
}

/// JSON report for the capacity command.
#[derive(Serialize)]
struct CapacityReport {
    strategy: String,
    budget_winston: Winston,
    tip_winston: Winston,
    byte_count: ByteCount,
}

/// Estimate how many bytes a budget buys.
pub(crate) async fn capacity(
    budget: Budget,
    strategy: StrategyArg,
    sample_volumes: Option<Vec<ByteCount>>,
    oracle_config: OracleConfig,
    output: Output,
) -> Result<()> {
    let strategy = strategy.resolve(1, false);
    let estimator = super::estimator(strategy, sample_volumes, oracle_config)?;

    let progress = output.spinner(&format!("Estimating capacity via {strategy}"));
    let (budget_winston, tip_winston, result) = match budget {
        Budget::Winston(winston) => (
            winston,
            Winston::ZERO,
            estimator.byte_count_for_winston(winston).await,
        ),
        Budget::Ar { ar, tip } => (
            ar.to_winston(),
            tip.tip_for(ar.to_winston()),
            estimator.byte_count_for_ar(ar, &tip).await,
        ),
    };
    progress.finish_and_clear();
    let byte_count = result.context("Failed to estimate storage capacity")?;

    if output.json {
        return output.print_json(&CapacityReport {
            strategy: strategy.to_string(),
            budget_winston,
            tip_winston,
            byte_count,
        });
    }

    println!("Budget:    {} Winston ({})", budget_winston, format_ar(budget_winston));
    if tip_winston > Winston::ZERO {
        println!("Tip:       {} Winston ({})", tip_winston, format_ar(tip_winston));
    }
    println!("Capacity:  {} bytes ({})", byte_count, format_bytes(byte_count));
    println!("Strategy:  {strategy}");
    Ok(())
}
