//! Display utilities and output formatting for the arprice CLI.

use arprice_lib::prelude::*;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Estimation strategy selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Pick based on the number of files and whether a folder is involved.
    Auto,
    /// Query the oracle for every estimate.
    OracleDirect,
    /// Answer from a regression of sampled prices.
    Regression,
}

impl StrategyArg {
    /// Resolves the strategy for an upload of `file_count` files.
    pub(crate) const fn resolve(self, file_count: usize, includes_folder: bool) -> EstimatorStrategy {
        match self {
            Self::Auto => EstimatorStrategy::for_upload(file_count, includes_folder),
            Self::OracleDirect => EstimatorStrategy::OracleDirect,
            Self::Regression => EstimatorStrategy::Regression,
        }
    }
}

/// How results are written.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Output {
    /// Print JSON instead of tables.
    pub(crate) json: bool,
    /// Suppress progress output.
    pub(crate) quiet: bool,
}

impl Output {
    /// Creates a spinner shown while waiting on the oracle.
    pub(crate) fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || self.json {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .expect("Invalid progress template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints a value as pretty JSON.
    pub(crate) fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Formats bytes in human-readable form (e.g., "1.50 GiB", "250 B").
pub(crate) fn format_bytes(bytes: ByteCount) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;
    const TIB: u64 = 1024 * GIB;

    let bytes = bytes.get();
    if bytes >= TIB {
        format!("{:.2} TiB", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.2} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Formats a Winston amount in AR (e.g., "0.000512 AR").
pub(crate) fn format_ar(winston: Winston) -> String {
    format!("{} AR", Ar::from_winston(winston))
}
