//! arprice CLI - Arweave storage price and capacity estimator.

use anyhow::Result;
use arprice_lib::prelude::*;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::StrategyArg;

#[derive(Parser)]
#[command(name = "arprice")]
#[command(about = "Arweave storage price and capacity estimator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    oracle: OracleArgs,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// Pricing oracle settings shared by every command.
#[derive(Args)]
struct OracleArgs {
    /// Gateway serving price quotes
    #[arg(long, global = true, default_value = arprice_lib::url::DEFAULT_GATEWAY)]
    gateway: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Maximum retries per price quote
    #[arg(long, global = true, default_value = "3")]
    max_retries: u32,
}

impl OracleArgs {
    fn config(&self) -> OracleConfig {
        OracleConfig {
            gateway_url: self.gateway.clone(),
            timeout: Duration::from_secs(self.timeout),
            max_retries: self.max_retries,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the price of storing one or more files
    Price {
        /// File sizes in bytes
        #[arg(required = true)]
        byte_counts: Vec<ByteCount>,

        /// Estimation strategy (auto picks regression for bulk or folder uploads)
        #[arg(short, long, value_enum, default_value = "auto")]
        strategy: StrategyArg,

        /// Treat the upload as a folder
        #[arg(long)]
        folder: bool,

        /// Byte volumes sampled for the regression (comma separated)
        #[arg(long, value_delimiter = ',')]
        sample_volumes: Option<Vec<ByteCount>>,
    },

    /// Estimate how many bytes a budget buys
    Capacity {
        /// Budget in Winston (no community tip deducted)
        #[arg(long, conflicts_with = "ar", required_unless_present = "ar")]
        winston: Option<Winston>,

        /// Budget in AR (community tip deducted)
        #[arg(long)]
        ar: Option<Ar>,

        /// Community tip percentage
        #[arg(long, default_value = "15")]
        tip_percentage: f64,

        /// Minimum community tip in Winston
        #[arg(long, default_value = "10000000")]
        min_tip: Winston,

        /// Estimation strategy
        #[arg(short, long, value_enum, default_value = "oracle-direct")]
        strategy: StrategyArg,

        /// Byte volumes sampled for the regression (comma separated)
        #[arg(long, value_delimiter = ',')]
        sample_volumes: Option<Vec<ByteCount>>,
    },

    /// Fetch price samples and show the fitted regression
    Samples {
        /// Byte volumes to sample (comma separated)
        #[arg(long, value_delimiter = ',')]
        sample_volumes: Option<Vec<ByteCount>>,
    },
}

/// Installs the tracing subscriber; `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let output = display::Output {
        json: cli.json,
        quiet: cli.quiet,
    };
    let oracle_config = cli.oracle.config();

    match command {
        Commands::Price {
            byte_counts,
            strategy,
            folder,
            sample_volumes,
        } => {
            commands::price::price(
                &byte_counts,
                strategy,
                folder,
                sample_volumes,
                oracle_config,
                output,
            )
            .await
        }
        Commands::Capacity {
            winston,
            ar,
            tip_percentage,
            min_tip,
            strategy,
            sample_volumes,
        } => {
            let budget = match (winston, ar) {
                (Some(winston), _) => commands::capacity::Budget::Winston(winston),
                (None, Some(ar)) => commands::capacity::Budget::Ar {
                    ar,
                    tip: CommunityTip::new(tip_percentage, min_tip)?,
                },
                (None, None) => anyhow::bail!("Either --winston or --ar is required"),
            };
            commands::capacity::capacity(budget, strategy, sample_volumes, oracle_config, output)
                .await
        }
        Commands::Samples { sample_volumes } => {
            commands::samples::samples(sample_volumes, oracle_config, output).await
        }
    }
}
