//! Intrinsic CLI binary.
//!
//! Provides command-line interface for the intrinsic valuation pipeline.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use intrinsic_traits::config::{DEFAULT_DISCOUNT_RATE, DEFAULT_TERMINAL_GROWTH_RATE};
use std::{env, process};

#[derive(Parser)]
#[command(name = "intrinsic")]
#[command(about = "Value-investing valuation for listed equities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value up to six tickers and print a ranked report
    Value {
        /// Ticker symbol(s), comma- or space-separated
        #[arg(required = true, value_delimiter = ',')]
        tickers: Vec<String>,

        /// Discount rate, between 0.01 and 0.20
        #[arg(short = 'r', long, default_value_t = DEFAULT_DISCOUNT_RATE)]
        discount_rate: f64,

        /// Terminal growth rate after year 10, between 0.00 and 0.05
        #[arg(short = 'g', long, default_value_t = DEFAULT_TERMINAL_GROWTH_RATE)]
        terminal_growth: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Per-request HTTP timeout in seconds
        #[arg(long, default_value = "15")]
        timeout_secs: u64,
    },

    /// Explain how to read the report
    Guide,
}

/// Output format for the `value` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable report
    Text,
    /// JSON array of result rows
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Value {
            tickers,
            discount_rate,
            terminal_growth,
            format,
            timeout_secs,
        } => {
            cmd::value::value_tickers(
                &tickers,
                discount_rate,
                terminal_growth,
                format,
                timeout_secs,
            )
            .await?;
        }
        Commands::Guide => cmd::guide::print_guide(),
    }

    Ok(())
}
