//! Ronda CLI binary.
//!
//! Ranks a stock universe by a composite of relative momentum, relative
//! strength and P/E versus volume signals.

mod cmd;
mod config;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, process};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Multi-factor stock ranking", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging and detailed listings
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Plain numbered list
    #[default]
    Text,
    /// JSON with the composite breakdown
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a universe and print the top symbols
    Rank {
        /// Universe to rank: sample, sp500, or a comma-separated symbol list
        #[arg(short, long, default_value = "sample")]
        universe: String,

        /// Benchmark symbol (overrides the config file)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// Number of symbols to print (overrides the config file)
        #[arg(short, long)]
        top: Option<usize>,

        /// TOML file with ranking settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Show the per-signal breakdown for symbols
    Score {
        /// Ticker symbols
        #[arg(required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Benchmark symbol (overrides the config file)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// TOML file with ranking settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// List available signals
    Signals {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr so stdout carries only results.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rank {
            universe,
            benchmark,
            top,
            config,
            format,
            timeout_secs,
        } => {
            let config = config::resolve(config.as_deref(), benchmark, top)?;
            cmd::rank::rank_universe(&universe, config, format, timeout_secs).await?;
        }
        Commands::Score {
            symbols,
            benchmark,
            config,
            format,
            timeout_secs,
        } => {
            let config = config::resolve(config.as_deref(), benchmark, None)?;
            cmd::score::show_scores(&symbols, config, format, timeout_secs).await?;
        }
        Commands::Signals { category } => {
            cmd::signals::list_signals(category.as_deref(), cli.verbose);
        }
    }

    Ok(())
}
