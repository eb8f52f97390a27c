// In app/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use api_client::{FileProvider, PriceSeriesProvider};
use app_config::Settings;
use clap::{Parser, Subcommand};
use strategies::{MACrossover, MACrossoverSettings};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Moving-average crossover signals for a daily price series.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Overrides the short window length (days).
    #[arg(long, global = true)]
    short: Option<usize>,

    /// Overrides the long window length (days).
    #[arg(long, global = true)]
    long: Option<usize>,

    /// Lists this many of the most recent EMA values per window.
    #[arg(long, global = true, default_value_t = 0)]
    trajectory: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetches daily closes from Alpha Vantage and evaluates both crossovers.
    Run {
        /// The asset to evaluate (e.g., "SOL"). Defaults to the configured symbol.
        #[arg(short, long)]
        symbol: Option<String>,

        /// The quote market (e.g., "USD"). Defaults to the configured market.
        #[arg(short, long)]
        market: Option<String>,
    },

    /// Evaluates both crossovers over a saved Alpha Vantage response.
    Analyze {
        /// Path to a `DIGITAL_CURRENCY_DAILY` JSON response body.
        #[arg(short, long)]
        file: PathBuf,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings()?;

    // `RUST_LOG` wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.app.log_level))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();

    tracing::info!(environment = %settings.app.environment, "Starting crossover");

    let strategy_settings = apply_overrides(settings.strategy.clone(), cli.short, cli.long);

    match cli.command {
        Commands::Run { symbol, market } => {
            handle_run(&settings, symbol, market, strategy_settings, cli.trajectory).await?;
        }
        Commands::Analyze { file } => {
            let provider = FileProvider::new(file);
            evaluate(&provider, strategy_settings, cli.trajectory).await?;
        }
    }

    Ok(())
}

fn apply_overrides(mut settings: MACrossoverSettings, short: Option<usize>, long: Option<usize>) -> MACrossoverSettings {
    if let Some(short) = short {
        settings.short_period = short;
    }
    if let Some(long) = long {
        settings.long_period = long;
    }
    settings
}

// --- "Run" Subcommand Logic ---

async fn handle_run(
    settings: &Settings,
    symbol: Option<String>,
    market: Option<String>,
    strategy_settings: MACrossoverSettings,
    trajectory: usize,
) -> Result<()> {
    let Some(mut provider_settings) = settings.provider.clone() else {
        anyhow::bail!("No [provider] section configured. Add one to config/base.toml or set APP__PROVIDER__SYMBOL and APP__PROVIDER__API_KEY.");
    };
    if let Some(symbol) = symbol {
        provider_settings.symbol = symbol;
    }
    if let Some(market) = market {
        provider_settings.market = market;
    }
    if provider_settings.api_key.trim().is_empty() {
        anyhow::bail!("No Alpha Vantage API key configured. Set APP__PROVIDER__API_KEY or provider.api_key.");
    }

    let client = api_client::new(&provider_settings)?;
    evaluate(&client, strategy_settings, trajectory).await
}

/// Fetches one series, runs both crossover families over it and prints the result.
async fn evaluate(
    provider: &(dyn PriceSeriesProvider + Send + Sync),
    strategy_settings: MACrossoverSettings,
    trajectory: usize,
) -> Result<()> {
    let crossover = MACrossover::new(strategy_settings)?;

    let series = provider.fetch().await?;
    tracing::info!(provider = provider.name(), prices = series.len(), "Price series loaded.");

    let report = crossover.assess(&series);

    if let Ok(sma) = &report.sma {
        if !sma.skipped.is_empty() {
            tracing::warn!(
                indices = ?sma.skipped,
                "Skipped non-numeric prices inside the SMA windows; the averages are biased low."
            );
        }
    }
    for (family, result) in [("SMA", &report.sma), ("EMA", &report.ema)] {
        if let Err(e) = result {
            tracing::warn!(family, error = %e, "Crossover could not be evaluated.");
        }
    }

    print!("{}", report::render(&report, crossover.settings(), trajectory));

    if report.sma.is_err() && report.ema.is_err() {
        anyhow::bail!("Neither crossover could be evaluated for this price series.");
    }
    Ok(())
}
