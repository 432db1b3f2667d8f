//! indexfolio command line.
//!
//! Each subcommand reads a JSON file, runs one engine operation and prints
//! the result as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexfolio::application::portfolio::{
    PortfolioDraft, WeightAggregator, allocate, cluster_by_weight, set_weight,
    summarize_allocation,
};
use indexfolio::application::signals::{IndicatorAnalyzer, SignalAggregator, SignalBoard};
use indexfolio::config::Config;
use indexfolio::domain::market::Candle;
use indexfolio::domain::portfolio::PortfolioEntry;
use indexfolio::infrastructure::ingest::{
    parse_contributions, parse_index_securities, parse_portfolio_entries, parse_price_quotes,
    parse_security_signals,
};
use indexfolio::infrastructure::observability::init_tracing;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "Index-based portfolio builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the constituents of several indices into one weight set
    Aggregate {
        /// JSON array of indices, each with its securities
        #[arg(short, long)]
        input: PathBuf,

        /// Minimum merged weight (percent); defaults to MIN_WEIGHT_THRESHOLD
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Override one security's weight and rescale the others
    EditWeight {
        /// JSON array of securities with weights summing to 100
        #[arg(short, long)]
        input: PathBuf,

        /// Security to change
        #[arg(short, long)]
        security: String,

        /// New weight in percent
        #[arg(short, long)]
        weight: f64,
    },
    /// Turn capital into whole-share purchases
    Allocate {
        /// JSON array of securities (weight, and price unless --prices is given)
        #[arg(short, long)]
        input: PathBuf,

        /// Capital to invest
        #[arg(short, long)]
        capital: Decimal,

        /// JSON map of security id to price lookup response
        #[arg(long)]
        prices: Option<PathBuf>,

        /// JSON map of security id to predicted price
        #[arg(long)]
        predictions: Option<PathBuf>,
    },
    /// Vote on indicator readings for many securities and group the results
    Signals {
        /// JSON array of {secid, weight, indicators}
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Compute indicator readings and a vote from a candle series
    Analyze {
        /// JSON array of candles, oldest first
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.observability)?;

    match cli.command {
        Commands::Aggregate { input, threshold } => {
            let contributions = parse_contributions(&read_input(&input)?)?;
            let aggregator = WeightAggregator::new(
                threshold.unwrap_or(config.aggregation.min_weight_threshold),
            );
            let outcome = aggregator.aggregate(&contributions)?;
            if outcome.is_degenerate() {
                warn!("Every security fell below the weight threshold");
            }
            let clusters = cluster_by_weight(&outcome.kept);
            print_json(&json!({
                "kept": outcome.kept,
                "excluded_count": outcome.excluded_count,
                "clusters": clusters,
            }))
        }
        Commands::EditWeight {
            input,
            security,
            weight,
        } => {
            let current = parse_index_securities(&read_input(&input)?)?;
            let updated = set_weight(&current, &security, weight)?;
            print_json(&updated)
        }
        Commands::Allocate {
            input,
            capital,
            prices,
            predictions,
        } => {
            let raw = read_input(&input)?;
            let (entries, missing) = match prices {
                Some(path) => draft_entries(&raw, &path)?,
                None => (parse_portfolio_entries(&raw)?, Vec::new()),
            };
            let predictions: HashMap<String, Decimal> = match predictions {
                Some(path) => serde_json::from_str(&read_input(&path)?)
                    .context("Failed to parse predictions")?,
                None => HashMap::new(),
            };

            let allocations = allocate(capital, &entries)?;
            let summary = summarize_allocation(capital, &allocations, &entries, &predictions)?;
            info!(
                "Allocated {} of {} across {} securities",
                summary.portfolio_value,
                capital,
                allocations.len()
            );
            print_json(&json!({
                "allocations": allocations,
                "summary": summary,
                "missing_prices": missing,
            }))
        }
        Commands::Signals { input } => {
            let securities = parse_security_signals(&read_input(&input)?)?;
            let aggregator = SignalAggregator::new(config.signals.to_policy());
            let board = SignalBoard::build(&aggregator, &securities);
            print_json(&board)
        }
        Commands::Analyze { input } => {
            let candles: Vec<Candle> =
                serde_json::from_str(&read_input(&input)?).context("Failed to parse candles")?;
            let analyzer = IndicatorAnalyzer::new(config.indicators.to_indicator_config())?;
            let bundle = analyzer.analyze(&candles)?;
            let vote = SignalAggregator::new(config.signals.to_policy()).summarize_bundle(&bundle);
            print_json(&json!({
                "indicators": bundle,
                "overall": bundle.signal_counts(),
                "vote": vote,
            }))
        }
    }
}

/// Selects every listed security, attaches quoted prices and returns the
/// eligible entries together with the ids still lacking a price.
fn draft_entries(raw: &str, prices: &Path) -> Result<(Vec<PortfolioEntry>, Vec<String>)> {
    let securities = parse_index_securities(raw)?;
    let quotes = parse_price_quotes(&read_input(prices)?)?;

    let mut draft = PortfolioDraft::new();
    for security in &securities {
        draft.toggle(&security.security_id, security.weight);
        match quotes.get(&security.security_id).and_then(|quote| quote.price()) {
            Some(price) => draft.record_price(&security.security_id, price),
            None => warn!("No usable price for {}", security.security_id),
        }
    }

    let missing = draft
        .missing_prices()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok((draft.entries()?, missing))
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
