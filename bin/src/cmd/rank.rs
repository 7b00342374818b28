//! Rank command implementation.

use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::{RankedSymbol, Ranking, RankingConfig, ScoringOrchestrator};
use serde::Serialize;
use tracing::{info, warn};

/// JSON form of a ranking.
#[derive(Debug, Serialize)]
struct RankReport<'a> {
    benchmark: &'a str,
    scored: usize,
    ranking: &'a [RankedSymbol],
}

/// Rank the universe named by `universe` and print the top symbols.
pub(crate) async fn rank_universe(
    universe: &str,
    config: RankingConfig,
    format: OutputFormat,
    timeout_secs: u64,
) -> Result<()> {
    let client = data::client(timeout_secs)?;

    let symbols: Vec<String> = data::UniverseSource::parse(universe)
        .resolve(&client)
        .await?
        .into_iter()
        .filter(|symbol| symbol != &config.benchmark)
        .collect();

    if symbols.is_empty() {
        warn!(%universe, "universe is empty");
    }
    info!(symbols = symbols.len(), benchmark = %config.benchmark, "universe resolved");

    let loaded = data::load(&client, &symbols, &config.benchmark).await?;

    let orchestrator = ScoringOrchestrator::new(config);
    let ranking = orchestrator.rank(&symbols, &loaded.store, &loaded.fundamentals);

    let output = match format {
        OutputFormat::Text => render_text(ranking.entries()),
        OutputFormat::Json => render_json(&ranking, &orchestrator.config().benchmark)?,
    };
    println!("{output}");

    Ok(())
}

/// One `rank. symbol` line per entry.
fn render_text(entries: &[RankedSymbol]) -> String {
    entries
        .iter()
        .map(|entry| format!("{:>2}. {}", entry.rank, entry.symbol))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(ranking: &Ranking, benchmark: &str) -> Result<String> {
    let report = RankReport {
        benchmark,
        scored: ranking.scored(),
        ranking: ranking.entries(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
