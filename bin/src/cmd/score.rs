//! Score command implementation.

use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::{
    Absence, Contribution, FundamentalsProvider, FundamentalsSnapshot, PriceSeries, PriceSeriesStore,
    RankingConfig, ScoringContext, ScoringOrchestrator, Symbol,
    signals::value::{CurveBranch, PeVolumeBreakdown},
};
use serde::Serialize;
use std::fmt::Write;

/// Per-signal view of one symbol.
#[derive(Debug, Serialize)]
struct SymbolReport {
    symbol: Symbol,
    bars: usize,
    eps: Option<f64>,
    momentum: f64,
    oscillator: f64,
    valuation: ValuationReport,
    total: f64,
}

/// How the valuation signal was evaluated.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ValuationReport {
    Evaluated(PeVolumeBreakdown),
    Unavailable { reason: Absence },
}

/// Show the signal breakdown for the given symbols.
pub(crate) async fn show_scores(
    symbols: &[String],
    config: RankingConfig,
    format: OutputFormat,
    timeout_secs: u64,
) -> Result<()> {
    let symbols = data::parse_symbols(&symbols.join(","));
    let client = data::client(timeout_secs)?;
    let loaded = data::load(&client, &symbols, &config.benchmark).await?;

    let orchestrator = ScoringOrchestrator::new(config);
    let reports = build_reports(&orchestrator, &symbols, &loaded.store, &loaded.fundamentals);

    let output = match format {
        OutputFormat::Text => render_text(&reports, &orchestrator.config().benchmark),
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
    };
    println!("{output}");

    Ok(())
}

fn build_reports(
    orchestrator: &ScoringOrchestrator,
    symbols: &[Symbol],
    store: &PriceSeriesStore,
    fundamentals: &FundamentalsSnapshot,
) -> Vec<SymbolReport> {
    let ctx = ScoringContext::new(store, &orchestrator.config().benchmark, fundamentals);

    symbols
        .iter()
        .map(|symbol| {
            let score = orchestrator.score_symbol(symbol, &ctx);
            let valuation = match orchestrator.valuation().breakdown(symbol, store, fundamentals) {
                Ok(breakdown) => ValuationReport::Evaluated(breakdown),
                Err(reason) => ValuationReport::Unavailable { reason },
            };

            SymbolReport {
                symbol: symbol.clone(),
                bars: store.get(symbol).map_or(0, PriceSeries::len),
                eps: fundamentals.trailing_eps(symbol).ok().flatten(),
                momentum: score.momentum,
                oscillator: score.oscillator,
                valuation,
                total: score.total,
            }
        })
        .collect()
}

fn branch_label(branch: CurveBranch) -> &'static str {
    match branch {
        CurveBranch::Ratio => "ratio",
        CurveBranch::RisingPeFallingVolume => "P/E up, volume down",
        CurveBranch::FallingPeRisingVolume => "P/E down, volume up",
        CurveBranch::Unhandled => "unhandled",
    }
}

fn render_text(reports: &[SymbolReport], benchmark: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Benchmark: {benchmark}");

    for report in reports {
        let eps = report
            .eps
            .map_or_else(|| "n/a".to_string(), |eps| format!("{eps:.2}"));
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({} bars, EPS {eps})", report.symbol, report.bars);
        let _ = writeln!(out, "  {:<12} {:>10.4}", "momentum", report.momentum);
        let _ = writeln!(out, "  {:<12} {:>10.4}", "oscillator", report.oscillator);

        match &report.valuation {
            ValuationReport::Evaluated(breakdown) => {
                let value = breakdown
                    .contribution
                    .value()
                    .map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
                let _ = writeln!(out, "  {:<12} {value:>10}", "valuation");
                let _ = writeln!(
                    out,
                    "    P/E {:+.2}%, volume {:+.2}%, ratio {:.4}, {}",
                    breakdown.pe_rate,
                    breakdown.volume_rate,
                    breakdown.comparison,
                    branch_label(breakdown.branch)
                );
                if let Contribution::Absent(reason) = breakdown.contribution {
                    let _ = writeln!(out, "    no contribution: {}", reason.description());
                }
            }
            ValuationReport::Unavailable { reason } => {
                let _ = writeln!(out, "  {:<12} {:>10}", "valuation", "-");
                let _ = writeln!(out, "    no contribution: {}", reason.description());
            }
        }

        let _ = writeln!(out, "  {:<12} {:>10.4}", "total", report.total);
    }

    out.trim_end().to_string()
}
