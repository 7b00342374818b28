//! Ranking settings from a TOML file and command-line overrides.

use anyhow::{Context, Result};
use ronda::RankingConfig;
use ronda_fmp::normalize_symbol;
use std::{fs, path::Path};

/// Load settings from `path`, or the defaults when no file is given.
pub(crate) fn load(path: Option<&Path>) -> Result<RankingConfig> {
    let Some(path) = path else {
        return Ok(RankingConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Parse TOML settings. Missing keys keep their defaults.
pub(crate) fn parse(text: &str) -> Result<RankingConfig> {
    Ok(toml::from_str(text)?)
}

/// Load settings and apply flag overrides on top.
pub(crate) fn resolve(
    path: Option<&Path>,
    benchmark: Option<String>,
    top: Option<usize>,
) -> Result<RankingConfig> {
    let mut config = load(path)?;
    if let Some(benchmark) = benchmark {
        config.benchmark = benchmark;
    }
    if let Some(top) = top {
        config.top_n = top;
    }
    config.benchmark = normalize_symbol(&config.benchmark).to_uppercase();
    Ok(config)
}
