//! Signal listing command implementation.

use ronda::signals::{
    PERIOD_WEIGHTS,
    registry::{SignalCategory, SignalInfo, signals_by_category},
};
use std::fmt::Write;

const CATEGORIES: [(SignalCategory, &str); 3] = [
    (SignalCategory::Momentum, "Momentum"),
    (SignalCategory::Technical, "Technical"),
    (SignalCategory::Value, "Value"),
];

/// List available signals, optionally filtered by category.
pub(crate) fn list_signals(category: Option<&str>, verbose: bool) {
    println!("{}", render(category, verbose));
}

fn render(category: Option<&str>, verbose: bool) -> String {
    let mut out = String::new();

    for (cat, cat_name) in CATEGORIES {
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let cat_signals = signals_by_category(&cat);
        if cat_signals.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{cat_name}: {}", cat.description());
        let _ = writeln!(out, "{}", "-".repeat(60));
        for info in &cat_signals {
            render_signal(&mut out, info, verbose);
        }
        let _ = writeln!(out);
    }

    if verbose {
        let periods: Vec<String> = PERIOD_WEIGHTS
            .iter()
            .map(|p| format!("{}:{}", p.period, p.weight))
            .collect();
        let _ = writeln!(out, "Horizon weights (bars:weight): {}", periods.join(", "));
    } else {
        let _ = writeln!(out, "Use --verbose for detailed signal descriptions.");
    }

    out.trim_end().to_string()
}

fn render_signal(out: &mut String, info: &SignalInfo, verbose: bool) {
    if verbose {
        let _ = writeln!(
            out,
            "  {:22} - {} (lookback: {} bars, weight: {}{})",
            info.name,
            info.description,
            info.typical_lookback,
            info.composite_weight,
            if info.requires_fundamentals {
                ", needs EPS"
            } else {
                ""
            }
        );
    } else {
        let _ = writeln!(out, "  {}", info.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_signals() {
        let text = render(None, false);
        assert!(text.contains("relative_momentum"));
        assert!(text.contains("relative_strength"));
        assert!(text.contains("pe_volume_divergence"));
        assert!(text.ends_with("Use --verbose for detailed signal descriptions."));
    }

    #[test]
    fn test_category_filter() {
        let text = render(Some("value"), false);
        assert!(text.contains("pe_volume_divergence"));
        assert!(!text.contains("relative_momentum"));
    }

    #[test]
    fn test_verbose_details() {
        let text = render(None, true);
        assert!(text.contains("lookback: 200 bars, weight: 0.3"));
        assert!(text.contains("needs EPS"));
        assert!(text.contains("15:20, 20:12, 30:10, 50:12, 100:17, 200:29"));
    }
}
