//! ASCII bar chart of a cost breakdown for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Bars are scaled to the largest category; empty categories are omitted.

use crate::domain::CostBreakdown;
use crate::report::format_inr;

const LABEL_WIDTH: usize = 14;

/// Render one horizontal bar per non-zero category.
pub fn render_breakdown_bars(breakdown: &CostBreakdown, width: usize) -> String {
    let width = width.max(10);
    let total = breakdown.total();
    let rows: Vec<(&str, f64)> = breakdown
        .entries()
        .into_iter()
        .filter(|(_, v)| v.is_finite() && *v > 0.0)
        .collect();
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Plot: breakdown total={}\n", format_inr(total)));

    for (name, value) in rows {
        let len = bar_len(value, max, width);
        let bar = "#".repeat(len);
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "{name:<label$} |{bar:<width$}| {share:>5.1}%\n",
            label = LABEL_WIDTH
        ));
    }

    out
}

/// Any non-zero value gets at least one mark.
fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    let u = (value / max).clamp(0.0, 1.0);
    ((u * width as f64).round() as usize).max(1)
}
