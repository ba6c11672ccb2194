//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimator code stays clean and testable
//! - output changes are localized

use crate::domain::{EstimateResult, MaterialRecord, ProjectRequest, ProjectSpec, QualityTier};
use crate::error::AppError;
use crate::fit::TrainingSummary;
use crate::io::EstimateReport;
use crate::rules::QualityRates;

/// Rupee amount with Indian digit grouping and no decimals: `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{amount}");
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then groups of two: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Full estimate summary: inputs, totals, breakdown table, advice.
pub fn format_estimate(
    spec: &ProjectSpec,
    result: &EstimateResult,
    materials: &[&MaterialRecord],
) -> String {
    let mut out = String::new();

    out.push_str("=== buildcost - Construction Cost Estimate ===\n");
    out.push_str(&format!(
        "Project: {} | {:.0} sq ft | {} floor(s) | {}\n",
        spec.project_type, spec.area, spec.floors, spec.quality
    ));
    let names: Vec<&str> = materials.iter().map(|m| m.name.as_str()).collect();
    if names.is_empty() {
        out.push_str("Materials: (none found in catalog)\n");
    } else {
        out.push_str(&format!("Materials: {}\n", names.join(", ")));
    }

    push_result(&mut out, result, spec.area);
    out
}

/// A saved estimate report re-rendered. The request is shown as it was
/// received; its quality label is priced leniently.
pub fn format_report(report: &EstimateReport) -> String {
    let req = &report.request;
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} - Saved Estimate ({}) ===\n",
        report.tool,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "Project: {} | {:.0} sq ft | {} floor(s) | {}\n",
        req.project_type, req.area, req.floors, req.quality
    ));
    let ids: Vec<String> = req.selected_materials.iter().map(i64::to_string).collect();
    out.push_str(&format!("Material ids: {}\n", ids.join(", ")));

    let rates = QualityRates::for_label(&req.quality);
    let priced_as = QualityTier::from_label_or_standard(&req.quality);
    out.push_str(&format!(
        "Base rate: {} per sq ft ({} x {:.1}, {} tier)\n",
        format_inr(rates.per_sqft()),
        format_inr(rates.base_rate),
        rates.multiplier,
        priced_as
    ));

    push_result(&mut out, &report.result, req.area);
    out
}

/// Totals, breakdown table and advice shared by live and saved estimates.
fn push_result(out: &mut String, result: &EstimateResult, area: f64) {
    out.push('\n');
    out.push_str(&format!("Total estimate: {}\n", format_inr(result.total_cost)));
    out.push_str(&format!(
        "Range: {} - {}\n",
        format_inr(result.range_low),
        format_inr(result.range_high)
    ));
    out.push_str(&format!(
        "Per sq ft: {}\n",
        format_inr(result.total_cost / area)
    ));
    out.push_str(&format!(
        "(regression {} | breakdown {})\n",
        format_inr(result.regression_estimate),
        format_inr(result.breakdown_total)
    ));

    out.push_str("\nBreakdown:\n");
    out.push_str(&format!("{:<14} {:>16} {:>7}\n", "category", "amount", "share"));
    out.push_str(&format!("{:-<14} {:-<16} {:-<7}\n", "", "", ""));
    let total = result.breakdown_total;
    for (name, value) in result.breakdown.entries() {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "{:<14} {:>16} {:>6.1}%\n",
            name,
            format_inr(value),
            share
        ));
    }

    out.push_str("\nRecommendations:\n");
    for rec in &result.recommendations {
        out.push_str(&format!("- {rec}\n"));
    }
}

/// One line describing the most recent training run.
pub fn format_training(summary: &TrainingSummary) -> String {
    format!(
        "Model trained on {} samples ({} historical, {} synthetic), rmse {}",
        summary.report.samples,
        summary.historical,
        summary.synthetic,
        format_inr(summary.report.rmse)
    )
}

/// Catalog listing.
pub fn format_materials<'a>(materials: impl IntoIterator<Item = &'a MaterialRecord>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:<28} {:<20} {:<10} {:>12}\n",
        "id", "name", "category", "unit", "price"
    ));
    out.push_str(&format!(
        "{:->4} {:-<28} {:-<20} {:-<10} {:->12}\n",
        "", "", "", "", ""
    ));

    let mut count = 0usize;
    for m in materials {
        count += 1;
        out.push_str(
            format!(
                "{:>4} {:<28} {:<20} {:<10} {:>12}\n",
                m.id,
                truncate(&m.name, 28),
                truncate(m.category.as_str(), 20),
                truncate(&m.unit, 10),
                format_price(m.unit_price),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out.push_str(&format!("{count} material(s)\n"));
    out
}

/// Detail view of a single catalog entry.
pub fn format_material(m: &MaterialRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{} {}\n", m.id, m.name));
    out.push_str(&format!("Category: {}\n", m.category));
    out.push_str(&format!("Price: {} per {}\n", format_price(m.unit_price), m.unit));
    if let Some(image) = &m.image {
        out.push_str(&format!("Image: {image}\n"));
    }
    out
}

/// Batch results table, one row per request in input order.
pub fn format_batch(rows: &[(ProjectRequest, Result<EstimateResult, AppError>)]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} {:<12} {:>8} {:>6} {:<9} {:>16}\n",
        "#", "type", "sq ft", "floors", "quality", "total"
    ));
    out.push_str(&format!(
        "{:->3} {:-<12} {:->8} {:->6} {:-<9} {:->16}\n",
        "", "", "", "", "", ""
    ));

    for (i, (req, result)) in rows.iter().enumerate() {
        let outcome = match result {
            Ok(r) => format!("{:>16}", format_inr(r.total_cost)),
            Err(e) => format!("error: {e}"),
        };
        out.push_str(
            format!(
                "{:>3} {:<12} {:>8.0} {:>6} {:<9} {}\n",
                i + 1,
                truncate(&req.project_type, 12),
                req.area,
                req.floors,
                truncate(&req.quality, 9),
                outcome,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    let failed = rows.iter().filter(|(_, r)| r.is_err()).count();
    out.push_str(&format!("{} estimated, {failed} failed\n", rows.len() - failed));
    out
}

/// Unit prices can be fractional (e.g. per-brick prices), so keep paise.
/// Rounds to whole paise first so `8.996` carries into `₹9`.
fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format_inr(price);
    }
    let total_paise = (price.abs() * 100.0).round();
    let rupees = (total_paise / 100.0).floor();
    let paise = total_paise - rupees * 100.0;
    let sign = if price < 0.0 && total_paise > 0.0 { "-" } else { "" };
    let amount = format_inr(rupees);
    if paise > 0.0 {
        format!("{sign}{amount}.{paise:02.0}")
    } else {
        format!("{sign}{amount}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{CostBreakdown, ProjectType, QualityTier};

    #[test]
    fn groups_digits_the_indian_way() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(1_234_567.0), "₹12,34,567");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789");
    }

    #[test]
    fn rounds_and_keeps_sign() {
        assert_eq!(format_inr(1_519_999.6), "₹15,20,000");
        assert_eq!(format_inr(-25_000.0), "-₹25,000");
    }

    #[test]
    fn fractional_prices_keep_paise() {
        assert_eq!(format_price(8.5), "₹8.50");
        assert_eq!(format_price(450.0), "₹450");
        assert_eq!(format_price(1234.567), "₹1,234.57");
        assert_eq!(format_price(0.05), "₹0.05");
    }

    #[test]
    fn prices_round_to_paise_before_splitting() {
        assert_eq!(format_price(8.996), "₹9");
        assert_eq!(format_price(12.999), "₹13");
        assert_eq!(format_price(-2.5), "-₹2.50");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Vitrified Tiles", 8), "Vitrifi.");
        assert_eq!(truncate("Tile", 8), "Tile");
    }

    #[test]
    fn estimate_summary_lists_every_category_and_tip() {
        let spec = ProjectSpec {
            project_type: ProjectType::Residential,
            area: 1000.0,
            floors: 1,
            quality: QualityTier::Standard,
            selected_materials: vec![1],
        };
        let breakdown = CostBreakdown {
            labor: 300_000.0,
            structure: 420_000.0,
            ..CostBreakdown::default()
        };
        let result = EstimateResult {
            total_cost: 720_000.0,
            range_low: 648_000.0,
            range_high: 792_000.0,
            breakdown,
            recommendations: vec!["Get multiple contractor quotes before finalizing".to_string()],
            regression_estimate: 500_000.0,
            breakdown_total: 720_000.0,
        };

        let text = format_estimate(&spec, &result, &[]);
        assert!(text.contains("Total estimate: ₹7,20,000"));
        assert!(text.contains("Range: ₹6,48,000 - ₹7,92,000"));
        for name in CostBreakdown::CATEGORIES {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("- Get multiple contractor quotes"));
    }

    fn saved_report(quality: &str) -> EstimateReport {
        let request = ProjectRequest {
            project_type: "residential".to_string(),
            area: 1000.0,
            floors: 1,
            quality: quality.to_string(),
            selected_materials: vec![1, 4],
        };
        let result = EstimateResult {
            total_cost: 1_500_000.0,
            range_low: 1_350_000.0,
            range_high: 1_650_000.0,
            breakdown: CostBreakdown::default(),
            recommendations: vec!["Include 5-10% contingency for unexpected costs".to_string()],
            regression_estimate: 1_500_000.0,
            breakdown_total: 1_380_000.0,
        };
        EstimateReport::new(request, result)
    }

    #[test]
    fn saved_report_shows_tier_rate() {
        let text = format_report(&saved_report("premium"));
        assert!(text.contains("Project: residential | 1000 sq ft | 1 floor(s) | premium"));
        assert!(text.contains("Material ids: 1, 4"));
        assert!(text.contains("Base rate: ₹2,520 per sq ft (₹1,800 x 1.4, premium tier)"));
        assert!(text.contains("Total estimate: ₹15,00,000"));
        assert!(text.contains("Per sq ft: ₹1,500"));
    }

    #[test]
    fn saved_report_with_unknown_tier_prices_as_standard() {
        let text = format_report(&saved_report("gold"));
        assert!(text.contains("| gold\n"));
        assert!(text.contains("Base rate: ₹1,200 per sq ft (₹1,200 x 1.0, standard tier)"));
    }

    #[test]
    fn batch_table_counts_failures() {
        let req = ProjectRequest {
            project_type: "residential".to_string(),
            area: 50.0,
            floors: 1,
            quality: "basic".to_string(),
            selected_materials: vec![1],
        };
        let rows = vec![(req, Err(AppError::validation("Please enter area between 100-10000 sq ft")))];
        let text = format_batch(&rows);
        assert!(text.contains("error: Please enter area"));
        assert!(text.ends_with("0 estimated, 1 failed\n"));
    }
}
