//! Plain-text summaries for terminal output.

use std::fmt::Write as _;

use roofdesk_profit::{format_currency, format_percent, report::ProfitReport};
use roofdesk_roof_models::{RoofEstimate, RoofMeasurements};

const RULE_WIDTH: usize = 44;

fn rule(out: &mut String) {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH)).unwrap();
}

fn row(out: &mut String, label: &str, value: &str) {
    writeln!(out, "{label:<20} {value:>12}").unwrap();
}

#[must_use]
pub fn profit_report(report: &ProfitReport) -> String {
    let calc = &report.calculation;
    let fmt = &report.formatted;
    let mut out = String::new();

    writeln!(out, "Project {}  [{}]", report.project_id, report.badge.label).unwrap();
    rule(&mut out);
    writeln!(out, "{:<20} {:>12} {:>12}", "", "ESTIMATE", "ACTUAL").unwrap();
    for (label, estimated, actual) in [
        ("Contract value", fmt.contract_value.clone(), fmt.contract_value.clone()),
        ("Total cost", format_currency(calc.est_total), format_currency(calc.act_total)),
        ("Gross profit", fmt.est_gp.clone(), fmt.act_gp.clone()),
        ("Margin", fmt.est_margin.clone(), fmt.act_margin.clone()),
    ] {
        writeln!(out, "{label:<20} {estimated:>12} {actual:>12}").unwrap();
    }
    rule(&mut out);
    row(&mut out, "Labor variance", &format_currency(calc.variance.labor));
    row(&mut out, "Materials variance", &format_currency(calc.variance.materials));
    row(&mut out, "Overhead variance", &format_currency(calc.variance.overhead));
    row(&mut out, "Total variance", &fmt.total_variance);
    row(
        &mut out,
        "Margin delta",
        &format!("{:+.1}pt", calc.variance.margin_pct_delta),
    );
    writeln!(
        out,
        "Target margin {} {}",
        format_percent(report.target_margin_pct),
        if report.meets_target { "met" } else { "missed" }
    )
    .unwrap();

    out
}

#[must_use]
pub fn measurements(m: &RoofMeasurements) -> String {
    let mut out = String::new();
    let feet = &m.linear_feet;

    writeln!(
        out,
        "Pitch            {} ({:.1}°, factor {:.4})",
        m.pitch, m.pitch_angle_deg, m.pitch_factor
    )
    .unwrap();
    writeln!(
        out,
        "Plan area        {:.0} sq ft ({:.2} squares)",
        m.plan_area_sqft, m.plan_squares
    )
    .unwrap();
    writeln!(
        out,
        "Surface area     {:.0} sq ft ({:.2} squares)",
        m.surface_area_sqft, m.surface_squares
    )
    .unwrap();
    writeln!(out, "Perimeter        {:.1} ft", m.perimeter_ft).unwrap();
    writeln!(out, "Eave / rake      {:.1} ft / {:.1} ft", feet.eave, feet.rake).unwrap();
    if feet.ridge > 0.0 || feet.hip > 0.0 || feet.valley > 0.0 {
        writeln!(
            out,
            "Ridge/hip/valley {:.1} ft / {:.1} ft / {:.1} ft",
            feet.ridge, feet.hip, feet.valley
        )
        .unwrap();
    }
    writeln!(out, "Edges            {}", m.edges.len()).unwrap();

    out
}

#[must_use]
pub fn estimate(estimate: &RoofEstimate) -> String {
    let price = &estimate.price;
    let mut out = measurements(&estimate.measurements);

    rule(&mut out);
    row(&mut out, "Roofing", &format_currency(price.roofing));
    row(&mut out, "Labor", &format_currency(price.labor));
    row(&mut out, "Edge material", &format_currency(price.edges));
    for line in price.features.iter().filter(|line| line.count > 0) {
        row(
            &mut out,
            &format!("{} x{}", line.kind, line.count),
            &format_currency(line.total),
        );
    }
    row(&mut out, "Subtotal", &format_currency(price.subtotal));
    row(
        &mut out,
        &format!("Contingency {}", format_percent(price.contingency_pct)),
        &format_currency(price.contingency),
    );
    rule(&mut out);
    row(&mut out, "TOTAL", &format_currency(price.total));

    if let Some(confidence) = estimate.confidence {
        writeln!(out, "Analysis confidence {}", format_percent(confidence)).unwrap();
    }
    if let Some(notes) = &estimate.notes {
        writeln!(out, "Notes: {notes}").unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofdesk_roof::estimate::quote_roof;
    use roofdesk_roof::price_sheets::default_price_sheet;
    use roofdesk_profit_models::{Actuals, ProfitInputs};
    use roofdesk_roof_models::RoofFeatures;

    const SQUARE: &[[f64; 2]] = &[
        [0.0, 0.0],
        [0.001, 0.0],
        [0.001, 0.001],
        [0.0, 0.001],
        [0.0, 0.0],
    ];

    #[test]
    fn estimate_summary_lists_only_present_features() {
        let features = RoofFeatures {
            chimneys: 1,
            ..RoofFeatures::default()
        };
        let quote = quote_roof(SQUARE, "6/12", features, &default_price_sheet().pricing, 15.0);
        let text = estimate(&quote);

        assert!(text.contains("chimney x1"));
        assert!(!text.contains("vent x"));
        assert!(text.contains("TOTAL"));
        assert!(!text.contains("Analysis confidence"));
    }

    #[test]
    fn profit_summary_shows_badge_and_target() {
        let inputs: ProfitInputs = serde_json::from_str(
            r#"{"projectId":"p-1","contractValue":50000,
                "est":{"laborCost":15000,"materialsCost":10000,"overheadCost":5000}}"#,
        )
        .unwrap();
        let actuals: Actuals = serde_json::from_str(
            r#"{"period":{"start":"2025-06-01T00:00:00Z","end":"2025-06-30T00:00:00Z"},
                "labor":{"regHours":0,"otHours":0,"cost":18000,"burdenCost":2000},
                "materials":{"items":0,"cost":11000},"overhead":{"cost":5500}}"#,
        )
        .unwrap();

        let text = profit_report(&roofdesk_profit::build_report(&inputs, &actuals));

        assert!(text.contains("Project p-1  [Over Budget]"));
        assert!(text.contains("$6,500"));
        assert!(text.contains("-13.0pt"));
        assert!(text.contains("Target margin 20.0% met"));
    }

    #[test]
    fn flat_outline_hides_ridge_line() {
        let quote = quote_roof(
            SQUARE,
            "4/12",
            RoofFeatures::default(),
            &default_price_sheet().pricing,
            15.0,
        );
        let text = measurements(&quote.measurements);
        assert!(text.contains("Eave / rake"));
        assert!(!text.contains("Ridge/hip/valley"));
    }
}
