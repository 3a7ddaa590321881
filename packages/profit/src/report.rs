//! Project profitability report combining the calculation, badge and
//! display strings the dashboard needs in one value.

use roofdesk_profit_models::{Actuals, ProfitCalculation, ProfitInputs, StatusBadge};
use serde::{Deserialize, Serialize};

use crate::{compute, format_currency, format_percent, status_badge};

/// Pre-formatted figures for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedFigures {
    /// Contract value, e.g. `"$50,000"`.
    pub contract_value: String,
    /// Estimated gross profit.
    pub est_gp: String,
    /// Actual gross profit.
    pub act_gp: String,
    /// Estimated margin, e.g. `"40.0%"`.
    pub est_margin: String,
    /// Actual margin.
    pub act_margin: String,
    /// Total cost variance.
    pub total_variance: String,
}

/// Everything shown on a project's profitability card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    /// Project the report belongs to.
    pub project_id: String,
    /// Raw figures.
    pub calculation: ProfitCalculation,
    /// Health badge derived from the margin delta.
    pub badge: StatusBadge,
    /// Target margin the project was sold at.
    pub target_margin_pct: f64,
    /// Whether the actual margin reaches the target margin.
    pub meets_target: bool,
    /// Display strings.
    pub formatted: FormattedFigures,
}

/// Builds the full report for a project.
#[must_use]
pub fn build_report(inputs: &ProfitInputs, actuals: &Actuals) -> ProfitReport {
    let calculation = compute(inputs, actuals);
    let badge = status_badge(calculation.variance.margin_pct_delta);

    let formatted = FormattedFigures {
        contract_value: format_currency(inputs.contract_value),
        est_gp: format_currency(calculation.est_gp),
        act_gp: format_currency(calculation.act_gp),
        est_margin: format_percent(calculation.est_margin),
        act_margin: format_percent(calculation.act_margin),
        total_variance: format_currency(calculation.variance.total),
    };

    log::debug!(
        "Profit report for {}: {} ({} vs {})",
        inputs.project_id,
        badge.label,
        formatted.act_margin,
        formatted.est_margin
    );

    ProfitReport {
        project_id: inputs.project_id.clone(),
        calculation,
        badge,
        target_margin_pct: inputs.target_margin_pct,
        meets_target: calculation.act_margin >= inputs.target_margin_pct,
        formatted,
    }
}
