#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Profitability and variance engine for contractor projects.
//!
//! Turns an estimate snapshot ([`ProfitInputs`]) and an actual-cost
//! snapshot ([`Actuals`]) into gross profit, margin and variance figures,
//! and classifies the margin slip into a [`StatusBadge`].
//!
//! Everything here is plain arithmetic. The only guard is against a zero
//! contract value; negative or non-finite inputs flow straight through so
//! the data-entry layer stays the single place that validates.

pub mod format;
pub mod report;

pub use format::{format_currency, format_percent};
pub use report::{FormattedFigures, ProfitReport, build_report};

use roofdesk_profit_models::{
    Actuals, ProfitCalculation, ProfitInputs, StatusBadge, StatusLabel, Tone, Variance,
};

/// Margin delta (percentage points) at or below which a project is over budget.
pub const OVER_BUDGET_DELTA: f64 = -5.0;

/// Margin delta (percentage points) at or below which a project is at risk.
pub const AT_RISK_DELTA: f64 = -2.0;

/// Gross profit over contract value, or `0` when there is no contract value.
#[allow(clippy::float_cmp)]
fn margin(gross_profit: f64, contract_value: f64) -> f64 {
    if contract_value == 0.0 {
        0.0
    } else {
        gross_profit / contract_value
    }
}

/// Computes estimated and actual profitability for a project.
#[must_use]
pub fn compute(inputs: &ProfitInputs, actuals: &Actuals) -> ProfitCalculation {
    let est = &inputs.est;
    let contract_value = inputs.contract_value;

    let est_total = est.labor_cost + est.materials_cost + est.overhead_cost;
    let est_gp = contract_value - est_total;
    let est_margin = margin(est_gp, contract_value);

    let act_labor = actuals.labor.cost + actuals.labor.burden_cost.unwrap_or(0.0);
    let act_total = act_labor + actuals.materials.cost + actuals.overhead.cost;
    let act_gp = contract_value - act_total;
    let act_margin = margin(act_gp, contract_value);

    let variance = Variance {
        labor: act_labor - est.labor_cost,
        materials: actuals.materials.cost - est.materials_cost,
        overhead: actuals.overhead.cost - est.overhead_cost,
        total: act_total - est_total,
        margin_pct_delta: (act_margin - est_margin) * 100.0,
    };

    log::trace!(
        "project {}: est_margin={est_margin:.4} act_margin={act_margin:.4} delta={:.2}pp",
        inputs.project_id,
        variance.margin_pct_delta
    );

    ProfitCalculation {
        est_total,
        est_gp,
        est_margin,
        act_labor,
        act_total,
        act_gp,
        act_margin,
        variance,
    }
}

/// Classifies a margin delta (percentage points) into a status badge.
///
/// Boundaries belong to the worse bucket: exactly `-5` is over budget and
/// exactly `-2` is at risk.
#[must_use]
pub fn status_badge(margin_pct_delta: f64) -> StatusBadge {
    if margin_pct_delta <= OVER_BUDGET_DELTA {
        StatusBadge {
            label: StatusLabel::OverBudget,
            tone: Tone::Destructive,
        }
    } else if margin_pct_delta <= AT_RISK_DELTA {
        StatusBadge {
            label: StatusLabel::AtRisk,
            tone: Tone::Warning,
        }
    } else {
        StatusBadge {
            label: StatusLabel::OnTrack,
            tone: Tone::Success,
        }
    }
}
