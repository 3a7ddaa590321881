#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Estimate, actual-cost and profitability types for contractor projects.
//!
//! [`ProfitInputs`] and [`Actuals`] are assembled on demand from project,
//! proposal and timesheet records by the surrounding application. Every
//! field carries a `serde` default so the calculation layer only ever sees
//! complete records; a zero cost means "no data yet", not a verified zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Target margin applied when a project record does not carry one.
pub const DEFAULT_TARGET_MARGIN_PCT: f64 = 0.20;

const fn default_target_margin() -> f64 {
    DEFAULT_TARGET_MARGIN_PCT
}

/// Per-project financial estimate snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitInputs {
    /// Opaque project identifier.
    pub project_id: String,
    /// Total contracted revenue.
    #[serde(default)]
    pub contract_value: f64,
    /// Target gross margin as a fraction in `[0, 1]`.
    #[serde(default = "default_target_margin")]
    pub target_margin_pct: f64,
    /// Estimated costs by category.
    #[serde(default)]
    pub est: EstimateCosts,
}

impl ProfitInputs {
    /// Creates inputs with the default target margin.
    #[must_use]
    pub fn new(project_id: impl Into<String>, contract_value: f64, est: EstimateCosts) -> Self {
        Self {
            project_id: project_id.into(),
            contract_value,
            target_margin_pct: DEFAULT_TARGET_MARGIN_PCT,
            est,
        }
    }
}

/// Estimated cost breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateCosts {
    /// Estimated labor cost.
    pub labor_cost: f64,
    /// Estimated materials cost.
    pub materials_cost: f64,
    /// Estimated overhead cost.
    pub overhead_cost: f64,
    /// Estimated labor hours. Carried for display only.
    pub labor_hours: Option<f64>,
}

/// Date range an [`Actuals`] snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Inclusive end. Expected to be `>= start`, not enforced.
    pub end: DateTime<Utc>,
}

/// Per-project actual costs for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actuals {
    /// Period the figures were collected over.
    pub period: Period,
    /// Labor actuals.
    #[serde(default)]
    pub labor: LaborActuals,
    /// Materials actuals.
    #[serde(default)]
    pub materials: MaterialActuals,
    /// Overhead actuals.
    #[serde(default)]
    pub overhead: OverheadActuals,
}

impl Actuals {
    /// Zeroed actuals for a period, used when the source records could not
    /// be fetched so dashboards still render.
    #[must_use]
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            labor: LaborActuals::default(),
            materials: MaterialActuals::default(),
            overhead: OverheadActuals::default(),
        }
    }
}

/// Labor actuals from timesheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborActuals {
    /// Regular hours worked.
    pub reg_hours: f64,
    /// Overtime hours worked.
    pub ot_hours: f64,
    /// Base wage cost.
    pub cost: f64,
    /// Employer-side burden (insurance, taxes, benefits) on top of `cost`.
    pub burden_cost: Option<f64>,
    /// Distinct employees who logged time.
    pub employees: Option<u32>,
}

/// Materials actuals from purchase records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialActuals {
    /// Number of line items purchased.
    pub items: u32,
    /// Total materials cost.
    pub cost: f64,
    /// Distinct vendors.
    pub vendors: Option<u32>,
}

/// Overhead actuals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverheadActuals {
    /// Total overhead cost.
    pub cost: f64,
}

/// Derived profitability metrics. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitCalculation {
    /// Sum of estimated labor, materials and overhead.
    pub est_total: f64,
    /// Estimated gross profit.
    pub est_gp: f64,
    /// Estimated margin as a fraction (0 when contract value is 0).
    pub est_margin: f64,
    /// Actual labor including burden.
    pub act_labor: f64,
    /// Sum of actual labor, materials and overhead.
    pub act_total: f64,
    /// Actual gross profit.
    pub act_gp: f64,
    /// Actual margin as a fraction (0 when contract value is 0).
    pub act_margin: f64,
    /// Actual minus estimate per category.
    pub variance: Variance,
}

/// Actual minus estimate. Positive cost variance means over budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variance {
    /// Labor variance (burden included on the actual side).
    pub labor: f64,
    /// Materials variance.
    pub materials: f64,
    /// Overhead variance.
    pub overhead: f64,
    /// Total cost variance.
    pub total: f64,
    /// Actual margin minus estimated margin, in percentage points.
    pub margin_pct_delta: f64,
}

/// Financial health label shown on a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum StatusLabel {
    /// Margin is holding.
    #[serde(rename = "On Track")]
    #[strum(serialize = "On Track")]
    OnTrack,
    /// Margin slipped between 2 and 5 points.
    #[serde(rename = "At Risk")]
    #[strum(serialize = "At Risk")]
    AtRisk,
    /// Margin slipped 5 points or more.
    #[serde(rename = "Over Budget")]
    #[strum(serialize = "Over Budget")]
    OverBudget,
}

/// Visual tone paired with a [`StatusLabel`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    /// Green.
    Success,
    /// Amber.
    Warning,
    /// Red.
    Destructive,
}

/// Status badge derived from the margin delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    /// Badge text.
    pub label: StatusLabel,
    /// Badge color.
    pub tone: Tone,
}
