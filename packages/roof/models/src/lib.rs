#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Roof measurement and pricing types.
//!
//! Polygons arrive as rings of `[longitude, latitude]` pairs drawn on the
//! map or returned by the roof analysis service. Every record here is a
//! plain value consumed once per estimate.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A `[longitude, latitude]` pair in WGS84 degrees.
pub type Coordinate = [f64; 2];

/// Roof pitch as rise over run (inches per foot when run is 12).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Vertical rise.
    pub rise: f64,
    /// Horizontal run.
    pub run: f64,
}

impl Default for Pitch {
    fn default() -> Self {
        Self {
            rise: 4.0,
            run: 12.0,
        }
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.rise, self.run)
    }
}

/// Edge bucket assigned from a plan-view bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EdgeType {
    /// Near-horizontal lower edge.
    Eave,
    /// Gable-end edge. Also receives diagonal edges.
    Rake,
}

/// One polygon side with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEdge {
    /// Start vertex.
    pub start: Coordinate,
    /// End vertex.
    pub end: Coordinate,
    /// Geodesic length in feet.
    pub length_ft: f64,
    /// Initial bearing from `start` to `end` in degrees, `(-180, 180]`.
    pub bearing: f64,
    /// Assigned bucket.
    pub edge_type: EdgeType,
}

/// Linear footage by edge kind.
///
/// Eave and rake footage come from polygon geometry. Ridge, hip and valley
/// footage can only be seen from imagery and come from roof analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinearFeet {
    /// Eave footage.
    pub eave: f64,
    /// Rake footage.
    pub rake: f64,
    /// Ridge footage.
    pub ridge: f64,
    /// Hip footage.
    pub hip: f64,
    /// Valley footage.
    pub valley: f64,
}

impl LinearFeet {
    /// Sum of every edge kind.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.eave + self.rake + self.ridge + self.hip + self.valley
    }
}

/// Roof penetration kinds that are priced per unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeatureKind {
    /// Roof vent.
    Vent,
    /// Chimney (flashing and cricket).
    Chimney,
    /// Skylight.
    Skylight,
    /// Rooftop HVAC unit curb.
    Hvac,
}

impl FeatureKind {
    /// All kinds in display order.
    pub const ALL: &[Self] = &[Self::Vent, Self::Chimney, Self::Skylight, Self::Hvac];
}

/// Detected feature counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofFeatures {
    /// Number of vents.
    pub vents: u32,
    /// Number of chimneys.
    pub chimneys: u32,
    /// Number of skylights.
    pub skylights: u32,
    /// Number of HVAC units.
    pub hvac_units: u32,
}

impl RoofFeatures {
    /// Count for a single kind.
    #[must_use]
    pub const fn count(&self, kind: FeatureKind) -> u32 {
        match kind {
            FeatureKind::Vent => self.vents,
            FeatureKind::Chimney => self.chimneys,
            FeatureKind::Skylight => self.skylights,
            FeatureKind::Hvac => self.hvac_units,
        }
    }

    /// Sets the count for a single kind.
    pub const fn set(&mut self, kind: FeatureKind, count: u32) {
        match kind {
            FeatureKind::Vent => self.vents = count,
            FeatureKind::Chimney => self.chimneys = count,
            FeatureKind::Skylight => self.skylights = count,
            FeatureKind::Hvac => self.hvac_units = count,
        }
    }
}

/// Unit costs per feature kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureCosts {
    /// Cost per vent.
    pub vent: f64,
    /// Cost per chimney.
    pub chimney: f64,
    /// Cost per skylight.
    pub skylight: f64,
    /// Cost per HVAC unit.
    pub hvac: f64,
}

impl FeatureCosts {
    /// Unit cost for a single kind.
    #[must_use]
    pub const fn unit_cost(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::Vent => self.vent,
            FeatureKind::Chimney => self.chimney,
            FeatureKind::Skylight => self.skylight,
            FeatureKind::Hvac => self.hvac,
        }
    }
}

/// Unit prices used by the pricing rollup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Roofing material cost per square (100 sq ft).
    pub cost_per_square: f64,
    /// Labor cost per square.
    pub labor_per_square: f64,
    /// Drip edge / trim cost per linear foot.
    pub edge_cost_per_foot: f64,
    /// Per-unit feature costs.
    #[serde(default)]
    pub feature_costs: FeatureCosts,
    /// Contingency as a fraction of the subtotal (e.g. `0.10`).
    #[serde(default)]
    pub contingency_pct: f64,
}

/// A named pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSheet {
    /// Unique identifier (e.g. `"standard"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit prices.
    pub pricing: PricingConfig,
}

/// Geometry derived from a roof polygon and pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofMeasurements {
    /// Horizontal projected area in square feet.
    pub plan_area_sqft: f64,
    /// Pitch-adjusted area in square feet.
    pub surface_area_sqft: f64,
    /// Plan area in roofing squares.
    pub plan_squares: f64,
    /// Surface area in roofing squares.
    pub surface_squares: f64,
    /// Pitch used.
    pub pitch: Pitch,
    /// Plan-to-surface multiplier.
    pub pitch_factor: f64,
    /// Pitch angle in degrees.
    pub pitch_angle_deg: f64,
    /// Polygon perimeter in feet.
    pub perimeter_ft: f64,
    /// Footage per edge kind.
    pub linear_feet: LinearFeet,
    /// Every polygon side with its classification.
    pub edges: Vec<ClassifiedEdge>,
}

/// One priced feature line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureLine {
    /// Feature kind.
    pub kind: FeatureKind,
    /// Detected count.
    pub count: u32,
    /// Unit cost.
    pub unit_cost: f64,
    /// `count * unit_cost`.
    pub total: f64,
}

/// Pricing rollup for a roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Roofing material cost.
    pub roofing: f64,
    /// Labor cost.
    pub labor: f64,
    /// Edge material cost.
    pub edges: f64,
    /// Per-kind feature lines (zero counts included).
    pub features: Vec<FeatureLine>,
    /// Sum of feature lines.
    pub features_total: f64,
    /// Roofing + labor + edges + features.
    pub subtotal: f64,
    /// Contingency fraction applied.
    pub contingency_pct: f64,
    /// Contingency amount.
    pub contingency: f64,
    /// Subtotal + contingency.
    pub total: f64,
}

/// Request sent to the roof analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Latitude of the property.
    pub latitude: f64,
    /// Longitude of the property.
    pub longitude: f64,
    /// Street address, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// User-drawn outline, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<Coordinate>>,
    /// Imagery zoom level.
    pub zoom: u8,
}

/// Result returned by the roof analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofAnalysis {
    /// Whether the upstream analysis succeeded.
    pub success: bool,
    /// Upstream error message when `success` is false.
    pub error: Option<String>,
    /// Pitch read from imagery, e.g. `"6/12"`.
    pub pitch: Option<String>,
    /// Detected features.
    pub features: RoofFeatures,
    /// Ridge footage seen in imagery.
    pub ridge_feet: f64,
    /// Hip footage seen in imagery.
    pub hip_feet: f64,
    /// Valley footage seen in imagery.
    pub valley_feet: f64,
    /// Upstream confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-form notes from the analysis.
    pub notes: Option<String>,
}

/// Complete roof estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofEstimate {
    /// Geometry.
    pub measurements: RoofMeasurements,
    /// Features priced.
    pub features: RoofFeatures,
    /// Pricing rollup.
    pub price: PriceBreakdown,
    /// Confidence passed through from the analysis. `None` for
    /// geometry-only estimates.
    pub confidence: Option<f64>,
    /// Notes passed through from the analysis.
    pub notes: Option<String>,
}
