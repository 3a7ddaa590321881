//! Eave / rake classification of roof polygon sides.
//!
//! A side's plan-view bearing is folded onto a 0-90 degree scale. Sides
//! within `threshold` of 0 are eaves, sides within `threshold` of 90 are
//! rakes, and everything in between is also counted as a rake. There is no
//! separate bucket for diagonal sides.

use roofdesk_roof_models::{ClassifiedEdge, Coordinate, EdgeType, LinearFeet};

use crate::geodesic::{calculate_bearing, geodesic_distance, ring_sides};

/// Default classification threshold in degrees.
pub const DEFAULT_ANGLE_THRESHOLD_DEG: f64 = 15.0;

/// Folds a bearing in `(-180, 180]` onto `[0, 90]`.
#[must_use]
pub fn normalize_bearing(bearing: f64) -> f64 {
    let abs = bearing.abs();
    abs.min(180.0 - abs)
}

/// Classifies a single bearing.
#[must_use]
pub fn classify_bearing(bearing: f64, angle_threshold_deg: f64) -> EdgeType {
    let normalized = normalize_bearing(bearing);

    if normalized <= angle_threshold_deg {
        EdgeType::Eave
    } else {
        // Near-vertical (>= 90 - threshold) and diagonal sides alike.
        EdgeType::Rake
    }
}

/// Classifies every side of a ring.
///
/// The closing side is included when the ring does not repeat its first
/// point. Rings with fewer than two points have no sides.
#[must_use]
pub fn classify_edges(ring: &[Coordinate], angle_threshold_deg: f64) -> Vec<ClassifiedEdge> {
    ring_sides(ring)
        .into_iter()
        .map(|(start, end)| {
            let bearing = calculate_bearing(start, end);
            ClassifiedEdge {
                start,
                end,
                length_ft: geodesic_distance(start, end),
                bearing,
                edge_type: classify_bearing(bearing, angle_threshold_deg),
            }
        })
        .collect()
}

/// Sums classified side lengths into eave and rake footage.
///
/// Ridge, hip and valley footage are left at zero; they are not visible in
/// an outline.
#[must_use]
pub fn calculate_linear_feet(ring: &[Coordinate], angle_threshold_deg: f64) -> LinearFeet {
    sum_linear_feet(&classify_edges(ring, angle_threshold_deg))
}

/// Sums already-classified sides.
#[must_use]
pub fn sum_linear_feet(edges: &[ClassifiedEdge]) -> LinearFeet {
    edges
        .iter()
        .fold(LinearFeet::default(), |mut feet, edge| {
            match edge.edge_type {
                EdgeType::Eave => feet.eave += edge.length_ft,
                EdgeType::Rake => feet.rake += edge.length_ft,
            }
            feet
        })
}
