//! Geodesic measurements on `[longitude, latitude]` rings.
//!
//! All measurements run on the WGS84 ellipsoid (Karney's algorithms via
//! `geo`) and are reported in feet / square feet. Rings come straight from
//! an interactive drawing tool and are often half-finished, so every
//! function here returns `0` for degenerate input instead of failing.

use geo::{Bearing, Distance, Geodesic, GeodesicArea, LineString, Point, Polygon};
use roofdesk_roof_models::Coordinate;

/// Square feet per square meter.
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Feet per meter.
pub const FT_PER_M: f64 = 3.28084;

/// Minimum points for a closed ring (first point repeated last).
pub const MIN_AREA_POINTS: usize = 4;

/// Minimum points for a perimeter.
pub const MIN_PERIMETER_POINTS: usize = 3;

fn is_valid(coord: Coordinate) -> bool {
    let [lng, lat] = coord;
    lng.is_finite() && lat.is_finite() && lat.abs() <= 90.0
}

fn to_point(coord: Coordinate) -> Point<f64> {
    Point::new(coord[0], coord[1])
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Consecutive vertex pairs of a ring, adding the closing side when the
/// ring is not explicitly closed.
pub(crate) fn ring_sides(ring: &[Coordinate]) -> Vec<(Coordinate, Coordinate)> {
    let mut sides: Vec<(Coordinate, Coordinate)> = ring.windows(2).map(|w| (w[0], w[1])).collect();

    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && ring.len() > 2
        && first != last
    {
        sides.push((last, first));
    }

    sides
}

/// Geodesic area of a closed ring in square feet.
///
/// Returns `0` for rings with fewer than four points or any invalid
/// coordinate.
#[must_use]
pub fn geodesic_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < MIN_AREA_POINTS {
        return 0.0;
    }
    if !ring.iter().copied().all(is_valid) {
        log::debug!("geodesic_area: ring has invalid coordinates, returning 0");
        return 0.0;
    }

    let exterior: LineString<f64> = ring.iter().map(|c| (c[0], c[1])).collect();
    let polygon = Polygon::new(exterior, vec![]);

    // Unsigned area of a clockwise ring is the rest of the globe.
    finite_or_zero(polygon.geodesic_area_signed().abs() * SQ_FT_PER_SQ_M)
}

/// Geodesic perimeter of a ring in feet.
///
/// The closing side is included whether or not the ring repeats its first
/// point. Returns `0` for fewer than three points or any invalid
/// coordinate.
#[must_use]
pub fn geodesic_perimeter(ring: &[Coordinate]) -> f64 {
    if ring.len() < MIN_PERIMETER_POINTS {
        return 0.0;
    }
    if !ring.iter().copied().all(is_valid) {
        log::debug!("geodesic_perimeter: ring has invalid coordinates, returning 0");
        return 0.0;
    }

    ring_sides(ring)
        .into_iter()
        .map(|(a, b)| geodesic_distance(a, b))
        .sum()
}

/// Geodesic distance between two points in feet. Invalid input returns `0`.
#[must_use]
pub fn geodesic_distance(from: Coordinate, to: Coordinate) -> f64 {
    if !is_valid(from) || !is_valid(to) {
        return 0.0;
    }
    finite_or_zero(Geodesic.distance(to_point(from), to_point(to)) * FT_PER_M)
}

/// Initial bearing from `from` to `to` in degrees, in `(-180, 180]`.
///
/// North is `0`, east `90`, west `-90`. Invalid input returns `0`.
#[must_use]
pub fn calculate_bearing(from: Coordinate, to: Coordinate) -> f64 {
    if !is_valid(from) || !is_valid(to) {
        return 0.0;
    }
    let bearing = finite_or_zero(Geodesic.bearing(to_point(from), to_point(to)));
    if bearing > 180.0 {
        bearing - 360.0
    } else {
        bearing
    }
}
