#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Roof geometry measurement, edge classification and pricing rollup.
//!
//! Takes a roof outline (a ring of `[longitude, latitude]` points), a pitch
//! string, detected features and a price sheet, and produces plan/surface
//! area, squares, eave/rake footage and a priced estimate.
//!
//! The measurement functions in [`pitch`], [`geodesic`] and [`edges`] are
//! pure and fail soft. [`estimate::estimate_roof`] is the one entry point
//! that reaches out to the external roof analysis service, and it fails
//! loudly.

pub mod edges;
pub mod estimate;
pub mod geodesic;
pub mod pitch;
pub mod price_sheets;
pub mod pricing;

pub use edges::{calculate_linear_feet, classify_edges};
pub use geodesic::{calculate_bearing, geodesic_area, geodesic_distance, geodesic_perimeter};
pub use pitch::{
    calculate_pitch_angle, calculate_pitch_factor, calculate_plan_squares,
    calculate_surface_area, calculate_surface_squares, parse_pitch,
};

use thiserror::Error;

/// Errors that can occur while estimating a roof.
#[derive(Debug, Error)]
pub enum RoofError {
    /// The external roof analysis failed. The upstream message is kept
    /// verbatim.
    #[error(transparent)]
    Analysis(#[from] roofdesk_vision::VisionError),

    /// `GeoJSON` input could not be parsed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The roof outline cannot be measured.
    #[error("Invalid polygon: {message}")]
    InvalidPolygon {
        /// Description of what went wrong.
        message: String,
    },

    /// A price sheet was missing or malformed.
    #[error("Price sheet error: {message}")]
    PriceSheet {
        /// Description of what went wrong.
        message: String,
    },
}
