#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the external roof analysis gateway.
//!
//! Pitch reading and feature detection (vents, chimneys, skylights, HVAC
//! units, ridge/hip/valley runs) happen in a hosted vision service. This
//! crate only ships requests there and turns its answers into typed
//! [`RoofAnalysis`](roofdesk_roof_models::RoofAnalysis) values.
//!
//! Failures are never papered over: a transport error, a non-2xx status or
//! a `success: false` payload all come back as [`VisionError`] carrying the
//! upstream message, and nothing here retries.

pub mod providers;

pub use providers::{RoofAnalyzer, create_analyzer_from_env};

use thiserror::Error;

/// Message used when an analysis reports failure without saying why.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Roof analysis failed";

/// Errors that can occur while talking to the analysis gateway.
#[derive(Debug, Error)]
pub enum VisionError {
    /// HTTP request to the gateway failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway reported a failure.
    #[error("{message}")]
    Provider {
        /// Upstream message, verbatim.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
