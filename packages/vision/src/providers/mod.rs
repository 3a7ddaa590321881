//! Roof analyzer abstraction and implementations.

pub mod gateway;

use roofdesk_roof_models::{AnalysisRequest, RoofAnalysis};

use crate::VisionError;

/// Default imagery zoom level for analysis requests.
pub const DEFAULT_ZOOM: u8 = 20;

/// Trait for roof analysis backends.
#[async_trait::async_trait]
pub trait RoofAnalyzer: Send + Sync {
    /// Analyzes the roof at the requested location.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError`] if the request fails or the backend reports
    /// an unsuccessful analysis.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RoofAnalysis, VisionError>;
}

/// Creates a roof analyzer from environment variables.
///
/// * `ROOF_ANALYSIS_PROVIDER`: `gateway` (default) or `none`
/// * `ROOF_ANALYSIS_URL`: gateway endpoint (required)
/// * `ROOF_ANALYSIS_API_KEY`: bearer token (optional)
/// * `ROOF_ANALYSIS_MODEL`: model hint forwarded to the gateway (optional)
///
/// The analyzer is built once and passed by reference to whatever needs it.
///
/// # Errors
///
/// Returns [`VisionError::Config`] if the provider is unknown or
/// disabled, or the endpoint is not configured.
pub fn create_analyzer_from_env() -> Result<Box<dyn RoofAnalyzer>, VisionError> {
    let provider =
        std::env::var("ROOF_ANALYSIS_PROVIDER").unwrap_or_else(|_| "gateway".to_string());

    match provider.to_lowercase().as_str() {
        "gateway" | "http" => {
            let url = std::env::var("ROOF_ANALYSIS_URL").map_err(|_| VisionError::Config {
                message: "ROOF_ANALYSIS_URL environment variable not set".to_string(),
            })?;
            let api_key = std::env::var("ROOF_ANALYSIS_API_KEY").ok();
            if api_key.is_none() {
                log::warn!("ROOF_ANALYSIS_API_KEY not set; calling {url} without authorization");
            }
            let model = std::env::var("ROOF_ANALYSIS_MODEL").ok();
            log::info!("Using roof analysis gateway at {url}");
            Ok(Box::new(gateway::GatewayAnalyzer::new(url, api_key, model)))
        }
        "none" => Err(VisionError::Config {
            message: "Roof analysis is disabled (ROOF_ANALYSIS_PROVIDER=none)".to_string(),
        }),
        other => Err(VisionError::Config {
            message: format!("Unknown roof analysis provider: {other}. Use 'gateway'."),
        }),
    }
}
