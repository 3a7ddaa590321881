//! HTTP roof analysis gateway.

use roofdesk_roof_models::{AnalysisRequest, RoofAnalysis};
use serde::{Deserialize, Serialize};

use super::RoofAnalyzer;
use crate::{ANALYSIS_FAILED_MESSAGE, VisionError};

/// Analyzer backed by a hosted HTTP gateway.
pub struct GatewayAnalyzer {
    url: String,
    api_key: Option<String>,
    model: Option<String>,
    client: reqwest::Client,
}

impl GatewayAnalyzer {
    /// Creates a new gateway analyzer.
    #[must_use]
    pub fn new(url: String, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            url,
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

/// Gateway request body.
#[derive(Serialize)]
struct GatewayRequest<'a> {
    #[serde(flatten)]
    request: &'a AnalysisRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Gateway error body. Different deployments use either field.
#[derive(Deserialize)]
struct GatewayError {
    error: Option<String>,
    message: Option<String>,
}

/// Turns a raw gateway response into an analysis or a provider error.
///
/// # Errors
///
/// Returns [`VisionError::Provider`] for a non-2xx status or a
/// `success: false` payload, and [`VisionError::Json`] if a 2xx body is not
/// a valid analysis.
pub fn interpret_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<RoofAnalysis, VisionError> {
    if !status.is_success() {
        let message = serde_json::from_str::<GatewayError>(body)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or_else(|| format!("HTTP {status}: {body}"));
        return Err(VisionError::Provider { message });
    }

    let analysis: RoofAnalysis = serde_json::from_str(body)?;

    if !analysis.success {
        return Err(VisionError::Provider {
            message: analysis
                .error
                .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string()),
        });
    }

    Ok(analysis)
}

#[async_trait::async_trait]
impl RoofAnalyzer for GatewayAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RoofAnalysis, VisionError> {
        let body = GatewayRequest {
            request,
            model: self.model.as_deref(),
        };

        let mut req = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let result = interpret_response(status, &text);
        match &result {
            Ok(analysis) => log::info!(
                "Roof analysis at ({}, {}) succeeded with confidence {:.2}",
                request.latitude,
                request.longitude,
                analysis.confidence
            ),
            Err(e) => log::warn!(
                "Roof analysis at ({}, {}) failed: {e}",
                request.latitude,
                request.longitude
            ),
        }
        result
    }
}
