//! Roof measurement and hybrid (analysis + geometry) estimation.
//!
//! Geometry comes from the drawn outline. Pitch, features and the
//! ridge/hip/valley runs that cannot be seen in an outline come from the
//! external roof analysis. The two are merged and priced here.

use geo::{Centroid, LineString, Polygon};
use geojson::{GeoJson, Geometry, Value};
use roofdesk_roof_models::{
    AnalysisRequest, Coordinate, PricingConfig, RoofEstimate, RoofFeatures, RoofMeasurements,
};
use roofdesk_vision::{ANALYSIS_FAILED_MESSAGE, RoofAnalyzer, VisionError};
use roofdesk_vision::providers::DEFAULT_ZOOM;

use crate::RoofError;
use crate::edges::{DEFAULT_ANGLE_THRESHOLD_DEG, classify_edges, sum_linear_feet};
use crate::geodesic::{MIN_AREA_POINTS, geodesic_area, geodesic_perimeter};
use crate::pitch::{SQFT_PER_SQUARE, calculate_pitch_angle, calculate_pitch_factor, parse_pitch};
use crate::pricing::price_roof;

/// Inputs for a hybrid estimate.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    /// Roof outline as `[longitude, latitude]` points.
    pub ring: Vec<Coordinate>,
    /// Pitch entered by the user. Takes precedence over the analyzed pitch.
    pub pitch: Option<String>,
    /// Street address forwarded to the analysis.
    pub address: Option<String>,
    /// Feature counts entered by the user. Take precedence over detection.
    pub features: Option<RoofFeatures>,
    /// Eave/rake classification threshold in degrees.
    pub angle_threshold_deg: f64,
}

impl EstimateRequest {
    /// Creates a request with no overrides and the default threshold.
    #[must_use]
    pub const fn new(ring: Vec<Coordinate>) -> Self {
        Self {
            ring,
            pitch: None,
            address: None,
            features: None,
            angle_threshold_deg: DEFAULT_ANGLE_THRESHOLD_DEG,
        }
    }
}

/// Measures a roof outline at the given pitch.
#[must_use]
pub fn measure_roof(
    ring: &[Coordinate],
    pitch: &str,
    angle_threshold_deg: f64,
) -> RoofMeasurements {
    let pitch = parse_pitch(pitch);
    let pitch_factor = calculate_pitch_factor(pitch.rise, pitch.run);

    let plan_area_sqft = geodesic_area(ring);
    let surface_area_sqft = plan_area_sqft * pitch_factor;
    let edges = classify_edges(ring, angle_threshold_deg);

    RoofMeasurements {
        plan_area_sqft,
        surface_area_sqft,
        plan_squares: plan_area_sqft / SQFT_PER_SQUARE,
        surface_squares: surface_area_sqft / SQFT_PER_SQUARE,
        pitch,
        pitch_factor,
        pitch_angle_deg: calculate_pitch_angle(pitch.rise, pitch.run),
        perimeter_ft: geodesic_perimeter(ring),
        linear_feet: sum_linear_feet(&edges),
        edges,
    }
}

/// Prices an outline from geometry alone, with caller-supplied features.
///
/// No analysis is involved, so the estimate carries no confidence.
#[must_use]
pub fn quote_roof(
    ring: &[Coordinate],
    pitch: &str,
    features: RoofFeatures,
    pricing: &PricingConfig,
    angle_threshold_deg: f64,
) -> RoofEstimate {
    let measurements = measure_roof(ring, pitch, angle_threshold_deg);
    let price = price_roof(&measurements, &features, pricing);

    RoofEstimate {
        measurements,
        features,
        price,
        confidence: None,
        notes: None,
    }
}

/// Runs the external analysis for an outline, then measures and prices it.
///
/// # Errors
///
/// * [`RoofError::InvalidPolygon`] if the outline is not a closed ring
///   (checked before any upstream call)
/// * [`RoofError::Analysis`] if the analysis errors or reports
///   `success: false`, with the upstream message unchanged
pub async fn estimate_roof(
    request: &EstimateRequest,
    analyzer: &dyn RoofAnalyzer,
    pricing: &PricingConfig,
) -> Result<RoofEstimate, RoofError> {
    if request.ring.len() < MIN_AREA_POINTS {
        return Err(RoofError::InvalidPolygon {
            message: format!(
                "outline has {} points, need at least {MIN_AREA_POINTS}",
                request.ring.len()
            ),
        });
    }

    let [longitude, latitude] = ring_center(&request.ring)?;

    let analysis = analyzer
        .analyze(&AnalysisRequest {
            latitude,
            longitude,
            address: request.address.clone(),
            polygon: Some(request.ring.clone()),
            zoom: DEFAULT_ZOOM,
        })
        .await?;

    if !analysis.success {
        return Err(RoofError::Analysis(VisionError::Provider {
            message: analysis
                .error
                .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string()),
        }));
    }

    let pitch = request
        .pitch
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .or(analysis.pitch.as_deref())
        .unwrap_or_default();

    let mut measurements = measure_roof(&request.ring, pitch, request.angle_threshold_deg);
    measurements.linear_feet.ridge = analysis.ridge_feet;
    measurements.linear_feet.hip = analysis.hip_feet;
    measurements.linear_feet.valley = analysis.valley_feet;

    let features = request.features.unwrap_or(analysis.features);
    let price = price_roof(&measurements, &features, pricing);

    log::info!(
        "Estimated {:.1} squares at {} for ${:.2} (confidence {:.2})",
        measurements.surface_squares,
        measurements.pitch,
        price.total,
        analysis.confidence
    );

    Ok(RoofEstimate {
        measurements,
        features,
        price,
        confidence: Some(analysis.confidence),
        notes: analysis.notes,
    })
}

/// Planar centroid of the outline, used to aim the imagery.
fn ring_center(ring: &[Coordinate]) -> Result<Coordinate, RoofError> {
    let exterior: LineString<f64> = ring.iter().map(|c| (c[0], c[1])).collect();
    Polygon::new(exterior, vec![])
        .centroid()
        .filter(|p| p.x().is_finite() && p.y().is_finite())
        .map(|p| [p.x(), p.y()])
        .ok_or_else(|| RoofError::InvalidPolygon {
            message: "outline has no centroid".to_string(),
        })
}

/// Reads the exterior ring of the first polygon in a `GeoJSON` document.
///
/// Accepts a bare geometry, a feature or a feature collection, with
/// `Polygon` or `MultiPolygon` geometry.
///
/// # Errors
///
/// Returns [`RoofError::GeoJson`] if the document does not parse and
/// [`RoofError::InvalidPolygon`] if it holds no polygon.
pub fn ring_from_geojson(geojson_str: &str) -> Result<Vec<Coordinate>, RoofError> {
    let geojson: GeoJson = geojson_str.parse().map_err(Box::new)?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => Some(geometry),
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .find_map(|feature| feature.geometry),
    };

    geometry
        .and_then(exterior_ring)
        .ok_or_else(|| RoofError::InvalidPolygon {
            message: "GeoJSON contains no Polygon or MultiPolygon".to_string(),
        })
}

fn exterior_ring(geometry: Geometry) -> Option<Vec<Coordinate>> {
    let rings = match geometry.value {
        Value::Polygon(rings) => rings,
        Value::MultiPolygon(polygons) => polygons.into_iter().next()?,
        _ => return None,
    };

    rings.into_iter().next().map(|exterior| {
        exterior
            .into_iter()
            .filter_map(|position| match position.as_slice() {
                [lng, lat, ..] => Some([*lng, *lat]),
                _ => None,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofdesk_roof_models::{FeatureCosts, RoofAnalysis};
    use std::sync::Mutex;

    /// Roughly a 66 x 44 ft house footprint in Oklahoma City.
    fn footprint() -> Vec<Coordinate> {
        vec![
            [-97.5, 35.5],
            [-97.499_78, 35.5],
            [-97.499_78, 35.500_12],
            [-97.5, 35.500_12],
            [-97.5, 35.5],
        ]
    }

    fn pricing() -> PricingConfig {
        PricingConfig {
            cost_per_square: 150.0,
            labor_per_square: 100.0,
            edge_cost_per_foot: 2.0,
            feature_costs: FeatureCosts {
                vent: 50.0,
                chimney: 400.0,
                skylight: 600.0,
                hvac: 250.0,
            },
            contingency_pct: 0.10,
        }
    }

    struct StubAnalyzer {
        response: Result<RoofAnalysis, String>,
        seen: Mutex<Vec<AnalysisRequest>>,
    }

    impl StubAnalyzer {
        fn ok(analysis: RoofAnalysis) -> Self {
            Self {
                response: Ok(analysis),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl RoofAnalyzer for StubAnalyzer {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<RoofAnalysis, VisionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.response
                .clone()
                .map_err(|message| VisionError::Provider { message })
        }
    }

    fn analysis() -> RoofAnalysis {
        RoofAnalysis {
            success: true,
            pitch: Some("8/12".to_string()),
            features: RoofFeatures {
                vents: 3,
                chimneys: 1,
                ..RoofFeatures::default()
            },
            ridge_feet: 40.0,
            hip_feet: 10.0,
            confidence: 0.87,
            notes: Some("clear imagery".to_string()),
            ..RoofAnalysis::default()
        }
    }

    #[test]
    fn measure_roof_applies_pitch() {
        let flat = measure_roof(&footprint(), "0/12", DEFAULT_ANGLE_THRESHOLD_DEG);
        let steep = measure_roof(&footprint(), "12/12", DEFAULT_ANGLE_THRESHOLD_DEG);

        assert!(flat.plan_area_sqft > 2_500.0 && flat.plan_area_sqft < 3_300.0);
        assert!((flat.surface_area_sqft - flat.plan_area_sqft).abs() < 1e-9);
        assert!(
            (steep.surface_area_sqft - steep.plan_area_sqft * std::f64::consts::SQRT_2).abs()
                < 1e-6
        );
        assert!((steep.pitch_angle_deg - 45.0).abs() < 1e-9);
        assert!((steep.surface_squares - steep.surface_area_sqft / 100.0).abs() < 1e-12);
        assert_eq!(steep.edges.len(), 4);
        assert!(
            (steep.linear_feet.eave + steep.linear_feet.rake - steep.perimeter_ft).abs() < 1e-6
        );
    }

    #[test]
    fn measure_degenerate_ring_is_zero() {
        let m = measure_roof(&footprint()[..2], "6/12", DEFAULT_ANGLE_THRESHOLD_DEG);
        assert!(m.plan_area_sqft.abs() < f64::EPSILON);
        assert!(m.perimeter_ft.abs() < f64::EPSILON);
    }

    #[test]
    fn quote_roof_has_no_confidence() {
        let estimate = quote_roof(
            &footprint(),
            "6/12",
            RoofFeatures::default(),
            &pricing(),
            DEFAULT_ANGLE_THRESHOLD_DEG,
        );
        assert!(estimate.confidence.is_none());
        assert!(estimate.price.total > 0.0);
        assert!((estimate.price.total - estimate.price.subtotal * 1.1).abs() < 1e-6);
    }

    #[tokio::test]
    async fn hybrid_estimate_merges_analysis() {
        let analyzer = StubAnalyzer::ok(analysis());
        let request = EstimateRequest::new(footprint());

        let estimate = estimate_roof(&request, &analyzer, &pricing()).await.unwrap();

        assert_eq!(estimate.measurements.pitch.rise, 8.0);
        assert_eq!(estimate.features.vents, 3);
        assert!((estimate.measurements.linear_feet.ridge - 40.0).abs() < f64::EPSILON);
        assert!((estimate.measurements.linear_feet.hip - 10.0).abs() < f64::EPSILON);
        assert_eq!(estimate.confidence, Some(0.87));
        assert_eq!(estimate.notes.as_deref(), Some("clear imagery"));

        let features_total = 3.0 * 50.0 + 400.0;
        assert!((estimate.price.features_total - features_total).abs() < 1e-9);

        let seen = analyzer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].latitude - 35.500_06).abs() < 1e-6);
        assert!((seen[0].longitude - -97.499_89).abs() < 1e-6);
        assert_eq!(seen[0].zoom, DEFAULT_ZOOM);
    }

    #[tokio::test]
    async fn user_overrides_win_over_analysis() {
        let analyzer = StubAnalyzer::ok(analysis());
        let mut request = EstimateRequest::new(footprint());
        request.pitch = Some("5/12".to_string());
        request.features = Some(RoofFeatures {
            skylights: 2,
            ..RoofFeatures::default()
        });

        let estimate = estimate_roof(&request, &analyzer, &pricing()).await.unwrap();

        assert_eq!(estimate.measurements.pitch.rise, 5.0);
        assert_eq!(estimate.features.vents, 0);
        assert_eq!(estimate.features.skylights, 2);
    }

    #[tokio::test]
    async fn blank_pitch_falls_back_to_analysis() {
        let analyzer = StubAnalyzer::ok(analysis());
        let mut request = EstimateRequest::new(footprint());
        request.pitch = Some("  ".to_string());

        let estimate = estimate_roof(&request, &analyzer, &pricing()).await.unwrap();
        assert_eq!(estimate.measurements.pitch.rise, 8.0);
    }

    #[tokio::test]
    async fn analysis_failure_surfaces_verbatim() {
        let analyzer = StubAnalyzer::failing("Imagery unavailable for this location");
        let request = EstimateRequest::new(footprint());

        let err = estimate_roof(&request, &analyzer, &pricing())
            .await
            .unwrap_err();

        assert!(matches!(err, RoofError::Analysis(_)));
        assert_eq!(err.to_string(), "Imagery unavailable for this location");
    }

    #[tokio::test]
    async fn unsuccessful_analysis_is_not_priced() {
        let analyzer = StubAnalyzer::ok(RoofAnalysis {
            success: false,
            error: Some("No roof detected".to_string()),
            ..RoofAnalysis::default()
        });
        let request = EstimateRequest::new(footprint());

        let err = estimate_roof(&request, &analyzer, &pricing())
            .await
            .unwrap_err();

        assert!(matches!(err, RoofError::Analysis(VisionError::Provider { .. })));
        assert_eq!(err.to_string(), "No roof detected");
    }

    #[tokio::test]
    async fn unsuccessful_analysis_without_message_uses_fallback() {
        let analyzer = StubAnalyzer::ok(RoofAnalysis::default());
        let request = EstimateRequest::new(footprint());

        let err = estimate_roof(&request, &analyzer, &pricing())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), ANALYSIS_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn short_ring_rejected_before_analysis() {
        let analyzer = StubAnalyzer::ok(analysis());
        let request = EstimateRequest::new(footprint()[..3].to_vec());

        let err = estimate_roof(&request, &analyzer, &pricing())
            .await
            .unwrap_err();

        assert!(matches!(err, RoofError::InvalidPolygon { .. }));
        assert!(analyzer.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn reads_ring_from_feature_collection() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-97.5, 35.5], [-97.4, 35.5], [-97.4, 35.6], [-97.5, 35.5]]]
                }
            }]
        }"#;
        let ring = ring_from_geojson(doc).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], [-97.4, 35.5]);
    }

    #[test]
    fn reads_ring_from_multipolygon_geometry() {
        let doc = r#"{"type":"MultiPolygon","coordinates":[[[[1,2,30],[3,2],[3,4],[1,2]]]]}"#;
        let ring = ring_from_geojson(doc).unwrap();
        assert_eq!(ring[0], [1.0, 2.0]);
    }

    #[test]
    fn non_polygon_geojson_is_rejected() {
        let err = ring_from_geojson(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap_err();
        assert!(matches!(err, RoofError::InvalidPolygon { .. }));

        let err = ring_from_geojson("{not json").unwrap_err();
        assert!(matches!(err, RoofError::GeoJson(_)));
    }
}
