//! Pricing rollup: squares, footage and features into a priced total.

use roofdesk_roof_models::{
    FeatureCosts, FeatureKind, FeatureLine, PriceBreakdown, PricingConfig, RoofFeatures,
    RoofMeasurements,
};

/// Prices each feature kind as `count * unit_cost`. Zero counts are kept so
/// the breakdown always lists every kind.
#[must_use]
pub fn price_features(features: &RoofFeatures, costs: &FeatureCosts) -> Vec<FeatureLine> {
    FeatureKind::ALL
        .iter()
        .map(|&kind| {
            let count = features.count(kind);
            let unit_cost = costs.unit_cost(kind);
            FeatureLine {
                kind,
                count,
                unit_cost,
                total: f64::from(count) * unit_cost,
            }
        })
        .collect()
}

/// Prices a measured roof.
///
/// Material and labor are charged on pitch-adjusted (surface) squares; edge
/// material on every foot of eave, rake, ridge, hip and valley.
#[must_use]
pub fn price_roof(
    measurements: &RoofMeasurements,
    features: &RoofFeatures,
    pricing: &PricingConfig,
) -> PriceBreakdown {
    let squares = measurements.surface_squares;

    let roofing = squares * pricing.cost_per_square;
    let labor = squares * pricing.labor_per_square;
    let edges = measurements.linear_feet.total() * pricing.edge_cost_per_foot;

    let feature_lines = price_features(features, &pricing.feature_costs);
    let features_total: f64 = feature_lines.iter().map(|line| line.total).sum();

    let subtotal = roofing + labor + edges + features_total;
    let contingency = subtotal * pricing.contingency_pct;
    let total = subtotal + contingency;

    log::debug!(
        "Priced {squares:.2} squares: roofing={roofing:.2} labor={labor:.2} \
         edges={edges:.2} features={features_total:.2} contingency={contingency:.2} \
         total={total:.2}"
    );

    PriceBreakdown {
        roofing,
        labor,
        edges,
        features: feature_lines,
        features_total,
        subtotal,
        contingency_pct: pricing.contingency_pct,
        contingency,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofdesk_roof_models::{LinearFeet, Pitch};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn measurements(surface_squares: f64, linear_feet: LinearFeet) -> RoofMeasurements {
        RoofMeasurements {
            plan_area_sqft: surface_squares * 100.0,
            surface_area_sqft: surface_squares * 100.0,
            plan_squares: surface_squares,
            surface_squares,
            pitch: Pitch {
                rise: 0.0,
                run: 12.0,
            },
            pitch_factor: 1.0,
            pitch_angle_deg: 0.0,
            perimeter_ft: linear_feet.eave + linear_feet.rake,
            linear_feet,
            edges: Vec::new(),
        }
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

    #[test]
    fn rollup_adds_every_component() {
        let feet = LinearFeet {
            eave: 100.0,
            rake: 60.0,
            ridge: 40.0,
            ..LinearFeet::default()
        };
        let features = RoofFeatures {
            vents: 4,
            chimneys: 1,
            ..RoofFeatures::default()
        };

        let price = price_roof(&measurements(20.0, feet), &features, &pricing());

        assert!(approx_eq(price.roofing, 3_000.0));
        assert!(approx_eq(price.labor, 2_000.0));
        assert!(approx_eq(price.edges, 400.0));
        assert!(approx_eq(price.features_total, 600.0));
        assert!(approx_eq(price.subtotal, 6_000.0));
        assert!(approx_eq(price.contingency, 600.0));
        assert!(approx_eq(price.total, 6_600.0));
    }

    #[test]
    fn feature_lines_list_every_kind() {
        let features = RoofFeatures {
            skylights: 2,
            ..RoofFeatures::default()
        };
        let lines = price_features(&features, &pricing().feature_costs);

        assert_eq!(lines.len(), FeatureKind::ALL.len());
        let skylight = lines
            .iter()
            .find(|line| line.kind == FeatureKind::Skylight)
            .unwrap();
        assert_eq!(skylight.count, 2);
        assert!(approx_eq(skylight.total, 1_200.0));
        assert!(
            lines
                .iter()
                .filter(|line| line.kind != FeatureKind::Skylight)
                .all(|line| line.total.abs() < f64::EPSILON)
        );
    }

    #[test]
    fn zero_contingency_total_equals_subtotal() {
        let mut config = pricing();
        config.contingency_pct = 0.0;
        let price = price_roof(
            &measurements(10.0, LinearFeet::default()),
            &RoofFeatures::default(),
            &config,
        );
        assert!(approx_eq(price.total, price.subtotal));
        assert!(approx_eq(price.total, 2_500.0));
    }
}
