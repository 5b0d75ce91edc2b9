// Recommendation Integration Tests
//
// Purpose: end-to-end checks of the shipped classifier artifact + embedded catalog
// Run with: cargo test --test recommend_integration_tests

use crop_recommender::{
    ClassifierArtifact, Classifier, CropCatalog, Feature, PredictionService, RawMeasurements,
    RecommendError, ServiceConfig, ViolationKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;

fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/models/crop_model.json")
}

fn service() -> PredictionService {
    let classifier = ClassifierArtifact::load(&model_path()).expect("shipped artifact loads");
    let catalog = CropCatalog::builtin("assets/images");
    PredictionService::new(Arc::new(classifier), Arc::new(catalog)).expect("catalog is complete")
}

fn random_valid_input(rng: &mut StdRng) -> RawMeasurements {
    let mut raw = RawMeasurements::default();
    for feature in Feature::ALL {
        let domain = feature.domain();
        raw.set(feature, rng.gen_range(domain.min..=domain.max));
    }
    raw
}

// =========================================================================
// Section 1: Reference scenarios
// =========================================================================

#[test]
fn test_scenario_rice() {
    let raw = RawMeasurements::new(90.0, 42.0, 43.0, 20.87, 82.00, 6.50, 202.94);
    let result = service().recommend(&raw).unwrap();

    assert_eq!(result.label, "rice");
    assert!(!result.description.is_empty());
    assert!(!result.image_ref.is_empty());
    assert_eq!(result.image_ref, "assets/images/rice.jpg");
}

#[test]
fn test_scenario_nitrogen_above_max() {
    let raw = RawMeasurements::new(200.0, 42.0, 43.0, 20.87, 82.00, 6.50, 202.94);
    let err = service().recommend(&raw).unwrap_err();

    let RecommendError::Validation(validation) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(validation.violations.len(), 1);

    let violation = &validation.violations[0];
    assert_eq!(violation.field, Feature::Nitrogen);
    assert_eq!(violation.value, Some(200.0));
    assert_eq!(violation.kind, ViolationKind::AboveMaximum);
    assert_eq!(violation.violated_bound().as_deref(), Some("140 (max)"));
}

#[test]
fn test_scenario_label_resolves_in_catalog() {
    let service = service();
    let raw = RawMeasurements::new(20.0, 60.0, 20.0, 23.5, 90.0, 6.0, 120.0);
    let result = service.recommend(&raw).unwrap();

    assert!(service.catalog().contains(&result.label));
    assert!(service.labels().contains(&result.label));
}

// =========================================================================
// Section 2: Properties over the input domain
// =========================================================================

#[test]
fn test_every_valid_input_resolves() {
    let service = service();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..2_000 {
        let raw = random_valid_input(&mut rng);
        let result = service
            .recommend(&raw)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", raw, e));
        assert!(service.catalog().contains(&result.label));
    }
}

#[test]
fn test_every_artifact_label_is_in_catalog() {
    let classifier = ClassifierArtifact::load(&model_path()).unwrap();
    let catalog = CropCatalog::builtin("assets/images");

    for label in classifier.labels() {
        assert!(catalog.contains(label), "no catalog entry for {}", label);
    }
}

#[test]
fn test_invalid_inputs_report_every_violated_field() {
    let service = service();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let mut raw = random_valid_input(&mut rng);
        let mut expected = Vec::new();

        for feature in Feature::ALL {
            if rng.gen_bool(0.3) {
                let domain = feature.domain();
                let width = domain.max - domain.min;
                let value = if rng.gen_bool(0.5) {
                    domain.min - rng.gen_range(0.01..width)
                } else {
                    domain.max + rng.gen_range(0.01..width)
                };
                raw.set(feature, value);
                expected.push(feature);
            }
        }
        if expected.is_empty() {
            continue;
        }

        match service.recommend(&raw) {
            Err(RecommendError::Validation(e)) => assert_eq!(e.fields(), expected),
            other => panic!("expected validation error for {:?}, got {:?}", raw, other),
        }
    }
}

#[test]
fn test_recommend_is_deterministic() {
    let service = service();
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..200 {
        let raw = random_valid_input(&mut rng);
        let first = serde_json::to_vec(&service.recommend(&raw).unwrap()).unwrap();
        let second = serde_json::to_vec(&service.recommend(&raw).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    // A freshly loaded artifact agrees with the first one
    let other = self::service();
    let raw = RawMeasurements::dashboard_defaults();
    assert_eq!(service.recommend(&raw).unwrap(), other.recommend(&raw).unwrap());
}

#[test]
fn test_boundaries_of_every_field() {
    let service = service();

    for feature in Feature::ALL {
        let domain = feature.domain();

        for edge in [domain.min, domain.max] {
            let mut raw = RawMeasurements::dashboard_defaults();
            raw.set(feature, edge);
            assert!(service.recommend(&raw).is_ok(), "{} = {} rejected", feature.name(), edge);
        }

        for outside in [domain.min - 1.0, domain.max + 1.0] {
            let mut raw = RawMeasurements::dashboard_defaults();
            raw.set(feature, outside);
            match service.recommend(&raw) {
                Err(RecommendError::Validation(e)) => assert_eq!(e.fields(), vec![feature]),
                other => panic!("{} = {} accepted: {:?}", feature.name(), outside, other),
            }
        }
    }
}

// =========================================================================
// Section 3: Start-up wiring
// =========================================================================

#[test]
fn test_config_builds_service_from_shipped_artifact() {
    let config = ServiceConfig {
        model_path: model_path(),
        ..ServiceConfig::default()
    };
    let service = config.build_service().unwrap();
    assert_eq!(service.labels().len(), 22);
}

#[test]
fn test_catalog_override_missing_labels_refuses_to_start() {
    let dir = std::env::temp_dir().join(format!("crop_recommender_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let catalog_path = dir.join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{ "crops": [ { "label": "rice", "description": "Paddy crop", "image_ref": "rice.png" } ] }"#,
    )
    .unwrap();

    let config = ServiceConfig {
        model_path: model_path(),
        catalog_path: Some(catalog_path),
        ..ServiceConfig::default()
    };
    let err = config.build_service().err().unwrap();
    assert!(format!("{:#}", err).contains("missing entries"));

    std::fs::remove_dir_all(&dir).ok();
}
