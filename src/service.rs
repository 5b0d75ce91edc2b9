//! Prediction Service - the single entry point of the recommender
//!
//! validate → predict → catalog lookup → assemble. Holds only read-only
//! shared resources, so one instance serves any number of concurrent callers
//! without locks.

use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::CropCatalog;
use crate::classifier::Classifier;
use crate::error::{ArtifactLoadError, RecommendError};
use crate::features::{validate, RawMeasurements};

/// Recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: String,
    pub display_name: String,
    pub description: String,
    pub image_ref: String,
}

/// Recommendation pipeline over an injected classifier and catalog
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
    catalog: Arc<CropCatalog>,
}

impl PredictionService {
    /// Wire the pipeline, refusing a catalog that cannot resolve every
    /// label the classifier can emit.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        catalog: Arc<CropCatalog>,
    ) -> Result<Self, ArtifactLoadError> {
        let missing = catalog.missing(classifier.labels().iter().map(String::as_str));
        if !missing.is_empty() {
            return Err(ArtifactLoadError::IncompleteCatalog { missing });
        }

        tracing::info!(
            "Prediction service ready: {} classifier labels, {} catalog entries",
            classifier.labels().len(),
            catalog.len()
        );
        Ok(Self { classifier, catalog })
    }

    /// Recommend a crop for one set of measurements.
    ///
    /// Invalid input fails before inference. A predicted label without a
    /// catalog entry fails after inference and is logged for operators.
    pub fn recommend(&self, raw: &RawMeasurements) -> Result<PredictionResult, RecommendError> {
        let vector = validate(raw)?;

        let label = self.classifier.predict(&vector);
        tracing::debug!("Predicted '{}' for {:?}", label, vector);

        let info = self.catalog.lookup(label).map_err(|e| {
            tracing::error!(
                label = %e.label,
                input = ?vector,
                "Classifier emitted a label with no catalog entry (artifact/catalog version skew)"
            );
            e
        })?;

        Ok(PredictionResult {
            label: label.to_string(),
            display_name: info.display_name.to_string(),
            description: info.description.clone(),
            image_ref: info.image_ref.clone(),
        })
    }

    /// Recommend for many inputs in parallel, preserving input order
    pub fn recommend_batch(
        &self,
        inputs: &[RawMeasurements],
    ) -> Vec<Result<PredictionResult, RecommendError>> {
        inputs.par_iter().map(|raw| self.recommend(raw)).collect()
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Labels the underlying classifier can emit
    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;
    use crate::features::{Feature, FeatureVector};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always answers `label`, while claiming it can only emit `claimed`
    struct FixedClassifier {
        label: String,
        claimed: Vec<String>,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(label: &str, claimed: &[&str]) -> Self {
            Self {
                label: label.to_string(),
                claimed: claimed.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, _vector: &FeatureVector) -> &str {
            self.calls.fetch_add(1, Ordering::SeqCst);
            &self.label
        }

        fn labels(&self) -> &[String] {
            &self.claimed
        }
    }

    fn valid_input() -> RawMeasurements {
        RawMeasurements::new(90.0, 42.0, 43.0, 20.87, 82.00, 6.50, 202.94)
    }

    #[test]
    fn test_assembles_result_from_catalog() {
        let classifier = Arc::new(FixedClassifier::new("jute", &["jute"]));
        let catalog = Arc::new(CropCatalog::builtin("img"));
        let service = PredictionService::new(classifier, catalog).unwrap();

        let result = service.recommend(&valid_input()).unwrap();
        assert_eq!(result.label, "jute");
        assert_eq!(result.display_name, "Jute");
        assert_eq!(result.image_ref, "img/jute.jpg");
        assert!(result.description.starts_with("Jute requires warm, humid climates"));
    }

    #[test]
    fn test_validation_failure_skips_inference() {
        let classifier = Arc::new(FixedClassifier::new("rice", &["rice"]));
        let service =
            PredictionService::new(classifier.clone(), Arc::new(CropCatalog::builtin("img")))
                .unwrap();

        let mut raw = valid_input();
        raw.nitrogen = Some(200.0);
        let err = service.recommend(&raw).unwrap_err();

        match err {
            RecommendError::Validation(v) => {
                assert_eq!(v.fields(), vec![Feature::Nitrogen]);
                assert_eq!(v.violations[0].kind, ViolationKind::AboveMaximum);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_label_keeps_raw_prediction() {
        // Classifier lies about its label set, simulating a skewed deployment
        let classifier = Arc::new(FixedClassifier::new("quinoa", &["rice"]));
        let service =
            PredictionService::new(classifier.clone(), Arc::new(CropCatalog::builtin("img")))
                .unwrap();

        let err = service.recommend(&valid_input()).unwrap_err();
        assert!(!err.is_user_error());
        match err {
            RecommendError::UnknownCrop(e) => assert_eq!(e.label, "quinoa"),
            other => panic!("expected unknown crop, got {:?}", other),
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_incomplete_catalog_refused_at_construction() {
        let classifier = Arc::new(FixedClassifier::new("rice", &["rice", "quinoa", "teff"]));
        let err = PredictionService::new(classifier, Arc::new(CropCatalog::builtin("img")))
            .err()
            .unwrap();

        match err {
            ArtifactLoadError::IncompleteCatalog { missing } => {
                assert_eq!(missing, vec!["quinoa".to_string(), "teff".to_string()]);
            }
            other => panic!("expected incomplete catalog, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let classifier = Arc::new(FixedClassifier::new("maize", &["maize"]));
        let service = PredictionService::new(classifier, Arc::new(CropCatalog::builtin("img")))
            .unwrap();

        let mut bad = valid_input();
        bad.ph = None;
        let results = service.recommend_batch(&[valid_input(), bad, valid_input()]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(RecommendError::Validation(_))));
        assert_eq!(results[2].as_ref().unwrap().label, "maize");
    }
}
