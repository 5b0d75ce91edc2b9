//! Classifier Artifact - the trained model as shipped by the training pipeline
//!
//! JSON layout:
//! ```json
//! {
//!   "format_version": 1,
//!   "feature_names": ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"],
//!   "classes": ["apple", "banana"],
//!   "model": { "nearest_centroid": { "scale": [..], "centroids": [[..], [..]] } }
//! }
//! ```
//! `model` may instead be `{"random_forest": {"trees": [..]}}`.
//!
//! Loaded once at start-up and never mutated. Any failure here is an
//! `ArtifactLoadError` and must stop the process from serving.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::ArtifactLoadError;
use crate::features::{Feature, FeatureVector};

use super::centroid::NearestCentroid;
use super::forest::DecisionForest;
use super::Classifier;

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest(DecisionForest),
    NearestCentroid(NearestCentroid),
}

impl ModelSpec {
    fn kind(&self) -> &'static str {
        match self {
            ModelSpec::RandomForest(_) => "random_forest",
            ModelSpec::NearestCentroid(_) => "nearest_centroid",
        }
    }
}

/// Immutable trained model.
///
/// Deserialising runs the same structural checks as `load`, so a value of
/// this type can always predict.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ArtifactFile")]
pub struct ClassifierArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    classes: Vec<String>,
    model: ModelSpec,
}

/// Unchecked on-disk layout
#[derive(Debug, Deserialize)]
struct ArtifactFile {
    format_version: u32,
    feature_names: Vec<String>,
    classes: Vec<String>,
    model: ModelSpec,
}

impl TryFrom<ArtifactFile> for ClassifierArtifact {
    type Error = ArtifactLoadError;

    fn try_from(file: ArtifactFile) -> Result<Self, Self::Error> {
        let artifact = Self {
            format_version: file.format_version,
            feature_names: file.feature_names,
            classes: file.classes,
            model: file.model,
        };
        artifact.check()?;
        Ok(artifact)
    }
}

impl ClassifierArtifact {
    /// Read, parse and check an artifact file
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact = Self::from_json(&contents).map_err(|e| match e {
            ArtifactLoadError::Parse { source, .. } => ArtifactLoadError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        tracing::info!(
            "Loaded {} classifier from {:?} ({} classes)",
            artifact.model.kind(),
            path,
            artifact.classes.len()
        );
        Ok(artifact)
    }

    /// Parse and check an artifact held in memory
    pub fn from_json(json: &str) -> Result<Self, ArtifactLoadError> {
        let file: ArtifactFile =
            serde_json::from_str(json).map_err(|source| ArtifactLoadError::Parse {
                path: "<memory>".into(),
                source,
            })?;
        Self::try_from(file)
    }

    /// Assemble an artifact from parts, applying the same checks as `load`
    pub fn new(classes: Vec<String>, model: ModelSpec) -> Result<Self, ArtifactLoadError> {
        let artifact = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: Feature::ALL.iter().map(|f| f.column().to_string()).collect(),
            classes,
            model,
        };
        artifact.check()?;
        Ok(artifact)
    }

    fn check(&self) -> Result<(), ArtifactLoadError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!(
                    "unsupported format_version {} (expected {})",
                    self.format_version, ARTIFACT_FORMAT_VERSION
                ),
            ));
        }

        let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.column()).collect();
        if self.feature_names != expected {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!(
                    "feature_names {:?} do not match expected column order {:?}",
                    self.feature_names, expected
                ),
            ));
        }

        if self.classes.is_empty() {
            return Err(ArtifactLoadError::invalid("classifier artifact", "no classes"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!("duplicate class '{}'", dup),
            ));
        }

        match &self.model {
            ModelSpec::RandomForest(forest) => forest.check(self.classes.len()),
            ModelSpec::NearestCentroid(centroid) => centroid.check(self.classes.len()),
        }
    }

    pub fn model(&self) -> &ModelSpec {
        &self.model
    }
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, vector: &FeatureVector) -> &str {
        let x = vector.as_array();
        let idx = match &self.model {
            ModelSpec::RandomForest(forest) => forest.predict_index(&x, self.classes.len()),
            ModelSpec::NearestCentroid(centroid) => centroid.predict_index(&x),
        };
        &self.classes[idx]
    }

    fn labels(&self) -> &[String] {
        &self.classes
    }
}
