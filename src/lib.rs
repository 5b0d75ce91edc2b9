//! Crop Recommender
//!
//! Turns seven soil/climate measurements into a recommended crop.
//!
//! Pipeline, leaf-first:
//! - `features`: measurement domains and the validating constructor
//! - `classifier`: trained model loaded from a JSON artifact
//! - `catalog`: crop label → description and image reference
//! - `service`: validate → predict → lookup, the single entry point
//!
//! The HTTP surface lives in `api_server` behind the `api` feature.

pub mod error;
pub mod features;
pub mod classifier;
pub mod catalog;
pub mod service;
pub mod config;
pub mod api_server;

// Re-export commonly used types
pub use error::{ArtifactLoadError, RecommendError, UnknownCropError, ValidationError, Violation, ViolationKind};
pub use features::{validate, Feature, FeatureDomain, FeatureVector, RawMeasurements};
pub use classifier::{Classifier, ClassifierArtifact};
pub use catalog::{Crop, CropCatalog, CropInfo};
pub use service::{PredictionResult, PredictionService};
pub use config::ServiceConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
