//! Start-up configuration
//!
//! Read once from environment variables by the binaries:
//! - `MODEL_PATH`: classifier artifact (default `assets/models/crop_model.json`)
//! - `CATALOG_PATH`: optional JSON catalog replacing the embedded one
//! - `IMAGE_DIR`: prefix for embedded image references (default `assets/images`)
//! - `PORT`: HTTP port for the API server (default 3000)

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::CropCatalog;
use crate::classifier::ClassifierArtifact;
use crate::service::PredictionService;

pub const DEFAULT_MODEL_PATH: &str = "assets/models/crop_model.json";
pub const DEFAULT_IMAGE_DIR: &str = "assets/images";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub model_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub image_dir: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            catalog_path: None,
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let model_path = lookup("MODEL_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let image_dir = lookup("IMAGE_DIR")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.image_dir);

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { model_path, catalog_path, image_dir, port }
    }

    /// Load artifact and catalog, then wire the service.
    ///
    /// Any error here means the process must not serve.
    pub fn build_service(&self) -> Result<PredictionService> {
        tracing::info!("Loading classifier artifact from {:?}", self.model_path);
        let classifier = ClassifierArtifact::load(&self.model_path)
            .with_context(|| format!("Failed to load classifier: {:?}", self.model_path))?;

        let catalog = match &self.catalog_path {
            Some(path) => CropCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load crop catalog: {:?}", path))?,
            None => {
                tracing::info!("Using embedded crop catalog (images under {})", self.image_dir);
                CropCatalog::builtin(&self.image_dir)
            }
        };

        let service = PredictionService::new(Arc::new(classifier), Arc::new(catalog))
            .context("Classifier and catalog are out of sync")?;
        Ok(service)
    }
}
