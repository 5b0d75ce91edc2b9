//! Crop Catalog - label to display metadata
//!
//! O(1) FxHashMap lookups keyed by the closed `Crop` enumeration. Built once
//! at start-up (from the embedded table or a JSON override) and read-only
//! afterwards.

pub mod crops;

pub use crops::{Crop, UnknownLabel};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ArtifactLoadError, UnknownCropError};

/// Display metadata for one crop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropInfo {
    pub crop: Crop,
    pub display_name: &'static str,
    pub description: String,
    pub image_ref: String,
}

/// Immutable label → metadata table
#[derive(Debug, Clone)]
pub struct CropCatalog {
    entries: FxHashMap<Crop, CropInfo>,
}

/// On-disk catalog override
#[derive(Debug, Deserialize)]
struct CatalogFile {
    crops: Vec<CatalogFileEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFileEntry {
    label: String,
    description: String,
    image_ref: String,
}

impl CropCatalog {
    /// Embedded descriptions for every known crop.
    ///
    /// Images are expected at `<image_dir>/<label>.jpg`.
    pub fn builtin(image_dir: &str) -> Self {
        let image_dir = image_dir.trim_end_matches('/');
        let entries = Crop::ALL
            .iter()
            .map(|&crop| {
                let info = CropInfo {
                    crop,
                    display_name: crop.display_name(),
                    description: crop.description().to_string(),
                    image_ref: format!("{}/{}.jpg", image_dir, crop.label()),
                };
                (crop, info)
            })
            .collect();

        Self { entries }
    }

    /// Load a catalog from a JSON file of `{label, description, image_ref}` entries
    pub fn from_json_file(path: &Path) -> Result<Self, ArtifactLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile =
            serde_json::from_str(&contents).map_err(|source| ArtifactLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_entries(file.crops)?;
        tracing::info!("Loaded crop catalog from {:?} ({} crops)", path, catalog.len());
        Ok(catalog)
    }

    fn from_entries(raw: Vec<CatalogFileEntry>) -> Result<Self, ArtifactLoadError> {
        let mut entries = FxHashMap::default();

        for entry in raw {
            let crop = entry.label.parse::<Crop>().map_err(|UnknownLabel(label)| {
                ArtifactLoadError::invalid("catalog", format!("unknown crop label '{}'", label))
            })?;

            if entry.description.trim().is_empty() {
                return Err(ArtifactLoadError::invalid(
                    "catalog",
                    format!("empty description for '{}'", crop),
                ));
            }

            let info = CropInfo {
                crop,
                display_name: crop.display_name(),
                description: entry.description,
                image_ref: entry.image_ref,
            };

            if entries.insert(crop, info).is_some() {
                return Err(ArtifactLoadError::invalid(
                    "catalog",
                    format!("duplicate entry for '{}'", crop),
                ));
            }
        }

        Ok(Self { entries })
    }

    /// Resolve a classifier label to its metadata
    pub fn lookup(&self, label: &str) -> Result<&CropInfo, UnknownCropError> {
        label
            .parse::<Crop>()
            .ok()
            .and_then(|crop| self.entries.get(&crop))
            .ok_or_else(|| UnknownCropError { label: label.to_string() })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_ok()
    }

    /// Entries in `Crop` declaration order
    pub fn iter(&self) -> impl Iterator<Item = &CropInfo> {
        Crop::ALL.iter().filter_map(|crop| self.entries.get(crop))
    }

    /// Labels from `labels` that have no entry here
    pub fn missing<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        labels
            .into_iter()
            .filter(|label| !self.contains(label))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
