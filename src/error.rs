//! Error taxonomy for the recommendation pipeline
//!
//! Three failure families with very different audiences:
//! - `ValidationError`: the caller sent measurements outside the known domain
//! - `ArtifactLoadError`: the classifier or catalog could not be initialised
//! - `UnknownCropError`: the classifier emitted a label the catalog cannot resolve

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::features::Feature;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    BelowMinimum,
    AboveMaximum,
    Missing,
    NotFinite,
}

/// One rejected field, with the bound it crossed
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: Feature,
    pub value: Option<f64>,
    pub kind: ViolationKind,
}

impl Violation {
    /// Human-readable bound, e.g. `"140 (max)"`.
    ///
    /// `None` for a missing field: there is no bound to cite.
    pub fn violated_bound(&self) -> Option<String> {
        let domain = self.field.domain();
        match self.kind {
            ViolationKind::BelowMinimum => Some(format!("{} (min)", domain.min)),
            ViolationKind::AboveMaximum => Some(format!("{} (max)", domain.max)),
            ViolationKind::NotFinite => Some(format!("{}..{}", domain.min, domain.max)),
            ViolationKind::Missing => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.value) {
            (ViolationKind::Missing, _) | (_, None) => {
                write!(f, "{}: missing", self.field.name())
            }
            (_, Some(value)) => write!(
                f,
                "{} = {} violates {}",
                self.field.name(),
                value,
                self.violated_bound().unwrap_or_default()
            ),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Violation", 4)?;
        s.serialize_field("field", self.field.name())?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("violated_bound", &self.violated_bound())?;
        s.end()
    }
}

/// Every out-of-domain field of one input, in field order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Fields that failed, in field order
    pub fn fields(&self) -> Vec<Feature> {
        self.violations.iter().map(|v| v.field).collect()
    }

    /// Violation for a given field, if that field failed
    pub fn violation(&self, field: Feature) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s): ", self.violations.len())?;
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Classifier or catalog failed to initialise. Fatal at start-up.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON that breaks a structural rule of the artifact or catalog
    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },

    /// Labels the classifier can emit but the catalog cannot resolve
    #[error("catalog is missing entries for classifier labels: {}", missing.join(", "))]
    IncompleteCatalog { missing: Vec<String> },
}

impl ArtifactLoadError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        ArtifactLoadError::Invalid { what, reason: reason.into() }
    }
}

/// The classifier produced a label with no catalog entry.
///
/// Indicates version skew between artifact and catalog, never a user mistake.
/// The raw label is kept for operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no catalog entry for predicted label '{label}'")]
pub struct UnknownCropError {
    pub label: String,
}

/// Failure of a single `recommend` call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnknownCrop(#[from] UnknownCropError),
}

impl RecommendError {
    /// True when the caller can fix the request and retry
    pub fn is_user_error(&self) -> bool {
        matches!(self, RecommendError::Validation(_))
    }
}
