//! Classifier - maps a validated feature vector to a crop label
//!
//! The trained model is produced offline and shipped as a JSON artifact:
//! - `artifact`: on-disk format, loading and structural checks
//! - `forest`: decision-forest model (majority vote)
//! - `centroid`: standardised nearest-centroid model

pub mod artifact;
pub mod centroid;
pub mod forest;

pub use artifact::{ClassifierArtifact, ModelSpec, ARTIFACT_FORMAT_VERSION};
pub use centroid::NearestCentroid;
pub use forest::{DecisionForest, DecisionTree, TreeNode};

use crate::features::FeatureVector;

/// Anything that turns a feature vector into a label.
///
/// Implementations must be deterministic: the same vector always yields the
/// same label for the lifetime of the instance.
pub trait Classifier: Send + Sync {
    /// Predicted label. The vector already satisfies its domain invariant.
    fn predict(&self, vector: &FeatureVector) -> &str;

    /// Every label `predict` can return
    fn labels(&self) -> &[String];
}

/// Index of the largest vote, lowest index on ties
pub(crate) fn argmax_votes(votes: &[usize]) -> usize {
    let mut best = 0;
    for (idx, &count) in votes.iter().enumerate() {
        if count > votes[best] {
            best = idx;
        }
    }
    best
}
