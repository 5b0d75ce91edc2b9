//! Standardised nearest-centroid model
//!
//! Each class is summarised by one centroid in feature space. Distances are
//! computed after dividing every axis by its `scale`, so rainfall in mm does
//! not drown out pH.

use serde::Deserialize;

use crate::error::ArtifactLoadError;
use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearestCentroid {
    /// Per-feature divisor (typically the training standard deviation)
    pub scale: [f64; FEATURE_COUNT],
    /// One centroid per class, in class order
    pub centroids: Vec<[f64; FEATURE_COUNT]>,
}

impl NearestCentroid {
    pub fn check(&self, n_classes: usize) -> Result<(), ArtifactLoadError> {
        if self.centroids.len() != n_classes {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!("{} centroids for {} classes", self.centroids.len(), n_classes),
            ));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                "scale values must be finite and positive",
            ));
        }
        if let Some(idx) = self
            .centroids
            .iter()
            .position(|c| c.iter().any(|v| !v.is_finite()))
        {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!("centroid {} has non-finite values", idx),
            ));
        }
        Ok(())
    }

    fn squared_distance(&self, x: &[f64; FEATURE_COUNT], centroid: &[f64; FEATURE_COUNT]) -> f64 {
        x.iter()
            .zip(centroid)
            .zip(&self.scale)
            .map(|((xi, ci), si)| {
                let d = (xi - ci) / si;
                d * d
            })
            .sum()
    }

    /// Index of the closest centroid, lowest index on ties
    pub fn predict_index(&self, x: &[f64; FEATURE_COUNT]) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, centroid) in self.centroids.iter().enumerate() {
            let d = self.squared_distance(x, centroid);
            if d < best_distance {
                best = idx;
                best_distance = d;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_class() -> NearestCentroid {
        NearestCentroid {
            scale: [10.0, 1.0, 1.0, 1.0, 1.0, 1.0, 100.0],
            centroids: vec![[0.0; FEATURE_COUNT], [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0]],
        }
    }

    #[test]
    fn test_distance_is_scaled() {
        let model = two_class();
        let x = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0];
        // One unit along N and one along rainfall after scaling
        assert_relative_eq!(model.squared_distance(&x, &model.centroids[0]), 2.0);
        assert_relative_eq!(model.squared_distance(&x, &model.centroids[1]), 0.0);
    }

    #[test]
    fn test_nearest_wins_and_ties_prefer_lowest() {
        let model = two_class();
        assert_eq!(model.predict_index(&[9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 90.0]), 1);
        assert_eq!(model.predict_index(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]), 0);
        // Exactly half-way
        assert_eq!(model.predict_index(&[5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50.0]), 0);
    }

    #[test]
    fn test_check() {
        let model = two_class();
        assert!(model.check(2).is_ok());
        assert!(model.check(3).is_err());

        let mut zero_scale = two_class();
        zero_scale.scale[3] = 0.0;
        assert!(zero_scale.check(2).is_err());

        let mut nan_centroid = two_class();
        nan_centroid.centroids[1][4] = f64::NAN;
        assert!(nan_centroid.check(2).is_err());
    }
}
