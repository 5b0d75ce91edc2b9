//! Decision forest
//!
//! Trees are stored as flat node arrays. A split sends the sample left when
//! `x[feature] <= threshold`. Each tree votes for the class of the leaf it
//! reaches; the forest returns the most voted class.

use serde::Deserialize;

use crate::error::ArtifactLoadError;
use crate::features::FEATURE_COUNT;

use super::argmax_votes;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionForest {
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    /// Structural checks so that `leaf_class` always terminates in bounds.
    ///
    /// Children must point strictly forward, which rules out cycles.
    fn check(&self, tree_idx: usize, n_classes: usize) -> Result<(), ArtifactLoadError> {
        let fail = |node: usize, reason: String| {
            ArtifactLoadError::invalid(
                "classifier artifact",
                format!("tree {} node {}: {}", tree_idx, node, reason),
            )
        };

        if self.nodes.is_empty() {
            return Err(ArtifactLoadError::invalid(
                "classifier artifact",
                format!("tree {} has no nodes", tree_idx),
            ));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if feature >= FEATURE_COUNT {
                        return Err(fail(idx, format!("feature index {} out of range", feature)));
                    }
                    if !threshold.is_finite() {
                        return Err(fail(idx, "threshold is not finite".to_string()));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(fail(idx, format!("child index {} out of order", child)));
                        }
                    }
                }
                TreeNode::Leaf { class } => {
                    if class >= n_classes {
                        return Err(fail(idx, format!("class index {} out of range", class)));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn leaf_class(&self, x: &[f64; FEATURE_COUNT]) -> usize {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { class } => return class,
            }
        }
    }
}

impl DecisionForest {
    pub fn check(&self, n_classes: usize) -> Result<(), ArtifactLoadError> {
        if self.trees.is_empty() {
            return Err(ArtifactLoadError::invalid("classifier artifact", "forest has no trees"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.check(idx, n_classes)?;
        }
        Ok(())
    }

    pub fn predict_index(&self, x: &[f64; FEATURE_COUNT], n_classes: usize) -> usize {
        let mut votes = vec![0usize; n_classes];
        for tree in &self.trees {
            votes[tree.leaf_class(x)] += 1;
        }
        argmax_votes(&votes)
    }
}
