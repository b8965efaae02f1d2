//! Evaluation and validation of tree-ensemble classifiers.

use crate::error::{ArtifactError, Result};
use crate::types::{DecisionTree, TreeEnsemble, TreeNode};

impl TreeEnsemble {
    /// Number of classes the model can emit
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Check the structure so that `predict` can never index out of bounds
    /// or loop.
    ///
    /// Children must come after their parent in the node list, which is how
    /// scikit-learn lays trees out and what guarantees traversal terminates.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();

        if self.n_features == 0 {
            return Err(ArtifactError::invalid(name, "n_features must be positive"));
        }
        if self.classes.is_empty() {
            return Err(ArtifactError::invalid(name, "no classes"));
        }
        if let Some(label) = self.classes.iter().find(|c| !c.is_finite()) {
            return Err(ArtifactError::invalid(
                name,
                format!("class label {} is not finite", label),
            ));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid(name, "no trees"));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features {
                return Err(ArtifactError::invalid(
                    name,
                    format!(
                        "{} feature names for {} features",
                        names.len(),
                        self.n_features
                    ),
                ));
            }
        }

        for (tree_idx, tree) in self.trees.iter().enumerate() {
            self.validate_tree(tree_idx, tree)?;
        }
        Ok(())
    }

    fn validate_tree(&self, tree_idx: usize, tree: &DecisionTree) -> Result<()> {
        let name = self.name.as_str();
        let len = tree.nodes.len();
        if len == 0 {
            return Err(ArtifactError::invalid(
                name,
                format!("tree {} has no nodes", tree_idx),
            ));
        }

        for (idx, node) in tree.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= self.n_features {
                        return Err(ArtifactError::invalid(
                            name,
                            format!(
                                "tree {} node {} splits on feature {} of {}",
                                tree_idx, idx, feature, self.n_features
                            ),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::invalid(
                            name,
                            format!("tree {} node {} has a non-finite threshold", tree_idx, idx),
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(ArtifactError::invalid(
                                name,
                                format!(
                                    "tree {} node {} points to child {} (nodes: {})",
                                    tree_idx, idx, child, len
                                ),
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != self.classes.len() {
                        return Err(ArtifactError::invalid(
                            name,
                            format!(
                                "tree {} leaf {} has {} weights for {} classes",
                                tree_idx,
                                idx,
                                value.len(),
                                self.classes.len()
                            ),
                        ));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(ArtifactError::invalid(
                            name,
                            format!(
                                "tree {} leaf {} has a non-finite or negative weight",
                                tree_idx, idx
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict the class label for one feature vector.
    ///
    /// ## Algorithm
    /// 1. Walk every tree from the root to a leaf
    /// 2. Normalize each leaf's weights into a distribution
    /// 3. Average the distributions across trees
    /// 4. Return the label with the highest mean probability (first wins ties)
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let proba = self.predict_proba(features)?;

        let mut best = 0;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }
        Ok(self.classes[best])
    }

    /// Mean class distribution across all trees, aligned with `classes`
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(ArtifactError::FeatureCountMismatch {
                artifact: self.name.clone(),
                expected: self.n_features,
                found: features.len(),
            });
        }

        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let value = tree.leaf_for(features);
            let sum: f64 = value.iter().sum();
            if sum > 0.0 {
                for (total, weight) in totals.iter_mut().zip(value) {
                    *total += weight / sum;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        for total in totals.iter_mut() {
            *total /= n_trees;
        }
        Ok(totals)
    }
}

impl DecisionTree {
    /// Leaf weights reached by `features`. Assumes a validated tree.
    fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}
