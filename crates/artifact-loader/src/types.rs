//! Serialized artifact formats produced by the training pipeline.
//!
//! This module defines the on-disk shapes of the two classifiers and the
//! feature scaler. The shapes mirror what scikit-learn exposes on a fitted
//! estimator (`classes_`, `tree_.feature`, `mean_`, `scale_`, ...), exported
//! as JSON so they can be read without a Python runtime.
//!
//! Evaluation lives next door in `ensemble` and `scaler`; this file is
//! only data.

use serde::{Deserialize, Serialize};

// =============================================================================
// Feature layouts
// =============================================================================
// The column order each artifact was fit on. Vectors built at inference time
// must follow these exactly.

/// Columns of the crop model, in training order
pub const CROP_FEATURES: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Columns of the fertilizer model and scaler, in training order
///
/// `crop` is the class id predicted by the crop model.
pub const FERTILIZER_FEATURES: [&str; 8] = [
    "temperature",
    "humidity",
    "moisture",
    "soil_type",
    "crop",
    "N",
    "K",
    "P",
];

// =============================================================================
// Classifiers
// =============================================================================

/// A fitted tree-ensemble classifier (random forest, extra trees, or a
/// single decision tree stored as an ensemble of one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    /// Display name; filled from the file stem when the export omits it
    #[serde(default)]
    pub name: String,

    /// Width of the feature vectors this model was fit on
    pub n_features: usize,

    /// Optional column names, checked against the expected layout on load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// Class labels; a leaf's `value[i]` is the weight of `classes[i]`
    pub classes: Vec<f64>,

    pub trees: Vec<DecisionTree>,
}

/// One tree, stored as a flat node list with the root at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// A node of a decision tree
///
/// Samples with `x[feature] <= threshold` go to `left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Per-class weights (sample counts or fractions)
        value: Vec<f64>,
    },
}

// =============================================================================
// Scaler
// =============================================================================

/// A fitted per-column transform replayed on fertilizer features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`, as scikit-learn's `StandardScaler`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`, as scikit-learn's `MinMaxScaler`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}
