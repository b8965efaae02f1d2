//! Core traits for the prediction seams.
//!
//! The recommender only sees these two traits, so the loaded artifacts and
//! test doubles are interchangeable.

use artifact_loader::{ArtifactError, Scaler, TreeEnsemble};

use crate::error::{PredictionError, Result};

/// A fitted classifier over a fixed-width feature vector.
///
/// ## Design Note
/// - `Send + Sync` so one loaded model can serve concurrent requests
/// - `predict` returns the raw label; turning it into a class id is the
///   caller's job
pub trait Classifier: Send + Sync {
    /// Returns the name of this model (for logging/errors)
    fn name(&self) -> &str;

    /// Width of the vectors `predict` accepts
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// A fitted transform applied to feature vectors before prediction
pub trait FeatureScaler: Send + Sync {
    fn name(&self) -> &str;

    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

impl Classifier for TreeEnsemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        TreeEnsemble::predict(self, features).map_err(|e| from_artifact(&self.name, e))
    }
}

impl FeatureScaler for Scaler {
    fn name(&self) -> &str {
        "scaler"
    }

    fn n_features(&self) -> usize {
        Scaler::n_features(self)
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        Scaler::transform(self, features).map_err(|e| from_artifact("scaler", e))
    }
}

fn from_artifact(model: &str, err: ArtifactError) -> PredictionError {
    match err {
        ArtifactError::FeatureCountMismatch {
            expected, found, ..
        } => PredictionError::FeatureCount {
            model: model.to_string(),
            expected,
            found,
        },
        other => PredictionError::Model {
            model: model.to_string(),
            reason: other.to_string(),
        },
    }
}
