//! # Artifact Loader Crate
//!
//! This crate loads the pre-trained artifacts the recommender runs on: the
//! crop classifier, the fertilizer classifier and the fertilizer feature
//! scaler. Training happens elsewhere; this crate only reads the exported
//! JSON, checks it, and evaluates it.
//!
//! ## Main Components
//!
//! - **types**: Artifact formats (TreeEnsemble, Scaler) and feature layouts
//! - **ensemble**: Tree-ensemble validation and prediction
//! - **scaler**: Scaler validation and transform
//! - **loader**: File names and JSON loading
//! - **error**: Error types for loading and evaluation
//!
//! ## Example Usage
//!
//! ```ignore
//! use artifact_loader::ModelArtifacts;
//! use std::path::Path;
//!
//! let artifacts = ModelArtifacts::load_from_dir(Path::new("models"))?;
//! let label = artifacts.crop_model.predict(&[50.0, 50.0, 50.0, 25.0, 60.0, 6.5, 100.0])?;
//! ```

pub mod ensemble;
pub mod error;
pub mod loader;
pub mod scaler;
pub mod types;

use std::path::Path;

pub use error::{ArtifactError, Result};
pub use loader::{ArtifactPaths, CROP_MODEL_FILE, FERTILIZER_MODEL_FILE, SCALER_FILE};
pub use types::{
    CROP_FEATURES, DecisionTree, FERTILIZER_FEATURES, Scaler, TreeEnsemble, TreeNode,
};

/// Everything loaded from the artifacts directory at startup.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub crop_model: TreeEnsemble,
    pub fertilizer_model: TreeEnsemble,
    pub scaler: Scaler,
}

impl ModelArtifacts {
    /// Load all three artifacts from `dir`.
    ///
    /// ## Steps
    /// 1. Report every missing file at once
    /// 2. Parse and structurally validate each artifact
    /// 3. Check each artifact against the feature layout it must consume
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        tracing::info!("Loading model artifacts from {}", dir.display());

        let paths = ArtifactPaths::in_dir(dir);
        paths.ensure_present()?;

        let crop_model = loader::load_tree_ensemble(&paths.crop_model)?;
        let fertilizer_model = loader::load_tree_ensemble(&paths.fertilizer_model)?;
        let scaler = loader::load_scaler(&paths.scaler)?;

        let artifacts = Self {
            crop_model,
            fertilizer_model,
            scaler,
        };
        artifacts.check_layouts()?;

        tracing::info!(
            "Loaded crop model ({} trees), fertilizer model ({} trees), {} scaler",
            artifacts.crop_model.trees.len(),
            artifacts.fertilizer_model.trees.len(),
            artifacts.scaler.kind()
        );
        Ok(artifacts)
    }

    /// Verify widths (and column names, when exported) against the layouts
    /// the feature vectors are built in.
    pub fn check_layouts(&self) -> Result<()> {
        check_model_layout(&self.crop_model, &CROP_FEATURES)?;
        check_model_layout(&self.fertilizer_model, &FERTILIZER_FEATURES)?;

        if self.scaler.n_features() != FERTILIZER_FEATURES.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                artifact: "scaler".to_string(),
                expected: FERTILIZER_FEATURES.len(),
                found: self.scaler.n_features(),
            });
        }
        Ok(())
    }
}

fn check_model_layout(model: &TreeEnsemble, layout: &[&str]) -> Result<()> {
    if model.n_features != layout.len() {
        return Err(ArtifactError::FeatureCountMismatch {
            artifact: model.name.clone(),
            expected: layout.len(),
            found: model.n_features,
        });
    }

    if let Some(names) = &model.feature_names {
        if names.iter().map(String::as_str).ne(layout.iter().copied()) {
            return Err(ArtifactError::invalid(
                model.name.as_str(),
                format!(
                    "feature order [{}] does not match [{}]",
                    names.join(", "),
                    layout.join(", ")
                ),
            ));
        }
    }
    Ok(())
}
