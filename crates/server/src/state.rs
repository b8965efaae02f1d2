//! Shared application state.

use std::path::Path;

use anyhow::{Context, Result};
use artifact_loader::ModelArtifacts;
use pipeline::Recommender;

/// State handed to every request; cloning only bumps reference counts
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }

    /// Load the artifacts from `artifacts_dir` and build the recommender.
    ///
    /// Any failure here means the service cannot answer a single request,
    /// so callers should treat it as fatal.
    pub fn load(artifacts_dir: &Path) -> Result<Self> {
        let artifacts = ModelArtifacts::load_from_dir(artifacts_dir)
            .context("Failed to load model artifacts")?;
        Ok(Self::new(Recommender::from_artifacts(artifacts)))
    }
}
