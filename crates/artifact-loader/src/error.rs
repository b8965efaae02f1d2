//! Error types for the artifact-loader crate.
//!
//! Every failure here happens at startup, before any request is served,
//! so each variant names the file or artifact it concerns.

use thiserror::Error;

/// Errors that can occur while loading, validating or evaluating artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// One or more of the required artifact files is absent
    ///
    /// All missing files are reported together so the operator can fix
    /// the directory in one pass.
    #[error(
        "Model files not found in {dir}: {}. Please ensure 'crop_model.json', 'fertilizer_model.json', and 'scaler.json' are in the artifacts directory.",
        .missing.join(", ")
    )]
    MissingArtifacts { dir: String, missing: Vec<String> },

    /// I/O error occurred while reading an artifact
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for its expected shape
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but is structurally unusable
    #[error("Invalid artifact {artifact}: {reason}")]
    Invalid { artifact: String, reason: String },

    /// A feature vector does not have the width the artifact was fit on
    #[error("{artifact} expects {expected} features but received {found}")]
    FeatureCountMismatch {
        artifact: String,
        expected: usize,
        found: usize,
    },
}

impl ArtifactError {
    pub(crate) fn invalid(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ArtifactError>;
