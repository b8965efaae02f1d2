//! Reading artifact files from disk.
//!
//! The artifacts directory holds three JSON files with fixed names:
//! - crop_model.json: tree ensemble over `CROP_FEATURES`
//! - fertilizer_model.json: tree ensemble over `FERTILIZER_FEATURES`
//! - scaler.json: scaler over `FERTILIZER_FEATURES`

use crate::error::{ArtifactError, Result};
use crate::types::{Scaler, TreeEnsemble};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const CROP_MODEL_FILE: &str = "crop_model.json";
pub const FERTILIZER_MODEL_FILE: &str = "fertilizer_model.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Locations of the three artifacts inside one directory
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub crop_model: PathBuf,
    pub fertilizer_model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            crop_model: dir.join(CROP_MODEL_FILE),
            fertilizer_model: dir.join(FERTILIZER_MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }

    /// File names of the artifacts that do not exist
    pub fn missing(&self) -> Vec<String> {
        [
            (&self.crop_model, CROP_MODEL_FILE),
            (&self.fertilizer_model, FERTILIZER_MODEL_FILE),
            (&self.scaler, SCALER_FILE),
        ]
        .into_iter()
        .filter(|(path, _)| !path.is_file())
        .map(|(_, name)| name.to_string())
        .collect()
    }

    /// Fail with a single error naming every missing file
    pub fn ensure_present(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ArtifactError::MissingArtifacts {
                dir: self.dir.display().to_string(),
                missing,
            })
        }
    }
}

/// Load and validate a tree ensemble.
///
/// An export without a `name` takes the file stem ("crop_model").
pub fn load_tree_ensemble(path: &Path) -> Result<TreeEnsemble> {
    let mut model: TreeEnsemble = read_json(path)?;
    if model.name.is_empty() {
        model.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
    }
    model.validate()?;

    tracing::debug!(
        "Loaded {} from {}: {} trees, {} classes, {} features",
        model.name,
        path.display(),
        model.trees.len(),
        model.n_classes(),
        model.n_features
    );
    Ok(model)
}

/// Load and validate a scaler
pub fn load_scaler(path: &Path) -> Result<Scaler> {
    let scaler: Scaler = read_json(path)?;
    scaler.validate()?;

    tracing::debug!(
        "Loaded {} scaler from {} ({} columns)",
        scaler.kind(),
        path.display(),
        scaler.n_features()
    );
    Ok(scaler)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_lists_every_absent_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SCALER_FILE), "{}").unwrap();

        let paths = ArtifactPaths::in_dir(dir.path());
        assert_eq!(
            paths.missing(),
            vec![CROP_MODEL_FILE.to_string(), FERTILIZER_MODEL_FILE.to_string()]
        );

        let err = paths.ensure_present().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Model files not found"));
        assert!(message.contains("crop_model.json, fertilizer_model.json"));
    }

    #[test]
    fn test_name_defaults_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CROP_MODEL_FILE);
        fs::write(
            &path,
            r#"{
                "n_features": 1,
                "classes": [0, 1],
                "trees": [{"nodes": [{"type": "leaf", "value": [2, 1]}]}]
            }"#,
        )
        .unwrap();

        let model = load_tree_ensemble(&path).unwrap();
        assert_eq!(model.name, "crop_model");
        assert_eq!(model.predict(&[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCALER_FILE);
        fs::write(&path, r#"{"kind": "robust", "center": []}"#).unwrap();

        let err = load_scaler(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
        assert!(err.to_string().contains("scaler.json"));
    }
}
