//! # Recommender
//!
//! Runs the two models in sequence for one submission:
//! 1. Build the crop vector and predict a crop class id
//! 2. Map it through the crop table
//! 3. Build the fertilizer vector, reusing the raw crop id as a feature
//! 4. Scale it with the scaler fit at training time
//! 5. Predict a fertilizer class id and map it through the fertilizer table
//!
//! The recommender holds read-only handles and never mutates them, so a
//! single instance is shared by every request.

use std::sync::Arc;
use std::time::Instant;

use artifact_loader::ModelArtifacts;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{PredictionError, Result};
use crate::features::{crop_features, fertilizer_features};
use crate::inputs::{SoilInput, WeatherInput};
use crate::labels::{ClassId, Label, crop_label, fertilizer_label};
use crate::traits::{Classifier, FeatureScaler};

/// Outcome of one submission; each side renders independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub crop: Label,
    pub fertilizer: Label,
}

/// The two classifiers and the scaler, loaded once at startup
#[derive(Clone)]
pub struct Recommender {
    crop_model: Arc<dyn Classifier>,
    fertilizer_model: Arc<dyn Classifier>,
    scaler: Arc<dyn FeatureScaler>,
}

impl Recommender {
    pub fn new(
        crop_model: Arc<dyn Classifier>,
        fertilizer_model: Arc<dyn Classifier>,
        scaler: Arc<dyn FeatureScaler>,
    ) -> Self {
        Self {
            crop_model,
            fertilizer_model,
            scaler,
        }
    }

    /// Wire the artifacts loaded from disk
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        Self::new(
            Arc::new(artifacts.crop_model),
            Arc::new(artifacts.fertilizer_model),
            Arc::new(artifacts.scaler),
        )
    }

    /// Predict crop and fertilizer for one set of measurements.
    ///
    /// Inputs are expected to be validated already. Unknown class ids are
    /// returned as `Label::Unknown`, not as errors; an `Err` means a model
    /// or the scaler itself failed.
    pub fn recommend(&self, soil: &SoilInput, weather: &WeatherInput) -> Result<Recommendation> {
        let start = Instant::now();

        let crop_vector = crop_features(soil, weather);
        debug!("Crop features: {:?}", crop_vector);
        let crop_id = predict_class(self.crop_model.as_ref(), &crop_vector)?;
        let crop = crop_label(crop_id);
        if !crop.is_known() {
            warn!("{} predicted unknown crop id {}", self.crop_model.name(), crop_id);
        }

        let fertilizer_vector = fertilizer_features(soil, weather, crop_id);
        debug!("Fertilizer features: {:?}", fertilizer_vector);
        let scaled = scale(self.scaler.as_ref(), &fertilizer_vector)?;
        let fertilizer_id = predict_class(self.fertilizer_model.as_ref(), &scaled)?;
        let fertilizer = fertilizer_label(fertilizer_id);
        if !fertilizer.is_known() {
            warn!(
                "{} predicted unknown fertilizer id {}",
                self.fertilizer_model.name(),
                fertilizer_id
            );
        }

        info!(
            "Recommended crop {} / fertilizer {} in {:.2?}",
            label_text(&crop),
            label_text(&fertilizer),
            start.elapsed()
        );
        Ok(Recommendation { crop, fertilizer })
    }
}

fn predict_class(model: &dyn Classifier, features: &[f64]) -> Result<ClassId> {
    ensure_width(model.name(), model.n_features(), features.len())?;

    let raw = model.predict(features)?;
    if !raw.is_finite() {
        return Err(PredictionError::NonFiniteOutput {
            model: model.name().to_string(),
            value: raw,
        });
    }
    // Labels are integral; truncate like an integer cast would
    Ok(raw.trunc() as ClassId)
}

fn scale(scaler: &dyn FeatureScaler, features: &[f64]) -> Result<Vec<f64>> {
    ensure_width(scaler.name(), scaler.n_features(), features.len())?;
    scaler.transform(features)
}

fn ensure_width(model: &str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(PredictionError::FeatureCount {
            model: model.to_string(),
            expected,
            found,
        })
    }
}

fn label_text(label: &Label) -> String {
    match label {
        Label::Known { name, .. } => name.to_string(),
        Label::Unknown { raw_id } => format!("<unknown {}>", raw_id),
    }
}
