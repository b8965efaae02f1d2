//! Recommendation pipeline: from form inputs to named predictions.
//!
//! This crate provides:
//! - Input types with the ranges the form enforces
//! - Feature vector builders for both models
//! - Static crop and fertilizer lookup tables
//! - Classifier/FeatureScaler traits and the Recommender that chains them
//!
//! ## Architecture
//! A submission flows through in stages:
//! 1. Inputs are validated (`SoilInput::validate`, `WeatherInput::validate`)
//! 2. The crop vector is classified and mapped to a crop label
//! 3. The fertilizer vector, which includes the crop class id, is scaled,
//!    classified and mapped to a fertilizer label
//!
//! ## Example Usage
//! ```ignore
//! use artifact_loader::ModelArtifacts;
//! use pipeline::{Recommender, SoilInput, WeatherInput};
//!
//! let artifacts = ModelArtifacts::load_from_dir(Path::new("models"))?;
//! let recommender = Recommender::from_artifacts(artifacts);
//!
//! let rec = recommender.recommend(&SoilInput::default(), &WeatherInput::default())?;
//! println!("{:?} / {:?}", rec.crop.name(), rec.fertilizer.name());
//! ```

pub mod error;
pub mod features;
pub mod inputs;
pub mod labels;
pub mod recommender;
pub mod traits;

// Re-export main types
pub use error::{InputError, PredictionError};
pub use features::{crop_features, fertilizer_features};
pub use inputs::{SoilInput, SoilType, WeatherInput};
pub use labels::{CROPS, ClassId, FERTILIZERS, Label, LabelTable, crop_label, fertilizer_label};
pub use recommender::{Recommendation, Recommender};
pub use traits::{Classifier, FeatureScaler};
