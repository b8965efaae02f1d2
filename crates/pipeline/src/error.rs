//! Error types for the pipeline crate.

use thiserror::Error;

/// Failures of a single recommendation call.
///
/// None of these are recovered: the submission that hit one fails as a
/// whole. An unknown class id is *not* an error, see [`crate::Label`].
#[derive(Error, Debug)]
pub enum PredictionError {
    /// The vector handed to a model or scaler has the wrong width
    #[error("{model} expects {expected} features but received {found}")]
    FeatureCount {
        model: String,
        expected: usize,
        found: usize,
    },

    /// The model produced NaN or infinity instead of a class label
    #[error("{model} returned a non-finite prediction ({value})")]
    NonFiniteOutput { model: String, value: f64 },

    /// Any other failure inside a model or scaler
    #[error("{model} failed: {reason}")]
    Model { model: String, reason: String },
}

/// A submitted value outside the range the form allows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown soil type '{0}' (expected Sandy, Clay or Loamy)")]
    UnknownSoilType(String),
}

pub type Result<T> = std::result::Result<T, PredictionError>;
