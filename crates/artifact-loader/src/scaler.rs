//! Replaying a fitted scaler on raw feature vectors.

use crate::error::{ArtifactError, Result};
use crate::types::Scaler;

const ARTIFACT: &str = "scaler";

impl Scaler {
    /// Short name of the transform, as written in the artifact's `kind`
    pub fn kind(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
        }
    }

    /// Width of the vectors this scaler was fit on
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { scale, .. } | Scaler::MinMax { scale, .. } => scale.len(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (offsets, scale) = match self {
            Scaler::Standard { mean, scale } => (mean, scale),
            Scaler::MinMax { min, scale } => (min, scale),
        };

        if scale.is_empty() {
            return Err(ArtifactError::invalid(ARTIFACT, "no columns"));
        }
        if offsets.len() != scale.len() {
            return Err(ArtifactError::invalid(
                ARTIFACT,
                format!(
                    "{} offsets for {} scale factors",
                    offsets.len(),
                    scale.len()
                ),
            ));
        }
        if offsets.iter().chain(scale).any(|v| !v.is_finite()) {
            return Err(ArtifactError::invalid(ARTIFACT, "non-finite parameter"));
        }
        Ok(())
    }

    /// Apply the transform column by column.
    ///
    /// A zero standard-deviation column is passed through centered but
    /// unscaled, matching scikit-learn.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(ArtifactError::FeatureCountMismatch {
                artifact: ARTIFACT.to_string(),
                expected,
                found: features.len(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Scaler::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (lo, s))| x * s + lo)
                .collect(),
        };
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_scaler() {
        let scaler = Scaler::Standard {
            mean: vec![10.0, 0.0, 5.0],
            scale: vec![2.0, 1.0, 0.0],
        };
        scaler.validate().unwrap();

        let out = scaler.transform(&[14.0, -3.0, 8.0]).unwrap();
        assert_relative_eq!(out[0], 2.0);
        assert_relative_eq!(out[1], -3.0);
        // zero scale only centers
        assert_relative_eq!(out[2], 3.0);
    }

    #[test]
    fn test_min_max_scaler() {
        // Fit on a column spanning [20, 60] → scale 1/40, min -0.5
        let scaler = Scaler::MinMax {
            min: vec![-0.5],
            scale: vec![0.025],
        };
        let out = scaler.transform(&[40.0]).unwrap();
        assert_relative_eq!(out[0], 0.5);
        assert_eq!(scaler.kind(), "min_max");
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = Scaler::Standard {
            mean: vec![0.0; 8],
            scale: vec![1.0; 8],
        };
        assert!(scaler.transform(&[1.0; 7]).is_err());
        assert_eq!(scaler.transform(&[1.0; 8]).unwrap(), vec![1.0; 8]);
    }

    #[test]
    fn test_validate_rejects_ragged_parameters() {
        let scaler = Scaler::Standard {
            mean: vec![0.0; 7],
            scale: vec![1.0; 8],
        };
        assert!(scaler.validate().is_err());

        let scaler = Scaler::MinMax {
            min: vec![f64::NAN],
            scale: vec![1.0],
        };
        assert!(scaler.validate().is_err());
    }
}
