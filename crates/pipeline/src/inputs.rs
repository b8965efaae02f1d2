//! Form inputs: soil and weather measurements.
//!
//! Ranges here are the single source for both the HTML form constraints
//! and the server-side re-check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::InputError;

// =============================================================================
// Allowed ranges
// =============================================================================

pub const NUTRIENT_RANGE: RangeInclusive<u16> = 0..=200;
pub const PH_RANGE: RangeInclusive<f64> = 0.0..=14.0;
pub const MOISTURE_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=60.0;
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const RAINFALL_RANGE: RangeInclusive<f64> = 0.0..=500.0;

// =============================================================================
// Soil type
// =============================================================================

/// Soil texture, as offered in the form's select box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    #[default]
    Sandy,
    Clay,
    Loamy,
}

impl SoilType {
    /// Options in the order the form lists them
    pub const ALL: [SoilType; 3] = [SoilType::Sandy, SoilType::Clay, SoilType::Loamy];

    /// Numeric code the fertilizer model was trained with
    pub fn encode(self) -> u8 {
        match self {
            SoilType::Sandy => 0,
            SoilType::Clay => 1,
            SoilType::Loamy => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Sandy => "Sandy",
            SoilType::Clay => "Clay",
            SoilType::Loamy => "Loamy",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = InputError;

    /// Case-insensitive, so the CLI accepts `loamy` as well as `Loamy`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InputError::UnknownSoilType(s.to_string()))
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// Soil section of the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilInput {
    /// Nitrogen (N)
    pub nitrogen: u16,
    /// Phosphorus (P)
    pub phosphorus: u16,
    /// Potassium (K)
    pub potassium: u16,
    pub ph: f64,
    /// Soil moisture in percent
    pub moisture: f64,
    pub soil_type: SoilType,
}

impl Default for SoilInput {
    fn default() -> Self {
        Self {
            nitrogen: 50,
            phosphorus: 50,
            potassium: 50,
            ph: 6.5,
            moisture: 30.0,
            soil_type: SoilType::Sandy,
        }
    }
}

impl SoilInput {
    pub fn validate(&self) -> Result<(), InputError> {
        check_nutrient("nitrogen", self.nitrogen)?;
        check_nutrient("phosphorus", self.phosphorus)?;
        check_nutrient("potassium", self.potassium)?;
        check("ph", self.ph, &PH_RANGE)?;
        check("moisture", self.moisture, &MOISTURE_RANGE)
    }
}

/// Weather section of the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherInput {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Millimetres
    pub rainfall: f64,
}

impl Default for WeatherInput {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 60.0,
            rainfall: 100.0,
        }
    }
}

impl WeatherInput {
    pub fn validate(&self) -> Result<(), InputError> {
        check("temperature", self.temperature, &TEMPERATURE_RANGE)?;
        check("humidity", self.humidity, &HUMIDITY_RANGE)?;
        check("rainfall", self.rainfall, &RAINFALL_RANGE)
    }
}

fn check_nutrient(field: &'static str, value: u16) -> Result<(), InputError> {
    if NUTRIENT_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value: f64::from(value),
            min: f64::from(*NUTRIENT_RANGE.start()),
            max: f64::from(*NUTRIENT_RANGE.end()),
        })
    }
}

// NaN fails `contains`, so it is rejected here too
fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), InputError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
