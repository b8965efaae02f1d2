//! The submitted form and its conversion into pipeline inputs.

use pipeline::{InputError, SoilInput, SoilType, WeatherInput};
use serde::Deserialize;

/// Fields of the recommendation form, as posted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendForm {
    pub nitrogen: u16,
    pub phosphorus: u16,
    pub potassium: u16,
    pub ph: f64,
    pub moisture: f64,
    pub soil_type: SoilType,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

impl RecommendForm {
    pub fn into_inputs(self) -> (SoilInput, WeatherInput) {
        let soil = SoilInput {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            moisture: self.moisture,
            soil_type: self.soil_type,
        };
        let weather = WeatherInput {
            temperature: self.temperature,
            humidity: self.humidity,
            rainfall: self.rainfall,
        };
        (soil, weather)
    }
}

/// Re-check the ranges the browser enforces; requests can skip the browser
pub fn validate(soil: &SoilInput, weather: &WeatherInput) -> Result<(), InputError> {
    soil.validate()?;
    weather.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_inputs() {
        let form = RecommendForm {
            nitrogen: 1,
            phosphorus: 2,
            potassium: 3,
            ph: 7.0,
            moisture: 40.0,
            soil_type: SoilType::Clay,
            temperature: 30.0,
            humidity: 50.0,
            rainfall: 200.0,
        };
        let (soil, weather) = form.into_inputs();

        assert_eq!(soil.potassium, 3);
        assert_eq!(soil.soil_type, SoilType::Clay);
        assert_eq!(weather.rainfall, 200.0);
        assert!(validate(&soil, &weather).is_ok());
    }
}
