//! Feature vectors for the two models.
//!
//! Positions are fixed by how the models were trained (see
//! `artifact_loader::CROP_FEATURES` and `FERTILIZER_FEATURES`). Swapping two
//! columns silently changes predictions, so the builders below are the only
//! place vectors are assembled.

use artifact_loader::{CROP_FEATURES, FERTILIZER_FEATURES};

use crate::inputs::{SoilInput, WeatherInput};
use crate::labels::ClassId;

pub type CropVector = [f64; CROP_FEATURES.len()];
pub type FertilizerVector = [f64; FERTILIZER_FEATURES.len()];

/// `[N, P, K, temperature, humidity, ph, rainfall]`
pub fn crop_features(soil: &SoilInput, weather: &WeatherInput) -> CropVector {
    [
        f64::from(soil.nitrogen),
        f64::from(soil.phosphorus),
        f64::from(soil.potassium),
        weather.temperature,
        weather.humidity,
        soil.ph,
        weather.rainfall,
    ]
}

/// `[temperature, humidity, moisture, soil_type, crop, N, K, P]`
///
/// `crop_id` is the crop model's raw prediction, passed through even when it
/// has no name in the crop table. Note the nutrient order is N, K, P here.
pub fn fertilizer_features(
    soil: &SoilInput,
    weather: &WeatherInput,
    crop_id: ClassId,
) -> FertilizerVector {
    [
        weather.temperature,
        weather.humidity,
        soil.moisture,
        f64::from(soil.soil_type.encode()),
        crop_id as f64,
        f64::from(soil.nitrogen),
        f64::from(soil.potassium),
        f64::from(soil.phosphorus),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::SoilType;

    // Every field distinct so a swapped column shows up
    fn distinct_inputs() -> (SoilInput, WeatherInput) {
        (
            SoilInput {
                nitrogen: 11,
                phosphorus: 22,
                potassium: 33,
                ph: 4.5,
                moisture: 55.0,
                soil_type: SoilType::Loamy,
            },
            WeatherInput {
                temperature: 26.0,
                humidity: 77.0,
                rainfall: 188.0,
            },
        )
    }

    #[test]
    fn test_crop_vector_order() {
        let (soil, weather) = distinct_inputs();
        assert_eq!(
            crop_features(&soil, &weather),
            [11.0, 22.0, 33.0, 26.0, 77.0, 4.5, 188.0]
        );
    }

    #[test]
    fn test_fertilizer_vector_order() {
        let (soil, weather) = distinct_inputs();
        assert_eq!(
            fertilizer_features(&soil, &weather, 13),
            [26.0, 77.0, 55.0, 2.0, 13.0, 11.0, 33.0, 22.0]
        );
    }

    #[test]
    fn test_unknown_crop_id_passes_through() {
        let (soil, weather) = distinct_inputs();
        assert_eq!(fertilizer_features(&soil, &weather, 99)[4], 99.0);
    }

    #[test]
    fn test_swapping_inputs_changes_vector() {
        let (soil, weather) = distinct_inputs();
        let swapped = SoilInput {
            nitrogen: soil.phosphorus,
            phosphorus: soil.nitrogen,
            ..soil
        };
        assert_ne!(
            crop_features(&soil, &weather),
            crop_features(&swapped, &weather)
        );
    }
}
