//! Page rendering with Askama.
//!
//! Templates only see plain strings and flags; every number is formatted
//! and every label is turned into card text here.

use askama::Template;
use pipeline::inputs::{
    HUMIDITY_RANGE, MOISTURE_RANGE, NUTRIENT_RANGE, PH_RANGE, RAINFALL_RANGE, TEMPERATURE_RANGE,
};
use pipeline::{Label, Recommendation, SoilInput, SoilType, WeatherInput, CROPS, FERTILIZERS};
use std::ops::RangeInclusive;

// ============================================================================
// Form
// ============================================================================

/// One `<input type="number">`
#[derive(Debug, Clone)]
pub struct NumberField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub min: String,
    pub max: String,
    pub step: &'static str,
}

impl NumberField {
    fn integer(name: &'static str, label: &'static str, value: u16, range: &RangeInclusive<u16>) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
            step: "1",
        }
    }

    fn decimal(name: &'static str, label: &'static str, value: f64, range: &RangeInclusive<f64>) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
            step: "any",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SoilOption {
    pub value: &'static str,
    pub selected: bool,
}

fn soil_fields(soil: &SoilInput) -> Vec<NumberField> {
    vec![
        NumberField::integer("nitrogen", "Nitrogen (N)", soil.nitrogen, &NUTRIENT_RANGE),
        NumberField::integer("phosphorus", "Phosphorus (P)", soil.phosphorus, &NUTRIENT_RANGE),
        NumberField::integer("potassium", "Potassium (K)", soil.potassium, &NUTRIENT_RANGE),
        NumberField::decimal("ph", "Soil pH", soil.ph, &PH_RANGE),
        NumberField::decimal("moisture", "Soil Moisture (%)", soil.moisture, &MOISTURE_RANGE),
    ]
}

fn weather_fields(weather: &WeatherInput) -> Vec<NumberField> {
    vec![
        NumberField::decimal(
            "temperature",
            "Temperature (°C)",
            weather.temperature,
            &TEMPERATURE_RANGE,
        ),
        NumberField::decimal("humidity", "Humidity (%)", weather.humidity, &HUMIDITY_RANGE),
        NumberField::decimal("rainfall", "Rainfall (mm)", weather.rainfall, &RAINFALL_RANGE),
    ]
}

fn soil_options(selected: SoilType) -> Vec<SoilOption> {
    SoilType::ALL
        .into_iter()
        .map(|soil| SoilOption {
            value: soil.as_str(),
            selected: soil == selected,
        })
        .collect()
}

// ============================================================================
// Result cards
// ============================================================================

/// A rendered prediction panel
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    /// `crop-result`, `fert-result` or `error-result`
    pub css_class: &'static str,
    pub title: &'static str,
    pub value: String,
    /// Set only on error panels
    pub raw_id: Option<String>,
    pub message: String,
}

impl ResultCard {
    pub fn crop(label: &Label) -> Self {
        match label {
            Label::Known { name, .. } => Self {
                css_class: "crop-result",
                title: "🌾 Recommended Crop",
                value: name.to_string(),
                raw_id: None,
                message: "Based on your soil and weather conditions, this crop is most suitable for optimal growth and yield.".to_string(),
            },
            Label::Unknown { raw_id } => Self::unknown(*raw_id, "Unknown Crop", CROPS.kind),
        }
    }

    pub fn fertilizer(label: &Label) -> Self {
        match label {
            Label::Known { name, .. } => Self {
                css_class: "fert-result",
                title: "🧪 Recommended Fertilizer",
                value: name.to_string(),
                raw_id: None,
                message: "This fertilizer will provide the optimal nutrients for your selected crop and soil conditions.".to_string(),
            },
            Label::Unknown { raw_id } => {
                Self::unknown(*raw_id, "Unknown Fertilizer", FERTILIZERS.kind)
            }
        }
    }

    fn unknown(raw_id: i64, value: &str, kind: &str) -> Self {
        Self {
            css_class: "error-result",
            title: "⚠️ Prediction Error",
            value: value.to_string(),
            raw_id: Some(raw_id.to_string()),
            message: format!(
                "This value doesn't match any {} in our database. Please check your model training data.",
                kind
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        self.raw_id.is_some()
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub soil_fields: Vec<NumberField>,
    pub weather_fields: Vec<NumberField>,
    pub soil_options: Vec<SoilOption>,
    pub error: Option<String>,
    pub cards: Vec<ResultCard>,
}

impl IndexPage {
    /// The form pre-filled with `soil` and `weather`, no results
    pub fn form(soil: &SoilInput, weather: &WeatherInput) -> Self {
        Self {
            soil_fields: soil_fields(soil),
            weather_fields: weather_fields(weather),
            soil_options: soil_options(soil.soil_type),
            error: None,
            cards: Vec::new(),
        }
    }

    /// First visit: the form with its default values
    pub fn defaults() -> Self {
        Self::form(&SoilInput::default(), &WeatherInput::default())
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: &Recommendation) -> Self {
        self.cards = vec![
            ResultCard::crop(&recommendation.crop),
            ResultCard::fertilizer(&recommendation.fertilizer),
        ];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crop_card() {
        let card = ResultCard::crop(&Label::Known { id: 13, name: "Rice" });
        assert_eq!(card.css_class, "crop-result");
        assert_eq!(card.value, "Rice");
        assert!(!card.is_error());
    }

    #[test]
    fn test_unknown_cards_keep_raw_id() {
        let card = ResultCard::crop(&Label::Unknown { raw_id: 99 });
        assert_eq!(card.css_class, "error-result");
        assert_eq!(card.value, "Unknown Crop");
        assert_eq!(card.raw_id.as_deref(), Some("99"));
        assert!(card.message.contains("any crop in our database"));

        let card = ResultCard::fertilizer(&Label::Unknown { raw_id: -3 });
        assert_eq!(card.value, "Unknown Fertilizer");
        assert_eq!(card.raw_id.as_deref(), Some("-3"));
        assert!(card.message.contains("any fertilizer in our database"));
    }

    #[test]
    fn test_defaults_render_form() {
        let html = IndexPage::defaults().render().unwrap();

        assert!(html.contains(r#"name="nitrogen""#));
        assert!(html.contains(r#"value="6.5""#));
        assert!(html.contains(r#"max="500""#));
        assert!(html.contains(r#"<option value="Sandy" selected>"#));
        assert!(!html.contains("result-card"));
    }

    #[test]
    fn test_recommendation_renders_both_cards() {
        let soil = SoilInput {
            soil_type: SoilType::Loamy,
            ..SoilInput::default()
        };
        let rec = Recommendation {
            crop: Label::Unknown { raw_id: 99 },
            fertilizer: Label::Known { id: 1, name: "Urea" },
        };
        let html = IndexPage::form(&soil, &WeatherInput::default())
            .with_recommendation(&rec)
            .render()
            .unwrap();

        assert!(html.contains("<code>99</code>"));
        assert!(html.contains("Unknown Crop"));
        assert!(html.contains("Urea"));
        assert!(html.contains(r#"<option value="Loamy" selected>"#));
        assert!(html.contains(r#"<option value="Sandy">"#));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let html = IndexPage::defaults()
            .with_error("<script>")
            .render()
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
    }
}
