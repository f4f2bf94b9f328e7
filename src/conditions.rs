//! Condition-category icons and temperature display

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset used to bring provider temperatures (Kelvin) onto the Celsius scale.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Coarse weather condition, as far as the display cares.
///
/// Only three provider categories are recognized; everything else, including
/// rows that never resolved, shows as `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionIcon {
    Clear,
    Clouds,
    Rain,
    #[default]
    Unknown,
}

impl ConditionIcon {
    /// Map the provider's `weather[0].main` value to an icon
    pub fn from_category(category: Option<&str>) -> Self {
        match category {
            Some("Clear") => ConditionIcon::Clear,
            Some("Clouds") => ConditionIcon::Clouds,
            Some("Rain") => ConditionIcon::Rain,
            _ => ConditionIcon::Unknown,
        }
    }

    /// Material Design icon identifier
    pub fn name(&self) -> &'static str {
        match self {
            ConditionIcon::Clear => "white-balance-sunny",
            ConditionIcon::Clouds => "weather-cloudy",
            ConditionIcon::Rain => "weather-rainy",
            ConditionIcon::Unknown => "cloud-question",
        }
    }

    /// Single-cell glyph for the list row
    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionIcon::Clear => "☀",
            ConditionIcon::Clouds => "☁",
            ConditionIcon::Rain => "☂",
            ConditionIcon::Unknown => "?",
        }
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Fahrenheit => TempUnit::Celsius,
            TempUnit::Celsius => TempUnit::Fahrenheit,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TempUnit::Fahrenheit => "°F",
            TempUnit::Celsius => "°C",
        }
    }

    /// Convert a Kelvin reading to this unit, rounded to whole degrees
    pub fn degrees(&self, kelvin: f64) -> i64 {
        let celsius = kelvin - KELVIN_OFFSET;
        let value = match self {
            TempUnit::Fahrenheit => celsius * 1.8 + 32.0,
            TempUnit::Celsius => celsius,
        };
        // Halves round up, so -8.5 becomes -8
        (value + 0.5).floor() as i64
    }

    /// Display string for an optional Kelvin reading; `None` renders as `??°F`
    pub fn format(&self, kelvin: Option<f64>) -> String {
        match kelvin {
            Some(k) => format!("{}{}", self.degrees(k), self.suffix()),
            None => format!("??{}", self.suffix()),
        }
    }
}
