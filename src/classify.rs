//! AQI classification tables
//!
//! Two distinct tables are kept on purpose: the coarse three-tier table
//! is authoritative for health guidance and mood, while the finer
//! six-level table only produces descriptive text. They use different
//! thresholds and are never merged.

use serde::{Deserialize, Serialize};

/// Coarse air quality tier driving guidance selection and mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Moderate,
    Unhealthy,
}

impl Tier {
    /// Classify an AQI value: 0-50 good, 51-150 moderate, above unhealthy.
    #[must_use]
    pub fn classify(aqi: u32) -> Self {
        match aqi {
            0..=50 => Tier::Good,
            51..=150 => Tier::Moderate,
            _ => Tier::Unhealthy,
        }
    }

    /// Mood face shown with the result. The unhealthy tier escalates
    /// from a mask to a crying face above AQI 200.
    #[must_use]
    pub fn character(self, aqi: u32) -> &'static str {
        match self {
            Tier::Good => "😀",
            Tier::Moderate => "😐",
            Tier::Unhealthy if aqi <= 200 => "😷",
            Tier::Unhealthy => "😢",
        }
    }

    /// Headline status for the result card.
    #[must_use]
    pub fn status_line(self, aqi: u32) -> String {
        match self {
            Tier::Good => format!("Great Air Quality! ({aqi})"),
            Tier::Moderate => format!("Moderate Air Quality ({aqi})"),
            Tier::Unhealthy => format!("Poor Air Quality ({aqi})"),
        }
    }

    /// Mood style class for the presentation layer.
    #[must_use]
    pub fn mood_class(self) -> &'static str {
        match self {
            Tier::Good => "mood-happy",
            Tier::Moderate => "mood-neutral",
            Tier::Unhealthy => "mood-sad",
        }
    }
}

/// Descriptive AQI level on the standard six-bucket scale.
///
/// Used only for description text; guidance and mood come from [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Classify on the six-bucket scale at 50/100/150/200/300.
    #[must_use]
    pub fn classify(aqi: u32) -> Self {
        match aqi {
            0..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitiveGroups,
            151..=200 => AqiLevel::Unhealthy,
            201..=300 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    /// Human-readable description of the level.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good - Air quality is satisfactory",
            AqiLevel::Moderate => "Moderate - Air quality is acceptable",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy - Everyone may experience health effects",
            AqiLevel::VeryUnhealthy => "Very Unhealthy - Health alert",
            AqiLevel::Hazardous => "Hazardous - Emergency conditions",
        }
    }
}
