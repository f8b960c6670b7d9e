//! Air quality reading model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pollutant species reported as primarily responsible for the AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    So2,
    Co,
}

impl Pollutant {
    /// All known pollutant codes.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Parse an API wire code such as `pm25` or `o3`.
    ///
    /// Returns `None` for unknown codes; providers treat that as a
    /// malformed payload rather than widening the enum.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "pm25" => Some(Pollutant::Pm25),
            "pm10" => Some(Pollutant::Pm10),
            "o3" => Some(Pollutant::O3),
            "no2" => Some(Pollutant::No2),
            "so2" => Some(Pollutant::So2),
            "co" => Some(Pollutant::Co),
            _ => None,
        }
    }

    /// Display label with proper subscripts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O₃",
            Pollutant::No2 => "NO₂",
            Pollutant::So2 => "SO₂",
            Pollutant::Co => "CO",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One air quality observation for a location.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QualityReading {
    /// Air Quality Index (US scale)
    pub aqi: u32,
    /// Pollutant driving the current AQI
    pub dominant_pollutant: Pollutant,
    /// Ambient temperature in Celsius
    pub temperature_celsius: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: f64,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// When the reading was fetched
    pub fetched_at: DateTime<Utc>,
}

impl QualityReading {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature_celsius)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{:.0}%", self.humidity_percent)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pollutant_codes_round_trip() {
        for pollutant in Pollutant::ALL {
            let code = match pollutant {
                Pollutant::Pm25 => "pm25",
                Pollutant::Pm10 => "pm10",
                Pollutant::O3 => "o3",
                Pollutant::No2 => "no2",
                Pollutant::So2 => "so2",
                Pollutant::Co => "co",
            };
            assert_eq!(Pollutant::from_code(code), Some(pollutant));
        }
    }

    #[test]
    fn test_pollutant_code_case_insensitive() {
        assert_eq!(Pollutant::from_code("PM25"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_code("O3"), Some(Pollutant::O3));
    }

    #[test]
    fn test_unknown_pollutant_code_rejected() {
        assert_eq!(Pollutant::from_code("pm1"), None);
        assert_eq!(Pollutant::from_code(""), None);
    }

    #[test]
    fn test_pollutant_labels() {
        assert_eq!(Pollutant::Pm25.label(), "PM2.5");
        assert_eq!(Pollutant::O3.label(), "O₃");
        assert_eq!(Pollutant::Co.label(), "CO");
    }

    #[test]
    fn test_reading_formatting() {
        let reading = QualityReading {
            aqi: 45,
            dominant_pollutant: Pollutant::Pm25,
            temperature_celsius: 24.0,
            humidity_percent: 61.0,
            wind_speed_ms: 3.25,
            fetched_at: Utc::now(),
        };
        assert_eq!(reading.format_temperature(), "24°C");
        assert_eq!(reading.format_humidity(), "61%");
        assert_eq!(reading.format_wind(), "3.2 m/s");
    }
}
