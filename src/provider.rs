//! Air quality providers
//!
//! The pipeline fetches readings through the [`QualityProvider`] trait
//! so the real AirVisual client and the keyless simulated provider are
//! interchangeable.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::RngExt;
use rand::seq::IndexedRandom;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::QualityConfig;
use crate::error::AirCheckError;
use crate::models::{Location, Pollutant, QualityReading};
use crate::pipeline::LookupError;

const USER_AGENT: &str = concat!("aircheck/", env!("CARGO_PKG_VERSION"));

/// Provides an air quality reading for a resolved location.
#[async_trait]
pub trait QualityProvider: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<QualityReading, LookupError>;
}

/// Client for the IQAir AirVisual `v2/city` endpoint.
#[derive(Debug, Clone)]
pub struct AirVisualProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AirVisualResponse {
    data: AirVisualData,
}

#[derive(Debug, Deserialize)]
struct AirVisualData {
    current: AirVisualCurrent,
}

#[derive(Debug, Deserialize)]
struct AirVisualCurrent {
    pollution: AirVisualPollution,
    weather: AirVisualWeather,
}

#[derive(Debug, Deserialize)]
struct AirVisualPollution {
    /// AQI on the US scale
    aqius: u32,
    /// Dominant pollutant code, e.g. "pm25"
    mainus: String,
}

#[derive(Debug, Deserialize)]
struct AirVisualWeather {
    /// Temperature in Celsius
    tp: f64,
    /// Relative humidity percent
    hu: f64,
    /// Wind speed in m/s
    ws: f64,
}

impl AirVisualProvider {
    /// Build a provider from the quality configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API key is missing or the
    /// HTTP client cannot be built.
    pub fn new(config: &QualityConfig) -> Result<Self, AirCheckError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AirCheckError::config("AirVisual provider requires an API key"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AirCheckError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl QualityProvider for AirVisualProvider {
    async fn fetch(&self, location: &Location) -> Result<QualityReading, LookupError> {
        debug!("Fetching air quality for {}", location.city);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("city", location.city.as_str()),
                ("state", location.state.as_str()),
                ("country", location.country.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("AirVisual request failed: {}", e);
                LookupError::ServiceUnavailable
            })?;

        if !response.status().is_success() {
            warn!("AirVisual returned status {}", response.status());
            return Err(LookupError::ServiceUnavailable);
        }

        let body: AirVisualResponse = response.json().await.map_err(|e| {
            warn!("Unparsable AirVisual response: {}", e);
            LookupError::ServiceUnavailable
        })?;

        let pollution = body.data.current.pollution;
        let weather = body.data.current.weather;

        let dominant_pollutant = Pollutant::from_code(&pollution.mainus).ok_or_else(|| {
            warn!("Unknown pollutant code {:?}", pollution.mainus);
            LookupError::ServiceUnavailable
        })?;

        Ok(QualityReading {
            aqi: pollution.aqius,
            dominant_pollutant,
            temperature_celsius: weather.tp,
            humidity_percent: weather.hu,
            wind_speed_ms: weather.ws,
            fetched_at: Utc::now(),
        })
    }
}

/// AQI values the simulated provider draws from, spanning all tiers.
const SIMULATED_AQI_VALUES: [u32; 8] = [25, 45, 75, 95, 125, 155, 175, 205];

/// Artificial fetch delay so the simulation feels like a remote call.
const SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// Keyless stand-in for the real provider, returning plausible random
/// readings. Interchangeable with [`AirVisualProvider`] behind the trait.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider;

impl SimulatedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn generate() -> QualityReading {
        let mut rng = rand::rng();
        let aqi = SIMULATED_AQI_VALUES.choose(&mut rng).copied().unwrap_or(45);
        let dominant_pollutant = Pollutant::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(Pollutant::Pm25);

        QualityReading {
            aqi,
            dominant_pollutant,
            temperature_celsius: f64::from(rng.random_range(15..35)),
            humidity_percent: f64::from(rng.random_range(40..80)),
            wind_speed_ms: (rng.random_range::<f64, _>(2.0..17.0) * 10.0).round() / 10.0,
            fetched_at: Utc::now(),
        }
    }
}

#[async_trait]
impl QualityProvider for SimulatedProvider {
    async fn fetch(&self, location: &Location) -> Result<QualityReading, LookupError> {
        debug!("Simulating air quality for {}", location.city);
        tokio::time::sleep(SIMULATED_DELAY).await;
        Ok(Self::generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_reading_within_documented_ranges() {
        for _ in 0..50 {
            let reading = SimulatedProvider::generate();
            assert!(SIMULATED_AQI_VALUES.contains(&reading.aqi));
            assert!((15.0..35.0).contains(&reading.temperature_celsius));
            assert!((40.0..80.0).contains(&reading.humidity_percent));
            assert!((2.0..=17.0).contains(&reading.wind_speed_ms));
        }
    }

    #[test]
    fn test_airvisual_wire_format_deserializes() {
        let body = r#"{
            "status": "success",
            "data": {
                "current": {
                    "pollution": { "ts": "2025-08-01T12:00:00.000Z", "aqius": 45, "mainus": "pm25" },
                    "weather": { "tp": 24, "hu": 61, "ws": 3.2 }
                }
            }
        }"#;
        let parsed: AirVisualResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.current.pollution.aqius, 45);
        assert_eq!(parsed.data.current.pollution.mainus, "pm25");
        assert_eq!(parsed.data.current.weather.ws, 3.2);
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = QualityConfig {
            api_key: None,
            ..QualityConfig::default()
        };
        assert!(AirVisualProvider::new(&config).is_err());
    }
}
