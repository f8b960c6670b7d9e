//! Configuration management for the aircheck application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::error::AirCheckError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the aircheck application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AirCheckConfig {
    /// Pincode lookup configuration
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Air quality provider configuration
    #[serde(default)]
    pub quality: QualityConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pincode lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL for the pincode directory API
    #[serde(default = "default_lookup_base_url")]
    pub base_url: String,
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Total resolve attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// Air quality provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Random plausible readings, no API key needed
    #[default]
    Simulated,
    /// IQAir AirVisual, requires an API key
    AirVisual,
}

/// Air quality provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Which provider to use
    #[serde(default)]
    pub provider: ProviderKind,
    /// AirVisual API key (required for the airvisual provider)
    pub api_key: Option<String>,
    /// Base URL for the AirVisual city endpoint
    #[serde(default = "default_quality_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_lookup_base_url() -> String {
    "https://api.postalpincode.in/pincode".to_string()
}

fn default_quality_base_url() -> String {
    "https://api.airvisual.com/v2/city".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Simulated,
            api_key: None,
            base_url: default_quality_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AirCheckConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. AIRCHECK_QUALITY__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("AIRCHECK")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AirCheckConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aircheck").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.lookup.timeout_seconds == 0 || self.lookup.timeout_seconds > 300 {
            return Err(
                AirCheckError::config("Lookup timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.lookup.max_attempts == 0 || self.lookup.max_attempts > 10 {
            return Err(
                AirCheckError::config("Lookup attempts must be between 1 and 10").into(),
            );
        }

        if self.quality.timeout_seconds == 0 || self.quality.timeout_seconds > 300 {
            return Err(
                AirCheckError::config("Quality timeout must be between 1 and 300 seconds").into(),
            );
        }

        for url in [&self.lookup.base_url, &self.quality.base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AirCheckError::config(format!(
                    "Base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        if self.quality.provider == ProviderKind::AirVisual {
            match &self.quality.api_key {
                None => {
                    return Err(AirCheckError::config(
                        "The airvisual provider requires quality.api_key",
                    )
                    .into());
                }
                Some(key) if key.is_empty() => {
                    return Err(AirCheckError::config(
                        "Quality API key cannot be empty if provided",
                    )
                    .into());
                }
                Some(_) => {}
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirCheckError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
