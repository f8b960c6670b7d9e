//! Error types and handling for the aircheck application

use thiserror::Error;

use crate::pipeline::LookupError;
use crate::validation::ValidationError;

/// Main error type for the aircheck application
#[derive(Error, Debug)]
pub enum AirCheckError {
    /// Input validation errors
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Categorized lookup failures from the pipeline
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AirCheckError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirCheckError::Validation(error) => {
                format!("{} ({})", error, error.suggestion())
            }
            AirCheckError::Lookup(error) => error.to_string(),
            AirCheckError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            AirCheckError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
