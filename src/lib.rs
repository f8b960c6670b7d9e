//! `aircheck` - Air quality lookup for Indian pincodes
//!
//! This library validates a 6-digit pincode, resolves it to a location,
//! fetches an air quality reading and classifies it into tiered health
//! guidance for a presentation boundary to render.

pub mod classify;
pub mod config;
pub mod error;
pub mod guidance;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod validation;

// Re-export core types for public API
pub use classify::{AqiLevel, Tier};
pub use config::{AirCheckConfig, ProviderKind};
pub use error::AirCheckError;
pub use guidance::HealthGuidance;
pub use models::{Location, Pollutant, QualityReading};
pub use pipeline::{CheckObserver, CheckPipeline, CheckReport, ErrorStyle, LookupError};
pub use provider::{AirVisualProvider, QualityProvider, SimulatedProvider};
pub use resolver::{LocationResolver, PincodeApiResolver};
pub use validation::{PostalCode, SAMPLE_PINCODES, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirCheckError>;
