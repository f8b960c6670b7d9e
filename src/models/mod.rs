//! Data models for the aircheck pipeline
//!
//! Core domain models organized by concern:
//! - Location: resolved place for a pincode
//! - Quality: air quality reading and pollutant codes

pub mod location;
pub mod quality;

// Re-export all public types for convenient access
pub use location::Location;
pub use quality::{Pollutant, QualityReading};
