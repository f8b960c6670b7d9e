//! Location model for a resolved pincode

use serde::{Deserialize, Serialize};

/// Place a pincode resolved to.
///
/// Produced only by a successful resolution; the resolver rejects
/// records with missing fields, so all four are always non-empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Location {
    /// District-level city name
    pub city: String,
    /// State name
    pub state: String,
    /// Country name
    pub country: String,
    /// Finer-grained place name (post office), falls back to the city
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(city: String, state: String, country: String, name: String) -> Self {
        Self {
            city,
            state,
            country,
            name,
        }
    }

    /// Format as the single display line "name, city, state"
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{}, {}, {}", self.name, self.city, self.state)
    }
}
