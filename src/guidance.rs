//! Tier-keyed health guidance
//!
//! Static recommendation tables adapted from the American Lung
//! Association's outdoor air guidance. Loaded once, never mutated.

use crate::classify::Tier;

/// AQI above this value prepends the emergency tip to the returned list.
pub const EMERGENCY_AQI: u32 = 200;

/// Tip shown first when the air quality is hazardous.
pub const EMERGENCY_TIP: &str = "EMERGENCY: Air quality is hazardous. Seek immediate \
     indoor shelter and consider medical attention if experiencing symptoms.";

/// A static guidance record for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthGuidance {
    pub title: &'static str,
    pub message: &'static str,
    pub tips: &'static [&'static str],
    /// Severity label the presentation layer maps to styling.
    pub severity_color: &'static str,
}

const GOOD: HealthGuidance = HealthGuidance {
    title: "Excellent Air Quality!",
    message: "Perfect conditions for all outdoor activities. Air quality is \
        satisfactory for all groups.",
    tips: &[
        "Enjoy all outdoor activities and exercise",
        "Great time for jogging, cycling, and outdoor sports",
        "Open windows for natural ventilation",
        "Safe for children and sensitive individuals to play outside",
        "Consider walking or biking instead of driving",
    ],
    severity_color: "success",
};

const MODERATE: HealthGuidance = HealthGuidance {
    title: "Take Precautions",
    message: "Air quality is acceptable for most people, but sensitive \
        individuals should be cautious.",
    tips: &[
        "Check daily air pollution forecasts before outdoor activities",
        "Consider moving intense workouts indoors if you're sensitive",
        "Avoid exercising near high-traffic areas and busy highways",
        "Limit outdoor time for children with asthma or respiratory conditions",
        "Use less energy at home to help reduce overall air pollution",
        "Use public transportation, walk, bike or carpool when possible",
    ],
    severity_color: "warning",
};

const UNHEALTHY: HealthGuidance = HealthGuidance {
    title: "Protect Your Health",
    message: "Air quality is unhealthy. Everyone should limit outdoor \
        exposure and take protective measures.",
    tips: &[
        "Avoid exercising outdoors - move all workouts indoors",
        "Stay indoors with windows and doors closed",
        "Wear N95 or P100 masks when going outside if necessary",
        "Use public transportation instead of walking or biking",
        "Use air purifiers indoors if available",
        "Don't burn wood, trash, or use fireplaces",
        "Reduce energy use to help improve air quality",
        "Contact your doctor if you experience breathing difficulties",
        "Keep children and elderly indoors as much as possible",
        "Seal gaps around doors and windows to prevent outdoor air from coming inside",
    ],
    severity_color: "danger",
};

impl HealthGuidance {
    /// The static record for a tier.
    #[must_use]
    pub fn for_tier(tier: Tier) -> &'static HealthGuidance {
        match tier {
            Tier::Good => &GOOD,
            Tier::Moderate => &MODERATE,
            Tier::Unhealthy => &UNHEALTHY,
        }
    }

    /// Tip list for a concrete reading, with the emergency tip prepended
    /// above [`EMERGENCY_AQI`]. The static record itself is untouched.
    #[must_use]
    pub fn tips_for(aqi: u32) -> Vec<&'static str> {
        let guidance = Self::for_tier(Tier::classify(aqi));
        let mut tips = Vec::with_capacity(guidance.tips.len() + 1);
        if aqi > EMERGENCY_AQI {
            tips.push(EMERGENCY_TIP);
        }
        tips.extend_from_slice(guidance.tips);
        tips
    }
}
