//! Hazard classifier.
//!
//! Maps one [`SensorReading`] to exactly one [`HazardState`].  Precedence,
//! highest first:
//!
//! 1. flame present            → [`HazardState::FireAlert`]
//! 2. smoke above threshold    → [`HazardState::SmokeWarning`]
//! 3. otherwise                → [`HazardState::Normal`]
//!
//! Temperature and humidity are informational and never change the
//! classification.  Nothing here keeps state between cycles.

use core::fmt;

use crate::sensors::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HazardState {
    #[default]
    Normal,
    SmokeWarning,
    FireAlert,
}

impl HazardState {
    /// True for any state that drives an alert pattern.
    pub fn is_alert(self) -> bool {
        self != Self::Normal
    }
}

impl fmt::Display for HazardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::SmokeWarning => write!(f, "smoke warning"),
            Self::FireAlert => write!(f, "FIRE"),
        }
    }
}

/// Classify a reading.
pub fn classify(reading: &SensorReading, smoke_threshold: u16) -> HazardState {
    if reading.flame_detected {
        HazardState::FireAlert
    } else if smoke_exceeds(reading, smoke_threshold) {
        HazardState::SmokeWarning
    } else {
        HazardState::Normal
    }
}

/// Smoke strictly above the threshold, regardless of flame.
pub fn smoke_exceeds(reading: &SensorReading, smoke_threshold: u16) -> bool {
    reading.smoke_level > smoke_threshold
}

/// Temperature available and strictly above `limit_c`.
pub fn temperature_excessive(reading: &SensorReading, limit_c: f32) -> bool {
    reading.temperature_c.is_some_and(|t| t > limit_c)
}
