//! Telemetry publisher.
//!
//! Builds one [`TelemetrySnapshot`] per connected cycle and hands it to a
//! [`TelemetrySink`].  Fire-and-forget: a failed publish is logged and
//! counted, never retried or queued.  The next connected cycle simply
//! publishes fresh data.
//!
//! Wire shape (JSON, exactly these keys):
//!
//! ```json
//! { "fireDetected": false, "smokeDetected": true, "excessiveTemperature": false,
//!   "temperature": 24.0, "humidity": 50.0, "smokeLevel": 750 }
//! ```
//!
//! Unavailable temperature or humidity serialise as `null`.

use log::debug;
use serde::Serialize;

use crate::app::ports::TelemetrySink;
use crate::config::SystemConfig;
use crate::error::PublishError;
use crate::hazard::{self, HazardState};
use crate::sensors::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub fire_detected: bool,
    /// Smoke above threshold, independent of flame.
    pub smoke_detected: bool,
    pub excessive_temperature: bool,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub smoke_level: u16,
}

impl TelemetrySnapshot {
    pub fn build(
        reading: &SensorReading,
        hazard: HazardState,
        smoke_threshold: u16,
        excessive_temperature_c: f32,
    ) -> Self {
        Self {
            fire_detected: hazard == HazardState::FireAlert,
            smoke_detected: hazard::smoke_exceeds(reading, smoke_threshold),
            excessive_temperature: hazard::temperature_excessive(reading, excessive_temperature_c),
            temperature: reading.temperature_c,
            humidity: reading.humidity_pct,
            smoke_level: reading.smoke_level,
        }
    }
}

/// Result of a single publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Success,
    Failure(PublishError),
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

pub struct TelemetryPublisher {
    smoke_threshold: u16,
    excessive_temperature_c: f32,
    successes: u32,
    failures: u32,
    last_outcome: Option<PublishOutcome>,
}

impl TelemetryPublisher {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            smoke_threshold: config.smoke_threshold,
            excessive_temperature_c: config.excessive_temperature_c,
            successes: 0,
            failures: 0,
            last_outcome: None,
        }
    }

    pub fn snapshot(&self, reading: &SensorReading, hazard: HazardState) -> TelemetrySnapshot {
        TelemetrySnapshot::build(
            reading,
            hazard,
            self.smoke_threshold,
            self.excessive_temperature_c,
        )
    }

    /// Publish one snapshot.  Only call this while connected.
    pub fn publish(
        &mut self,
        sink: &mut impl TelemetrySink,
        reading: &SensorReading,
        hazard: HazardState,
    ) -> PublishOutcome {
        let snapshot = self.snapshot(reading, hazard);
        let outcome = match sink.publish(&snapshot) {
            Ok(()) => {
                self.successes = self.successes.wrapping_add(1);
                debug!("telemetry: published ({} ok)", self.successes);
                PublishOutcome::Success
            }
            Err(e) => {
                self.failures = self.failures.wrapping_add(1);
                debug!("telemetry: publish failed: {} ({} failures)", e, self.failures);
                PublishOutcome::Failure(e)
            }
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// `None` until the first publish attempt.
    pub fn last_outcome(&self) -> Option<&PublishOutcome> {
        self.last_outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink {
        sent: Vec<TelemetrySnapshot>,
        fail_with: Option<&'static str>,
    }

    impl TelemetrySink for Sink {
        fn publish(&mut self, snapshot: &TelemetrySnapshot) -> Result<(), PublishError> {
            self.sent.push(*snapshot);
            match self.fail_with {
                Some(reason) => Err(PublishError::new(reason)),
                None => Ok(()),
            }
        }
    }

    fn reading(flame: bool, smoke: u16, temp: Option<f32>) -> SensorReading {
        SensorReading {
            flame_detected: flame,
            smoke_level: smoke,
            temperature_c: temp,
            humidity_pct: Some(50.0),
        }
    }

    #[test]
    fn snapshot_json_keys() {
        let snap = TelemetrySnapshot::build(&reading(false, 750, Some(24.0)), HazardState::SmokeWarning, 600, 35.0);
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(
            json,
            r#"{"fireDetected":false,"smokeDetected":true,"excessiveTemperature":false,"temperature":24.0,"humidity":50.0,"smokeLevel":750}"#
        );
    }

    #[test]
    fn unavailable_temperature_is_null() {
        let snap = TelemetrySnapshot::build(&reading(false, 100, None), HazardState::Normal, 600, 35.0);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains(r#""temperature":null"#));
        assert!(!snap.excessive_temperature);
    }

    #[test]
    fn smoke_flag_independent_of_flame() {
        let snap = TelemetrySnapshot::build(&reading(true, 900, Some(40.0)), HazardState::FireAlert, 600, 35.0);
        assert!(snap.fire_detected);
        assert!(snap.smoke_detected);
        assert!(snap.excessive_temperature);
    }

    #[test]
    fn failure_is_counted_not_retried() {
        let mut publisher = TelemetryPublisher::new(&SystemConfig::default());
        let mut sink = Sink {
            sent: Vec::new(),
            fail_with: Some("HTTP status 500"),
        };
        let outcome = publisher.publish(&mut sink, &reading(false, 0, Some(20.0)), HazardState::Normal);
        assert_eq!(outcome, PublishOutcome::Failure(PublishError::new("HTTP status 500")));
        assert_eq!(sink.sent.len(), 1);
        assert_eq!(publisher.failures(), 1);
        assert_eq!(publisher.successes(), 0);

        sink.fail_with = None;
        let outcome = publisher.publish(&mut sink, &reading(false, 0, Some(20.0)), HazardState::Normal);
        assert!(outcome.is_success());
        assert_eq!(publisher.last_outcome(), Some(&PublishOutcome::Success));
        assert_eq!(sink.sent.len(), 2);
    }
}
