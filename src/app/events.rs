//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them; the firmware logs them to
//! the serial console.

use crate::connectivity::ConnectivityStatus;
use crate::error::PublishError;
use crate::hazard::HazardState;
use crate::sensors::SensorReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has been constructed; carries the connecting deadline.
    Started { connect_timeout_ms: u32 },

    /// Fresh sensor data for this cycle.
    Reading {
        reading: SensorReading,
        smoke_over_threshold: bool,
    },

    /// Classification and connectivity for this cycle.
    Assessed {
        cycle: u64,
        hazard: HazardState,
        connectivity: ConnectivityStatus,
    },

    /// Telemetry accepted by the sink.
    Published,

    /// Telemetry rejected; the reading is dropped.
    PublishFailed(PublishError),

    /// Not connected, nothing sent.
    PublishSkipped,
}
