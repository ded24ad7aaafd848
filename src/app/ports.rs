//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, network, clock, telemetry, display,
//! event sinks) implement these traits.  The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Apart from [`TelemetrySink`], every port is infallible from the
//! domain's point of view: failures are folded into the returned values
//! (`None` readings, `false` association) by the adapter.

use embedded_hal::delay::DelayNs;

use crate::error::PublishError;
use crate::presenter::ReadingsView;
use crate::sensors::SensorReading;
use crate::telemetry::TelemetrySnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// `true` while a flame is detected.
    fn read_flame(&mut self) -> bool;

    /// Raw smoke ADC value.
    fn read_smoke(&mut self) -> u16;

    /// Temperature (°C), `None` when the sensor could not be read.
    fn read_temperature(&mut self) -> Option<f32>;

    /// Relative humidity (%), `None` when the sensor could not be read.
    fn read_humidity(&mut self) -> Option<f32>;

    /// Read every sensor and return a unified reading.
    fn read(&mut self) -> SensorReading {
        SensorReading {
            flame_detected: self.read_flame(),
            smoke_level: self.read_smoke(),
            temperature_c: self.read_temperature(),
            humidity_pct: self.read_humidity(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    fn set_fire_led(&mut self, on: bool);

    fn set_smoke_led(&mut self, on: bool);

    /// Start (or retune) the buzzer at `hz`.
    fn tone(&mut self, hz: u16);

    /// Silence the buzzer.
    fn no_tone(&mut self);

    /// Both LEDs off and buzzer silent.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Network port
// ───────────────────────────────────────────────────────────────

pub trait NetworkPort {
    /// Station associated with an access point (and holding an address).
    fn is_associated(&self) -> bool;

    /// Signal strength in dBm; `None` while not associated.
    fn signal_strength(&self) -> Option<i8>;

    /// Per-cycle link upkeep (reconnect requests).  Called at the start of
    /// every cycle; adapters with nothing to do keep the default.
    fn maintain(&mut self, _now_ms: u64) {}
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus blocking delays.
///
/// Built on [`DelayNs`] so alert patterns and screen holds can run against
/// a virtual clock in tests.
pub trait ClockPort: DelayNs {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Telemetry sink port (driven adapter: domain → remote store)
// ───────────────────────────────────────────────────────────────

pub trait TelemetrySink {
    /// Transmit one snapshot.  Must not retry internally.
    fn publish(&mut self, snapshot: &TelemetrySnapshot) -> Result<(), PublishError>;
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Boot splash, shown once before the network is started.
    fn show_boot(&mut self);

    /// Connecting animation with the time spent so far.
    fn show_connecting(&mut self, elapsed_ms: u64);

    fn show_connection_error(&mut self);

    fn show_readings(&mut self, view: &ReadingsView);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
