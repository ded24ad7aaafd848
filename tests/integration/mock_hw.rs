//! Mock adapters for integration tests.
//!
//! Records every actuator, display and telemetry call so tests can assert
//! on the full history without touching real GPIO/LEDC registers.  Time is
//! virtual: delays advance [`MockClock`] instantly.

use embedded_hal::delay::DelayNs;

use hazardmon::app::events::AppEvent;
use hazardmon::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, NetworkPort, SensorPort, TelemetrySink,
};
use hazardmon::error::PublishError;
use hazardmon::presenter::ReadingsView;
use hazardmon::sensors::SensorReading;
use hazardmon::telemetry::TelemetrySnapshot;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    FireLed(bool),
    SmokeLed(bool),
    Tone(u16),
    NoTone,
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub reading: SensorReading,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(reading: SensorReading) -> Self {
        Self {
            reading,
            calls: Vec::new(),
        }
    }

    pub fn tones(&self, hz: u16) -> usize {
        self.calls.iter().filter(|c| **c == ActuatorCall::Tone(hz)).count()
    }

    pub fn fire_led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::FireLed(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn smoke_led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SmokeLed(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn buzzer_silent(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Tone(_) => Some(false),
                ActuatorCall::NoTone | ActuatorCall::AllOff => Some(true),
                _ => None,
            })
            .unwrap_or(true)
    }
}

impl SensorPort for MockHardware {
    fn read_flame(&mut self) -> bool {
        self.reading.flame_detected
    }

    fn read_smoke(&mut self) -> u16 {
        self.reading.smoke_level
    }

    fn read_temperature(&mut self) -> Option<f32> {
        self.reading.temperature_c
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.reading.humidity_pct
    }
}

impl ActuatorPort for MockHardware {
    fn set_fire_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::FireLed(on));
    }

    fn set_smoke_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SmokeLed(on));
    }

    fn tone(&mut self, hz: u16) {
        self.calls.push(ActuatorCall::Tone(hz));
    }

    fn no_tone(&mut self) {
        self.calls.push(ActuatorCall::NoTone);
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockNetwork ───────────────────────────────────────────────

pub struct MockNetwork {
    pub associated: bool,
    pub rssi: i8,
}

impl MockNetwork {
    pub fn offline() -> Self {
        Self {
            associated: false,
            rssi: -60,
        }
    }

    pub fn online(rssi: i8) -> Self {
        Self {
            associated: true,
            rssi,
        }
    }
}

impl NetworkPort for MockNetwork {
    fn is_associated(&self) -> bool {
        self.associated
    }

    fn signal_strength(&self) -> Option<i8> {
        self.associated.then_some(self.rssi)
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Virtual clock: delays add to `now` and are recorded.
pub struct MockClock {
    now_ns: u64,
    pub delays_ms: Vec<u32>,
}

impl MockClock {
    pub fn at_ms(now_ms: u64) -> Self {
        Self {
            now_ns: now_ms * 1_000_000,
            delays_ms: Vec::new(),
        }
    }

    pub fn set_ms(&mut self, now_ms: u64) {
        self.now_ns = now_ms * 1_000_000;
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.now_ns += u64::from(ms) * 1_000_000;
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }
}

// ── MockTelemetrySink ─────────────────────────────────────────

#[derive(Default)]
pub struct MockTelemetrySink {
    pub attempts: Vec<TelemetrySnapshot>,
    pub fail_with: Option<&'static str>,
}

impl TelemetrySink for MockTelemetrySink {
    fn publish(&mut self, snapshot: &TelemetrySnapshot) -> Result<(), PublishError> {
        self.attempts.push(*snapshot);
        match self.fail_with {
            Some(reason) => Err(PublishError::new(reason)),
            None => Ok(()),
        }
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Boot,
    Connecting(u64),
    ConnectionError,
    Readings(ReadingsView),
}

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Frame>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn last_readings(&self) -> Option<&ReadingsView> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Readings(v) => Some(v),
            _ => None,
        })
    }
}

impl DisplayPort for MockDisplay {
    fn show_boot(&mut self) {
        self.frames.push(Frame::Boot);
    }

    fn show_connecting(&mut self, elapsed_ms: u64) {
        self.frames.push(Frame::Connecting(elapsed_ms));
    }

    fn show_connection_error(&mut self) {
        self.frames.push(Frame::ConnectionError);
    }

    fn show_readings(&mut self, view: &ReadingsView) {
        self.frames.push(Frame::Readings(view.clone()));
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
