//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, ClockPort, SensorPort};
use crate::drivers::buzzer::{Buzzer, BuzzerState};
use crate::drivers::indicator_led::IndicatorLed;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    fire_led: IndicatorLed,
    smoke_led: IndicatorLed,
    buzzer: Buzzer,
    /// Timestamps for the DHT transaction cache.
    clock: Esp32TimeAdapter,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        fire_led: IndicatorLed,
        smoke_led: IndicatorLed,
        buzzer: Buzzer,
    ) -> Self {
        Self {
            sensor_hub,
            fire_led,
            smoke_led,
            buzzer,
            clock: Esp32TimeAdapter::new(),
        }
    }

    /// (fire LED, smoke LED, buzzer) as last driven.
    pub fn outputs(&self) -> (bool, bool, BuzzerState) {
        (self.fire_led.is_on(), self.smoke_led.is_on(), self.buzzer.state())
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_flame(&mut self) -> bool {
        self.sensor_hub.flame.read()
    }

    fn read_smoke(&mut self) -> u16 {
        self.sensor_hub.smoke.read()
    }

    fn read_temperature(&mut self) -> Option<f32> {
        self.sensor_hub.climate.temperature(self.clock.now_ms())
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.sensor_hub.climate.humidity(self.clock.now_ms())
    }

    fn read(&mut self) -> crate::sensors::SensorReading {
        self.sensor_hub.read_all(self.clock.now_ms())
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_fire_led(&mut self, on: bool) {
        self.fire_led.set(on);
    }

    fn set_smoke_led(&mut self, on: bool) {
        self.smoke_led.set(on);
    }

    fn tone(&mut self, hz: u16) {
        self.buzzer.tone(hz);
    }

    fn no_tone(&mut self) {
        self.buzzer.silence();
    }

    fn all_off(&mut self) {
        self.fire_led.off();
        self.smoke_led.off();
        self.buzzer.silence();
    }
}
