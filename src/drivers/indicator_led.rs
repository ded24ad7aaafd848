//! Single-colour indicator LED on a plain GPIO output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO configured by hw_init.
//! On host/test: tracks state in-memory only.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

pub struct IndicatorLed {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
    on: bool,
}

impl IndicatorLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        #[cfg(target_os = "espidf")]
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_level() {
        let mut led = IndicatorLed::new(7);
        assert!(!led.is_on());
        led.set(true);
        assert!(led.is_on());
        led.off();
        assert!(!led.is_on());
    }
}
