//! IR flame sensor (LM393 comparator module).
//!
//! The module pulls its digital output LOW when the photodiode sees a
//! flame-band IR source above the trim-pot threshold.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level configured by hw_init.
//! On host/test: reads from a static `AtomicBool` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_FLAME: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_flame(detected: bool) {
    SIM_FLAME.store(detected, Ordering::Relaxed);
}

pub struct FlameSensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
}

impl FlameSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// `true` while a flame is detected.
    pub fn read(&self) -> bool {
        self.platform_read()
    }

    #[cfg(target_os = "espidf")]
    fn platform_read(&self) -> bool {
        // Active-low output.
        !hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_read(&self) -> bool {
        SIM_FLAME.load(Ordering::Relaxed)
    }
}
