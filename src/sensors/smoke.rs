//! MQ-2 smoke / combustible-gas sensor driver.
//!
//! Reads the analog output through an ESP32-S3 ADC1 channel and reports
//! the raw 12-bit value.  Thresholding happens in the hazard classifier,
//! not here; the raw number is also what gets published.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_SMOKE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_smoke_adc(raw: u16) {
    SIM_SMOKE_ADC.store(raw, Ordering::Relaxed);
}

const ADC_MAX: u16 = 4095;

pub struct SmokeSensor {
    _adc_gpio: i32,
}

impl SmokeSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Raw ADC value, clamped to the 12-bit range.
    pub fn read(&self) -> u16 {
        self.read_adc().min(ADC_MAX)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_SMOKE)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_SMOKE_ADC.load(Ordering::Relaxed)
    }
}
