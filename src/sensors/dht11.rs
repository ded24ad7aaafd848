//! DHT11 temperature / humidity sensor (single-wire protocol).
//!
//! ```text
//!  host start     sensor response        40 data bits
//!  ──┐     ┌──┐    ┌────┐    ┌─┐ ┌───┐ ┌─┐ ┌─ ...
//!    └─────┘  └────┘    └────┘ └─┘   └─┘ └─┘
//!    ≥18 ms   ~80 µs  ~80 µs   50µs low + 26µs high = 0
//!                              50µs low + 70µs high = 1
//! ```
//!
//! Frame: `[rh_int, rh_dec, t_int, t_dec, checksum]`, checksum being the
//! low byte of the sum of the first four bytes.  The part cannot be polled
//! faster than once every two seconds, so one transaction result is cached
//! and served to both the temperature and humidity reads of a cycle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data GPIO with busy-wait timing.
//! On host/test: reads from static atomics for injection; a NaN pattern
//! stands for "read failed".

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use log::warn;

use crate::error::SensorError;

/// Minimum spacing between two bus transactions.
pub const MIN_INTERVAL_MS: u64 = 2_000;

/// A high phase longer than this encodes a `1` bit.
const ONE_BIT_THRESHOLD_US: u32 = 40;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41B0_0000); // 22.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUMID_BITS: AtomicU32 = AtomicU32::new(0x4220_0000); // 40.0

/// Inject simulated values; `None` simulates a failed read of that field.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: Option<f32>, humidity_pct: Option<f32>) {
    SIM_TEMP_BITS.store(temperature_c.unwrap_or(f32::NAN).to_bits(), Ordering::Relaxed);
    SIM_HUMID_BITS.store(humidity_pct.unwrap_or(f32::NAN).to_bits(), Ordering::Relaxed);
}

/// A successfully decoded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Result of one transaction as seen by the rest of the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateReading {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
}

impl From<DhtSample> for ClimateReading {
    fn from(s: DhtSample) -> Self {
        Self {
            temperature_c: Some(s.temperature_c),
            humidity_pct: Some(s.humidity_pct),
        }
    }
}

/// Pack 40 measured high-phase durations into the 5-byte frame, MSB first.
pub fn frame_from_pulses(high_us: &[u32; 40]) -> [u8; 5] {
    let mut frame = [0u8; 5];
    for (i, &us) in high_us.iter().enumerate() {
        if us > ONE_BIT_THRESHOLD_US {
            frame[i / 8] |= 0x80 >> (i % 8);
        }
    }
    frame
}

/// Validate the checksum and convert the frame to engineering units.
pub fn decode_frame(frame: [u8; 5]) -> Result<DhtSample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
    let mut temperature_c = f32::from(frame[2]) + f32::from(frame[3] & 0x0f) * 0.1;
    if frame[3] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    if humidity_pct > 100.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok(DhtSample {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11Sensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
    /// Last transaction and the time (ms) it was taken.
    cached: Option<(u64, ClimateReading)>,
}

impl Dht11Sensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, cached: None }
    }

    /// Temperature (°C), or `None` if the current transaction failed.
    pub fn temperature(&mut self, now_ms: u64) -> Option<f32> {
        self.sample(now_ms).temperature_c
    }

    /// Relative humidity (%), or `None` if the current transaction failed.
    pub fn humidity(&mut self, now_ms: u64) -> Option<f32> {
        self.sample(now_ms).humidity_pct
    }

    /// Return the cached transaction, or run a new one once the minimum
    /// interval has passed.
    pub fn sample(&mut self, now_ms: u64) -> ClimateReading {
        if let Some((taken_at, reading)) = self.cached {
            if now_ms.saturating_sub(taken_at) < MIN_INTERVAL_MS {
                return reading;
            }
        }
        let reading = self.platform_sample();
        self.cached = Some((now_ms, reading));
        reading
    }

    #[cfg(target_os = "espidf")]
    fn platform_sample(&self) -> ClimateReading {
        match bus::transaction(self.gpio).and_then(decode_frame) {
            Ok(sample) => sample.into(),
            Err(e) => {
                warn!("DHT11: read failed ({})", e);
                ClimateReading::default()
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_sample(&self) -> ClimateReading {
        let finite = |bits: u32| Some(f32::from_bits(bits)).filter(|v| v.is_finite());
        let reading = ClimateReading {
            temperature_c: finite(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: finite(SIM_HUMID_BITS.load(Ordering::Relaxed)),
        };
        if reading.temperature_c.is_none() || reading.humidity_pct.is_none() {
            warn!("DHT11(sim): read failed");
        }
        reading
    }
}

// ── Bus timing (ESP-IDF only) ─────────────────────────────────

#[cfg(target_os = "espidf")]
mod bus {
    use esp_idf_svc::sys::*;

    use super::frame_from_pulses;
    use crate::error::SensorError;

    const START_LOW_US: u32 = 20_000;
    const START_RELEASE_US: u32 = 30;
    const RESPONSE_TIMEOUT_US: u32 = 100;
    const BIT_TIMEOUT_US: u32 = 100;

    fn level(pin: i32) -> bool {
        // SAFETY: register read on a configured pin.
        (unsafe { gpio_get_level(pin) }) != 0
    }

    fn now_us() -> i64 {
        // SAFETY: esp_timer_get_time is a monotonic counter read.
        unsafe { esp_timer_get_time() }
    }

    /// Busy-wait while the line sits at `high`; returns how long it stayed.
    fn wait_while(pin: i32, high: bool, timeout_us: u32) -> Result<u32, SensorError> {
        let start = now_us();
        loop {
            let elapsed = (now_us() - start) as u32;
            if level(pin) != high {
                return Ok(elapsed);
            }
            if elapsed > timeout_us {
                return Err(SensorError::Timeout);
            }
        }
    }

    pub(super) fn transaction(pin: i32) -> Result<[u8; 5], SensorError> {
        // SAFETY: the data pin is owned by this driver and only touched from
        // the main loop.
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD);
            gpio_set_level(pin, 0);
            esp_rom_delay_us(START_LOW_US);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(START_RELEASE_US);
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
        }

        wait_while(pin, true, RESPONSE_TIMEOUT_US).map_err(|_| SensorError::NoResponse)?;
        wait_while(pin, false, RESPONSE_TIMEOUT_US)?;
        wait_while(pin, true, RESPONSE_TIMEOUT_US)?;

        let mut high_us = [0u32; 40];
        for slot in &mut high_us {
            wait_while(pin, false, BIT_TIMEOUT_US)?;
            *slot = wait_while(pin, true, BIT_TIMEOUT_US)?;
        }
        Ok(frame_from_pulses(&high_us))
    }
}
