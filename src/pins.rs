//! GPIO / peripheral pin assignments for the HazardMon main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// IR flame sensor module, digital output.  LOW = flame detected.
pub const FLAME_SENSOR_GPIO: i32 = 4;

/// DHT11 temperature / humidity sensor, single-wire open-drain data line
/// with an external 10 kΩ pull-up.
pub const DHT_DATA_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// MQ-2 smoke sensor — analog voltage via resistive divider.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const SMOKE_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Alert outputs
// ---------------------------------------------------------------------------

/// Red indicator LED — fire alert.
pub const FIRE_LED_GPIO: i32 = 7;
/// Green indicator LED — smoke warning.
pub const SMOKE_LED_GPIO: i32 = 15;
/// Passive piezo buzzer, driven by an LEDC square wave.
pub const BUZZER_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Initial buzzer LEDC frequency; retuned per tone.
pub const BUZZER_BASE_FREQ_HZ: u32 = 1_000;
