//! System configuration parameters
//!
//! All thresholds, alert timings and loop cadence for the HazardMon system.
//! Fixed at startup; nothing here is reloaded while the loop runs.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on fire bursts; each burst is two pattern steps.
pub const MAX_FIRE_REPETITIONS: u8 = 16;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Hazard thresholds ---
    /// Raw smoke ADC value above which smoke is reported
    pub smoke_threshold: u16,
    /// Temperature (°C) above which the snapshot flags excessive heat
    pub excessive_temperature_c: f32,

    // --- Connectivity ---
    /// One-shot deadline (ms since the network was started) for association
    pub connect_timeout_ms: u32,

    // --- Alerting ---
    pub alerts: AlertTimings,

    // --- Loop cadence ---
    pub cadence: Cadence,
}

/// Buzzer / LED timings for the two alert patterns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertTimings {
    /// Number of on/off bursts in the fire pattern
    pub fire_repetitions: u8,
    pub fire_on_ms: u32,
    pub fire_off_ms: u32,
    pub fire_tone_hz: u16,
    pub smoke_on_ms: u32,
    pub smoke_off_ms: u32,
    pub smoke_tone_hz: u16,
}

impl Default for AlertTimings {
    fn default() -> Self {
        Self {
            fire_repetitions: 5,
            fire_on_ms: 100,
            fire_off_ms: 100,
            fire_tone_hz: 1000,
            smoke_on_ms: 300,
            smoke_off_ms: 700,
            smoke_tone_hz: 500,
        }
    }
}

/// Delay policy between monitoring cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    /// Pause after a cycle while associated
    pub connected_interval_ms: u32,
    /// Pause after a cycle while still inside the connecting window
    pub connecting_interval_ms: u32,
    /// How long the connection-error screen stays up before the readings
    pub error_screen_hold_ms: u32,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            connected_interval_ms: 2000,
            connecting_interval_ms: 500,
            error_screen_hold_ms: 2000,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            smoke_threshold: 600,
            excessive_temperature_c: 35.0,
            connect_timeout_ms: 60_000,
            alerts: AlertTimings::default(),
            cadence: Cadence::default(),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smoke_threshold == 0 || self.smoke_threshold >= 4095 {
            return Err(ConfigError::ValidationFailed(
                "smoke_threshold must be within the 12-bit ADC range",
            ));
        }
        if !self.excessive_temperature_c.is_finite()
            || !(0.0..=80.0).contains(&self.excessive_temperature_c)
        {
            return Err(ConfigError::ValidationFailed(
                "excessive_temperature_c must be 0-80 C",
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("connect_timeout_ms must be > 0"));
        }
        let a = &self.alerts;
        if a.fire_repetitions == 0 || a.fire_on_ms == 0 || a.smoke_on_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert patterns need a non-zero on phase"));
        }
        if a.fire_repetitions > MAX_FIRE_REPETITIONS {
            return Err(ConfigError::ValidationFailed("fire_repetitions must be <= 16"));
        }
        if a.fire_tone_hz == 0 || a.smoke_tone_hz == 0 {
            return Err(ConfigError::ValidationFailed("alert tones must be audible (> 0 Hz)"));
        }
        // The fire burst plus the error-screen hold must fit well inside the
        // 10 s task watchdog window.
        let fire_ms = u32::from(a.fire_repetitions)
            .saturating_mul(a.fire_on_ms.saturating_add(a.fire_off_ms));
        if fire_ms.saturating_add(self.cadence.error_screen_hold_ms) > 5_000 {
            return Err(ConfigError::ValidationFailed(
                "fire pattern + error hold exceed 5 s",
            ));
        }
        if self.cadence.connected_interval_ms == 0 || self.cadence.connecting_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("cadence intervals must be > 0"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Network and telemetry-store credentials, baked in at build time.
#[derive(Clone, Default)]
pub struct Credentials {
    pub wifi_ssid: String<32>,
    pub wifi_password: String<64>,
    /// Realtime-database host, without scheme (e.g. `my-db.firebaseio.com`)
    pub db_host: String<96>,
    /// Legacy database secret appended as `?auth=`
    pub db_auth: String<64>,
}

// Secrets stay out of logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("db_host", &self.db_host)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Build and validate credentials from plain strings.
    pub fn new(
        wifi_ssid: &str,
        wifi_password: &str,
        db_host: &str,
        db_auth: &str,
    ) -> Result<Self, ConfigError> {
        validate_ssid(wifi_ssid)?;
        validate_password(wifi_password)?;
        if db_host.is_empty() || !db_host.bytes().all(is_host_byte) {
            return Err(ConfigError::ValidationFailed(
                "db_host must be a bare hostname (letters, digits, '-', '.', ':')",
            ));
        }
        // Spliced into the query string as-is, so only unreserved bytes.
        if !db_auth.bytes().all(is_unreserved_byte) {
            return Err(ConfigError::ValidationFailed(
                "db_auth may only contain A-Z a-z 0-9 - . _ ~",
            ));
        }
        Ok(Self {
            wifi_ssid: copy_into(wifi_ssid, "wifi_ssid too long")?,
            wifi_password: copy_into(wifi_password, "wifi_password too long")?,
            db_host: copy_into(db_host, "db_host too long")?,
            db_auth: copy_into(db_auth, "db_auth too long")?,
        })
    }

    /// Credentials injected through `HAZARD_*` environment variables at
    /// compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::new(
            option_env!("HAZARD_WIFI_SSID").unwrap_or(""),
            option_env!("HAZARD_WIFI_PASS").unwrap_or(""),
            option_env!("HAZARD_DB_HOST").unwrap_or(""),
            option_env!("HAZARD_DB_AUTH").unwrap_or(""),
        )
    }
}

fn copy_into<const N: usize>(s: &str, err: &'static str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(s).map_err(|()| ConfigError::ValidationFailed(err))?;
    Ok(out)
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b':')
}

/// RFC 3986 unreserved set.
fn is_unreserved_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn validate_ssid(ssid: &str) -> Result<(), ConfigError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConfigError::ValidationFailed(
            "SSID must be 1-32 printable ASCII bytes",
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConfigError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConfigError::ValidationFailed(
            "password must be 8-64 bytes for WPA2, or empty for open",
        ));
    }
    Ok(())
}
