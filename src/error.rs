//! Unified error types for the HazardMon firmware.
//!
//! A single `Error` enum that every subsystem can convert into.  None of
//! these are fatal once the monitoring loop is running: sensor errors turn
//! into "unavailable" readings and comms errors into skipped or failed
//! publishes.  All variants are `Copy` so they can be passed around without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// Network or telemetry transport failed.
    Comms(CommsError),
    /// Configuration or credentials are invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor never pulled the line low after the start pulse.
    NoResponse,
    /// A bit or handshake phase exceeded its time budget.
    Timeout,
    /// The frame checksum did not match the payload.
    ChecksumMismatch,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response"),
            Self::Timeout => write!(f, "timed out"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiInitFailed,
    WifiConnectFailed,
    HttpRequestFailed,
    HttpStatus(u16),
    SerializeFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiInitFailed => write!(f, "WiFi driver init failed"),
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::HttpRequestFailed => write!(f, "HTTP request failed"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::SerializeFailed => write!(f, "snapshot serialisation failed"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Telemetry publish errors
// ---------------------------------------------------------------------------

/// Why a telemetry sink rejected a snapshot.
///
/// Sinks report free-text reasons (HTTP body snippets, driver messages), so
/// this carries a bounded string instead of a fixed set of variants.
/// Over-long reasons are truncated on a character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishError {
    pub reason: heapless::String<64>,
}

impl PublishError {
    pub fn new(reason: &str) -> Self {
        let mut out = heapless::String::new();
        for c in reason.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        Self { reason: out }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for PublishError {}

impl From<CommsError> for PublishError {
    fn from(e: CommsError) -> Self {
        let mut reason = heapless::String::new();
        // Every CommsError message fits in 64 bytes.
        let _ = fmt::Write::write_fmt(&mut reason, format_args!("{e}"));
        Self { reason }
    }
}
