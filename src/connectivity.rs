//! Connectivity manager.
//!
//! Turns the network stack's association flag plus the time since the
//! station was started into a three-state [`ConnectivityStatus`].
//!
//! ```text
//!            associated                      associated
//!   ┌──────────────────────────▶ Connected ◀──────────────┐
//!   │                                                      │
//! Connecting ──── elapsed ≥ timeout ────▶ TimedOut ────────┘
//! ```
//!
//! Evaluation is level-triggered: every cycle recomputes the status from
//! scratch.  The start timestamp is captured once and never reset, so a
//! station that drops off after the deadline reports `TimedOut` rather
//! than `Connecting`.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    /// Still inside the association window.
    Connecting { elapsed_ms: u64 },
    /// Network stack reports association.
    Connected,
    /// Deadline passed without association.
    TimedOut,
}

impl ConnectivityStatus {
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting { elapsed_ms } => write!(f, "connecting ({} ms)", elapsed_ms),
            Self::Connected => write!(f, "connected"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

pub struct ConnectivityManager {
    started_at_ms: u64,
    timeout_ms: u64,
}

impl ConnectivityManager {
    /// `started_at_ms` is the monotonic time at which the station was
    /// started.
    pub fn new(started_at_ms: u64, timeout_ms: u32) -> Self {
        Self {
            started_at_ms,
            timeout_ms: u64::from(timeout_ms),
        }
    }

    /// Evaluate the status for this cycle.
    pub fn status(&self, now_ms: u64, associated: bool) -> ConnectivityStatus {
        if associated {
            return ConnectivityStatus::Connected;
        }
        let elapsed_ms = now_ms.saturating_sub(self.started_at_ms);
        if elapsed_ms >= self.timeout_ms {
            ConnectivityStatus::TimedOut
        } else {
            ConnectivityStatus::Connecting { elapsed_ms }
        }
    }

    /// Telemetry is attempted only while connected.
    pub fn should_publish(status: ConnectivityStatus) -> bool {
        status.is_connected()
    }
}
