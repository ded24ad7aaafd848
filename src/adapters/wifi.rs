//! WiFi station-mode adapter.
//!
//! Implements [`NetworkPort`], the hexagonal boundary for network
//! connectivity.  [`WifiAdapter::begin`] configures and starts the station
//! exactly once at boot.  After that the adapter answers "associated?" and
//! "how strong?", and [`NetworkPort::maintain`] re-requests association
//! with exponential backoff while the link is down.  The connecting
//! deadline and the timed-out state are domain logic and live in the
//! connectivity manager, not here.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation with injectable association and RSSI.

use log::{info, warn};

use crate::app::ports::NetworkPort;
use crate::config::Credentials;
use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

/// First reconnect delay after the link is seen down.
const INITIAL_BACKOFF_SECS: u32 = 2;
/// Maximum reconnect backoff.
const MAX_BACKOFF_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    /// `begin` has not run yet.
    Idle,
    /// Station started and association requested.
    Started,
    /// Driver start failed; stays offline for the rest of the run.
    Failed,
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    /// Reconnect attempts since the link was last up.
    attempt: u32,
    backoff_secs: u32,
    /// When the next `connect()` is due; `None` while associated.
    next_attempt_ms: Option<u64>,
    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,
    #[cfg(not(target_os = "espidf"))]
    sim_associated: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_ap_reachable: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_calls: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_rssi: i8,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: EspWifi<'static>) -> Self {
        Self {
            state: WifiState::Idle,
            ssid: heapless::String::new(),
            attempt: 0,
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_attempt_ms: None,
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: WifiState::Idle,
            ssid: heapless::String::new(),
            attempt: 0,
            backoff_secs: INITIAL_BACKOFF_SECS,
            next_attempt_ms: None,
            sim_associated: false,
            sim_ap_reachable: false,
            sim_connect_calls: 0,
            sim_rssi: -60,
        }
    }

    /// Configure station mode and request association.  Only the first
    /// call does anything; the station is never restarted.
    pub fn begin(&mut self, credentials: &Credentials) -> Result<(), CommsError> {
        if self.state != WifiState::Idle {
            warn!("WiFi: begin() called twice, ignoring");
            return Ok(());
        }
        self.ssid = credentials.wifi_ssid.clone();
        info!("WiFi: connecting to '{}'", self.ssid);

        match self.platform_begin(credentials) {
            Ok(()) => {
                self.state = WifiState::Started;
                Ok(())
            }
            Err(e) => {
                warn!("WiFi: start failed ({})", e);
                self.state = WifiState::Failed;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Reconnect attempts made since the link was last up.
    pub fn reconnect_attempts(&self) -> u32 {
        self.attempt
    }

    /// Current reconnect backoff in seconds.
    pub fn backoff_secs(&self) -> u32 {
        self.backoff_secs
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_begin(&mut self, credentials: &Credentials) -> Result<(), CommsError> {
        let auth_method = if credentials.wifi_password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPAWPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: credentials.wifi_ssid.clone(),
            password: credentials.wifi_password.clone(),
            auth_method,
            ..Default::default()
        });
        self.wifi
            .set_configuration(&config)
            .map_err(|_| CommsError::WifiInitFailed)?;
        self.wifi.start().map_err(|_| CommsError::WifiInitFailed)?;
        self.platform_connect()
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin(&mut self, _credentials: &Credentials) -> Result<(), CommsError> {
        info!("WiFi(sim): station started");
        self.platform_connect()
    }

    /// Non-blocking: association completes in the background and is
    /// observed through is_associated().
    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.wifi.connect().map_err(|_| CommsError::WifiConnectFailed)
    }

    /// The request itself always goes out; the simulated AP accepts it
    /// only while reachable.
    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.sim_connect_calls += 1;
        if self.sim_ap_reachable {
            self.sim_associated = true;
        }
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_associated(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_associated(&self) -> bool {
        self.sim_associated
    }

    #[cfg(target_os = "espidf")]
    fn platform_rssi(&self) -> Option<i8> {
        let mut ap_info = esp_idf_svc::sys::wifi_ap_record_t::default();
        // SAFETY: ap_info is a valid out-pointer; the driver is started.
        let rc = unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap_info) };
        (rc == esp_idf_svc::sys::ESP_OK).then_some(ap_info.rssi)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_rssi(&self) -> Option<i8> {
        Some(self.sim_rssi)
    }

    // ── Simulation controls ───────────────────────────────────

    /// Simulate the access point accepting or dropping the station.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_associated(&mut self, associated: bool) {
        self.sim_associated = associated;
    }

    /// Simulate the access point going away (dropping the station) or
    /// coming back.  A returning AP only associates on the next
    /// `connect()`.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_ap_reachable(&mut self, reachable: bool) {
        self.sim_ap_reachable = reachable;
        if !reachable {
            self.sim_associated = false;
        }
    }

    /// Number of association requests sent so far, `begin` included.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_connect_calls(&self) -> u32 {
        self.sim_connect_calls
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_rssi(&mut self, dbm: i8) {
        self.sim_rssi = dbm;
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// NetworkPort
// ───────────────────────────────────────────────────────────────

impl NetworkPort for WifiAdapter {
    fn is_associated(&self) -> bool {
        self.state == WifiState::Started && self.platform_associated()
    }

    fn signal_strength(&self) -> Option<i8> {
        if self.is_associated() {
            self.platform_rssi()
        } else {
            None
        }
    }

    /// The driver does not re-associate on its own.  While the link is
    /// down, ask again every `backoff_secs`, doubling up to
    /// [`MAX_BACKOFF_SECS`].  The first miss only arms the timer so an
    /// in-flight association gets a chance to finish.
    fn maintain(&mut self, now_ms: u64) {
        if self.state != WifiState::Started {
            return;
        }

        if self.platform_associated() {
            if self.attempt > 0 {
                info!("WiFi: reconnected after {} attempt(s)", self.attempt);
            }
            self.attempt = 0;
            self.backoff_secs = INITIAL_BACKOFF_SECS;
            self.next_attempt_ms = None;
            return;
        }

        match self.next_attempt_ms {
            None => {
                warn!("WiFi: link down, reconnecting in {}s", self.backoff_secs);
                self.next_attempt_ms = Some(now_ms + u64::from(self.backoff_secs) * 1000);
            }
            Some(due) if now_ms >= due => {
                self.attempt += 1;
                info!(
                    "WiFi: reconnect attempt {} (backoff {}s)",
                    self.attempt, self.backoff_secs
                );
                if let Err(e) = self.platform_connect() {
                    warn!("WiFi: reconnect request failed ({})", e);
                }
                self.backoff_secs = (self.backoff_secs * 2).min(MAX_BACKOFF_SECS);
                self.next_attempt_ms = Some(now_ms + u64::from(self.backoff_secs) * 1000);
            }
            Some(_) => {}
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
