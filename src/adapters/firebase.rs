//! Realtime-database telemetry sink.
//!
//! Implements [`TelemetrySink`] by serialising the snapshot with
//! `serde_json` and writing it to the database root:
//!
//! ```text
//! PUT https://<db_host>/.json?auth=<db_auth>
//! content-type: application/json
//!
//! {"fireDetected":false,"smokeDetected":false,...}
//! ```
//!
//! A PUT replaces the whole document, so the remote store always holds the
//! latest snapshot only.  Transport errors and non-2xx statuses come back
//! as [`PublishError`]s; nothing is retried here.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspHttpConnection` over TLS with the
//!   built-in certificate bundle.
//! - **all other targets**: records every body it would have sent and can
//!   be told to fail.

use core::fmt::Write as _;

use log::debug;

use crate::app::ports::TelemetrySink;
use crate::config::Credentials;
use crate::error::{CommsError, PublishError};
use crate::telemetry::TelemetrySnapshot;

#[cfg(target_os = "espidf")]
use embedded_svc::{
    http::{Method, Status, client::Client as HttpClient},
    io::Write,
};
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};

/// Bounded request timeout; the monitoring loop waits on it.
#[cfg(target_os = "espidf")]
const HTTP_TIMEOUT: core::time::Duration = core::time::Duration::from_secs(5);

pub type Url = heapless::String<192>;

/// Build the database URL for `credentials`.
pub fn database_url(credentials: &Credentials) -> Result<Url, CommsError> {
    let mut url = Url::new();
    write!(
        url,
        "https://{}/.json?auth={}",
        credentials.db_host, credentials.db_auth
    )
    .map_err(|_| CommsError::HttpRequestFailed)?;
    Ok(url)
}

pub struct FirebaseSink {
    url: Url,
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<String>,
    #[cfg(not(target_os = "espidf"))]
    sim_failure: Option<CommsError>,
}

impl FirebaseSink {
    pub fn new(credentials: &Credentials) -> Result<Self, CommsError> {
        Ok(Self {
            url: database_url(credentials)?,
            #[cfg(not(target_os = "espidf"))]
            sent: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_failure: None,
        })
    }

    #[cfg(target_os = "espidf")]
    fn put(&mut self, body: &str) -> Result<(), CommsError> {
        let conf = HttpClientConfiguration {
            timeout: Some(HTTP_TIMEOUT),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let conn = EspHttpConnection::new(&conf).map_err(|_| CommsError::HttpRequestFailed)?;
        let mut client = HttpClient::wrap(conn);

        let mut len = heapless::String::<10>::new();
        let _ = write!(len, "{}", body.len());
        let headers = [
            ("content-type", "application/json"),
            ("content-length", len.as_str()),
        ];
        let mut request = client
            .request(Method::Put, &self.url, &headers)
            .map_err(|_| CommsError::HttpRequestFailed)?;
        request
            .write_all(body.as_bytes())
            .map_err(|_| CommsError::HttpRequestFailed)?;
        request.flush().map_err(|_| CommsError::HttpRequestFailed)?;
        let response = request.submit().map_err(|_| CommsError::HttpRequestFailed)?;

        let status = response.status();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(CommsError::HttpStatus(status))
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn put(&mut self, body: &str) -> Result<(), CommsError> {
        if let Some(e) = self.sim_failure {
            return Err(e);
        }
        self.sent.push(body.to_owned());
        Ok(())
    }

    // ── Simulation controls ───────────────────────────────────

    /// Make every following publish fail with `failure` (or succeed again
    /// with `None`).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_failure(&mut self, failure: Option<CommsError>) {
        self.sim_failure = failure;
    }

    /// Bodies accepted so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TelemetrySink for FirebaseSink {
    fn publish(&mut self, snapshot: &TelemetrySnapshot) -> Result<(), PublishError> {
        let body = serde_json::to_string(snapshot).map_err(|_| CommsError::SerializeFailed)?;
        debug!("firebase: PUT {} bytes", body.len());
        self.put(&body)?;
        Ok(())
    }
}
