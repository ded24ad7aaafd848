//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { connect_timeout_ms } => {
                info!("START | connecting, deadline {} ms", connect_timeout_ms);
            }
            AppEvent::Reading {
                reading,
                smoke_over_threshold,
            } => {
                match (reading.temperature_c, reading.humidity_pct) {
                    (Some(t), Some(h)) => {
                        info!("SENSE | Temperature: {:.2} \u{00b0}C | Humidity: {:.2} %", t, h);
                    }
                    _ => warn!("SENSE | Failed to read from DHT sensor!"),
                }
                info!(
                    "SENSE | Flame: {} | Smoke: {} ({})",
                    if reading.flame_detected { "DETECTED" } else { "none" },
                    reading.smoke_level,
                    if *smoke_over_threshold { "WARNING" } else { "normal" },
                );
            }
            AppEvent::Assessed {
                cycle,
                hazard,
                connectivity,
            } => {
                info!("CYCLE | #{} | hazard={} | wifi={}", cycle, hazard, connectivity);
            }
            AppEvent::Published => info!("CLOUD | Data updated successfully"),
            AppEvent::PublishFailed(e) => warn!("CLOUD | Data update FAILED: {}", e),
            AppEvent::PublishSkipped => info!("CLOUD | Skipped update (no WiFi)"),
        }
    }
}
