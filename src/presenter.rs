//! Status presenter.
//!
//! Decides which screen the display shows for the current cycle and
//! composes the text of the readings screen.  Rendering itself is the
//! [`DisplayPort`]'s business.
//!
//! Readings screen layout:
//!
//! ```text
//!  WiFi: -61 dBm          ← header, omitted during a hazard
//!  Temp: 22.00 C          ← or "Temp sensor error!"
//!  Humidity: 40.00 %      ← or "Humidity sensor error!"
//!  Smoke: 212
//! ```
//!
//! A fire alert replaces everything with "Alert: Leave room!", a smoke
//! warning with "Warning: Leave room!".

use core::fmt::Write;

use heapless::{String, Vec};

use crate::app::ports::{ClockPort, DisplayPort};
use crate::connectivity::ConnectivityStatus;
use crate::hazard::HazardState;
use crate::sensors::SensorReading;

pub type Line = String<32>;

pub const MAX_BODY_LINES: usize = 3;

/// Text frame for the readings screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadingsView {
    pub header: Option<Line>,
    pub body: Vec<Line, MAX_BODY_LINES>,
}

impl ReadingsView {
    pub fn compose(
        hazard: HazardState,
        reading: &SensorReading,
        has_wifi: bool,
        rssi: Option<i8>,
    ) -> Self {
        let mut view = Self::default();
        match hazard {
            HazardState::FireAlert => view.push_line(format_args!("Alert: Leave room!")),
            HazardState::SmokeWarning => view.push_line(format_args!("Warning: Leave room!")),
            HazardState::Normal => {
                view.header = Some(header(has_wifi, rssi));
                match reading.temperature_c {
                    Some(t) => view.push_line(format_args!("Temp: {:.2} C", t)),
                    None => view.push_line(format_args!("Temp sensor error!")),
                }
                match reading.humidity_pct {
                    Some(h) => view.push_line(format_args!("Humidity: {:.2} %", h)),
                    None => view.push_line(format_args!("Humidity sensor error!")),
                }
                view.push_line(format_args!("Smoke: {}", reading.smoke_level));
            }
        }
        view
    }

    /// Header (if any) followed by the body lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.body.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lines().any(|l| l == text)
    }

    fn push_line(&mut self, args: core::fmt::Arguments<'_>) {
        let _ = self.body.push(line(args));
    }
}

fn header(has_wifi: bool, rssi: Option<i8>) -> Line {
    match (has_wifi, rssi) {
        (true, Some(dbm)) => line(format_args!("WiFi: {} dBm", dbm)),
        (true, None) => line(format_args!("WiFi: -- dBm")),
        (false, _) => line(format_args!("No WiFi")),
    }
}

/// Format into a line, truncating anything past its capacity.
fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut s = Line::new();
    let _ = s.write_fmt(args);
    s
}

pub struct StatusPresenter {
    error_hold_ms: u32,
}

impl StatusPresenter {
    pub fn new(error_hold_ms: u32) -> Self {
        Self { error_hold_ms }
    }

    /// Drive the display for one cycle.  Blocks for the error hold when
    /// the connection has timed out.
    pub fn present(
        &self,
        display: &mut impl DisplayPort,
        clock: &mut impl ClockPort,
        status: ConnectivityStatus,
        hazard: HazardState,
        reading: &SensorReading,
        rssi: Option<i8>,
    ) {
        match status {
            ConnectivityStatus::Connecting { elapsed_ms } => display.show_connecting(elapsed_ms),
            ConnectivityStatus::TimedOut => {
                display.show_connection_error();
                clock.delay_ms(self.error_hold_ms);
                display.show_readings(&ReadingsView::compose(hazard, reading, false, None));
            }
            ConnectivityStatus::Connected => {
                display.show_readings(&ReadingsView::compose(hazard, reading, true, rssi));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temp: Option<f32>, humidity: Option<f32>) -> SensorReading {
        SensorReading {
            flame_detected: false,
            smoke_level: 212,
            temperature_c: temp,
            humidity_pct: humidity,
        }
    }

    #[test]
    fn normal_view_online() {
        let v = ReadingsView::compose(HazardState::Normal, &reading(Some(22.0), Some(40.0)), true, Some(-61));
        let lines: std::vec::Vec<&str> = v.lines().collect();
        assert_eq!(
            lines,
            ["WiFi: -61 dBm", "Temp: 22.00 C", "Humidity: 40.00 %", "Smoke: 212"]
        );
    }

    #[test]
    fn offline_header_and_sensor_errors() {
        let v = ReadingsView::compose(HazardState::Normal, &reading(None, None), false, Some(-40));
        assert_eq!(v.header.as_deref(), Some("No WiFi"));
        assert!(v.contains("Temp sensor error!"));
        assert!(v.contains("Humidity sensor error!"));
    }

    #[test]
    fn hazards_replace_the_readings() {
        let v = ReadingsView::compose(HazardState::FireAlert, &reading(Some(22.0), Some(40.0)), true, Some(-50));
        assert!(v.header.is_none());
        assert_eq!(v.lines().collect::<std::vec::Vec<_>>(), ["Alert: Leave room!"]);

        let v = ReadingsView::compose(HazardState::SmokeWarning, &reading(Some(22.0), Some(40.0)), false, None);
        assert_eq!(v.lines().collect::<std::vec::Vec<_>>(), ["Warning: Leave room!"]);
    }

    #[test]
    fn negative_temperature_keeps_two_decimals() {
        let v = ReadingsView::compose(HazardState::Normal, &reading(Some(-3.5), Some(80.0)), true, None);
        assert!(v.contains("Temp: -3.50 C"));
        assert_eq!(v.header.as_deref(), Some("WiFi: -- dBm"));
    }
}
