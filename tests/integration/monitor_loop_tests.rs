//! Integration tests for the MonitorService cycle pipeline.
//!
//! Sense → classify → actuate → connectivity → publish → present, driven
//! entirely through mock adapters and a virtual clock.

use hazardmon::app::events::AppEvent;
use hazardmon::app::service::{CycleReport, MonitorService};
use hazardmon::config::SystemConfig;
use hazardmon::connectivity::ConnectivityStatus;
use hazardmon::hazard::HazardState;
use hazardmon::sensors::SensorReading;
use hazardmon::telemetry::PublishOutcome;

use crate::mock_hw::{
    ActuatorCall, Frame, LogSink, MockClock, MockDisplay, MockHardware, MockNetwork,
    MockTelemetrySink,
};

struct Rig {
    service: MonitorService,
    hw: MockHardware,
    net: MockNetwork,
    clock: MockClock,
    telemetry: MockTelemetrySink,
    display: MockDisplay,
    events: LogSink,
}

impl Rig {
    /// Service booted at t = 0; the clock is then moved to `now_ms`.
    fn new(reading: SensorReading, net: MockNetwork, now_ms: u64) -> Self {
        let mut events = LogSink::default();
        let mut service = MonitorService::new(SystemConfig::default(), 0);
        service.start(&mut events);
        Self {
            service,
            hw: MockHardware::new(reading),
            net,
            clock: MockClock::at_ms(now_ms),
            telemetry: MockTelemetrySink::default(),
            display: MockDisplay::default(),
            events,
        }
    }

    fn cycle(&mut self) -> CycleReport {
        self.service.run_cycle(
            &mut self.hw,
            &mut self.net,
            &mut self.clock,
            &mut self.telemetry,
            &mut self.display,
            &mut self.events,
        )
    }
}

fn reading(flame: bool, smoke: u16, temp: Option<f32>, humidity: Option<f32>) -> SensorReading {
    SensorReading {
        flame_detected: flame,
        smoke_level: smoke,
        temperature_c: temp,
        humidity_pct: humidity,
    }
}

fn quiet() -> SensorReading {
    reading(false, 150, Some(21.0), Some(40.0))
}

// ── Hazard scenarios ──────────────────────────────────────────

#[test]
fn flame_triggers_fire_alert_with_five_bursts() {
    let mut rig = Rig::new(
        reading(true, 200, Some(22.0), Some(40.0)),
        MockNetwork::online(-55),
        5_000,
    );
    let report = rig.cycle();

    assert_eq!(report.hazard, HazardState::FireAlert);
    assert_eq!(rig.hw.calls[0], ActuatorCall::SmokeLed(false));
    assert_eq!(rig.hw.tones(1000), 5);
    assert!(rig.hw.fire_led_on());
    assert!(!rig.hw.smoke_led_on());
    assert!(rig.hw.buzzer_silent());

    let sent = rig.telemetry.attempts[0];
    assert!(sent.fire_detected);
    assert!(!sent.smoke_detected);
    assert_eq!(
        rig.display.last_readings().map(|v| v.body[0].as_str()),
        Some("Alert: Leave room!")
    );
}

#[test]
fn smoke_over_threshold_warns() {
    let mut rig = Rig::new(
        reading(false, 750, Some(24.0), Some(50.0)),
        MockNetwork::online(-55),
        5_000,
    );
    let report = rig.cycle();

    assert_eq!(report.hazard, HazardState::SmokeWarning);
    assert_eq!(rig.hw.calls[0], ActuatorCall::FireLed(false));
    assert_eq!(rig.hw.tones(500), 1);
    assert!(rig.hw.smoke_led_on());
    assert!(!rig.hw.fire_led_on());

    let sent = rig.telemetry.attempts[0];
    assert!(sent.smoke_detected);
    assert!(!sent.fire_detected);
    assert_eq!(sent.smoke_level, 750);
}

#[test]
fn missing_temperature_shows_error_and_publishes_null() {
    let mut rig = Rig::new(
        reading(false, 100, None, Some(45.0)),
        MockNetwork::online(-70),
        5_000,
    );
    let report = rig.cycle();

    assert_eq!(report.hazard, HazardState::Normal);
    assert_eq!(rig.hw.calls, vec![ActuatorCall::AllOff]);

    let view = rig.display.last_readings().unwrap();
    assert!(view.contains("Temp sensor error!"));
    assert!(view.contains("Humidity: 45.00 %"));
    assert!(view.contains("WiFi: -70 dBm"));

    let sent = rig.telemetry.attempts[0];
    assert_eq!(sent.temperature, None);
    assert!(!sent.excessive_temperature);
    let json = serde_json::to_string(&sent).unwrap();
    assert!(json.contains(r#""temperature":null"#));
}

#[test]
fn reading_event_precedes_assessment() {
    let mut rig = Rig::new(quiet(), MockNetwork::online(-60), 5_000);
    rig.cycle();

    // Started, Reading, Assessed, Published
    assert!(matches!(rig.events.events[0], AppEvent::Started { connect_timeout_ms: 60_000 }));
    assert!(matches!(
        rig.events.events[1],
        AppEvent::Reading {
            smoke_over_threshold: false,
            ..
        }
    ));
    assert!(matches!(
        rig.events.events[2],
        AppEvent::Assessed {
            cycle: 1,
            hazard: HazardState::Normal,
            connectivity: ConnectivityStatus::Connected,
        }
    ));
    assert_eq!(rig.events.events[3], AppEvent::Published);
}

// ── Connectivity scenarios ────────────────────────────────────

#[test]
fn timed_out_skips_publish_and_holds_error_screen() {
    let mut rig = Rig::new(quiet(), MockNetwork::offline(), 61_000);
    let report = rig.cycle();

    assert_eq!(report.connectivity, ConnectivityStatus::TimedOut);
    assert_eq!(report.publish, None);
    assert!(rig.telemetry.attempts.is_empty());
    assert_eq!(rig.events.count(|e| *e == AppEvent::PublishSkipped), 1);

    assert_eq!(rig.display.frames[0], Frame::ConnectionError);
    let view = rig.display.last_readings().unwrap();
    assert_eq!(view.header.as_deref(), Some("No WiFi"));
    assert_eq!(rig.clock.delays_ms, vec![2_000]);
    assert_eq!(report.next_delay_ms, 0);
}

#[test]
fn association_connects_immediately() {
    let mut rig = Rig::new(quiet(), MockNetwork::online(-48), 10_000);
    let report = rig.cycle();

    assert_eq!(report.connectivity, ConnectivityStatus::Connected);
    assert_eq!(report.publish, Some(PublishOutcome::Success));
    assert_eq!(rig.telemetry.attempts.len(), 1);
    assert_eq!(report.next_delay_ms, 2_000);
    assert!(rig.display.last_readings().unwrap().contains("WiFi: -48 dBm"));
}

#[test]
fn connecting_shows_progress_only() {
    let mut rig = Rig::new(quiet(), MockNetwork::offline(), 3_000);
    let report = rig.cycle();

    assert_eq!(report.connectivity, ConnectivityStatus::Connecting { elapsed_ms: 3_000 });
    assert_eq!(rig.display.frames, vec![Frame::Connecting(3_000)]);
    assert!(rig.telemetry.attempts.is_empty());
    assert_eq!(report.next_delay_ms, 500);
}

#[test]
fn deadline_counts_pattern_time() {
    // Fire pattern takes 1 s, so a cycle starting at 59.5 s evaluates
    // connectivity at 60.5 s.
    let mut rig = Rig::new(
        reading(true, 0, Some(20.0), Some(30.0)),
        MockNetwork::offline(),
        59_500,
    );
    let report = rig.cycle();
    assert_eq!(report.connectivity, ConnectivityStatus::TimedOut);
}

#[test]
fn late_association_recovers_from_timeout() {
    let mut rig = Rig::new(quiet(), MockNetwork::offline(), 65_000);
    assert_eq!(rig.cycle().connectivity, ConnectivityStatus::TimedOut);

    rig.net.associated = true;
    let report = rig.cycle();
    assert_eq!(report.connectivity, ConnectivityStatus::Connected);
    assert_eq!(rig.telemetry.attempts.len(), 1);

    // Dropping again after the deadline goes straight back to TimedOut.
    rig.net.associated = false;
    assert_eq!(rig.cycle().connectivity, ConnectivityStatus::TimedOut);
}

// ── Publish failure tolerance ─────────────────────────────────

#[test]
fn publish_failure_does_not_disturb_the_loop() {
    let mut rig = Rig::new(
        reading(false, 900, Some(23.0), Some(41.0)),
        MockNetwork::online(-60),
        5_000,
    );
    rig.telemetry.fail_with = Some("HTTP status 503");

    let first = rig.cycle();
    assert_eq!(first.hazard, HazardState::SmokeWarning);
    assert!(matches!(first.publish, Some(PublishOutcome::Failure(ref e)) if e.reason == "HTTP status 503"));
    assert!(rig.hw.smoke_led_on());
    assert_eq!(first.next_delay_ms, 2_000);

    let second = rig.cycle();
    assert_eq!(second.hazard, HazardState::SmokeWarning);
    assert_eq!(rig.telemetry.attempts.len(), 2, "next cycle must try again");
    assert_eq!(rig.service.publisher().failures(), 2);

    rig.telemetry.fail_with = None;
    assert_eq!(rig.cycle().publish, Some(PublishOutcome::Success));
    assert_eq!(rig.service.publisher().successes(), 1);
    assert_eq!(rig.service.cycle_count(), 3);
}

#[test]
fn clearing_hazard_turns_everything_off() {
    let mut rig = Rig::new(
        reading(true, 900, Some(23.0), Some(41.0)),
        MockNetwork::online(-60),
        5_000,
    );
    rig.cycle();
    assert!(rig.hw.fire_led_on());

    rig.hw.reading = quiet();
    let report = rig.cycle();
    assert_eq!(report.hazard, HazardState::Normal);
    assert!(!rig.hw.fire_led_on());
    assert!(!rig.hw.smoke_led_on());
    assert!(rig.hw.buzzer_silent());
}
