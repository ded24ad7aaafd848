//! Integration test for the host-simulation adapters.
//!
//! Wires the real `HardwareAdapter`, `WifiAdapter`, `FirebaseSink`,
//! `ConsoleDisplay` and `LogEventSink` together the way the firmware's
//! `main` does, with simulated sensor inputs and a virtual clock.
//!
//! Simulated sensor inputs are process-wide, so everything that touches
//! them lives in this single test.

use hazardmon::adapters::display::{ConsoleDisplay, Screen};
use hazardmon::adapters::firebase::FirebaseSink;
use hazardmon::adapters::hardware::HardwareAdapter;
use hazardmon::adapters::log_sink::LogEventSink;
use hazardmon::adapters::wifi::WifiAdapter;
use hazardmon::app::ports::ClockPort;
use hazardmon::app::service::MonitorService;
use hazardmon::config::{Credentials, SystemConfig};
use hazardmon::connectivity::ConnectivityStatus;
use hazardmon::drivers::buzzer::{Buzzer, BuzzerState};
use hazardmon::drivers::indicator_led::IndicatorLed;
use hazardmon::error::{CommsError, PublishError};
use hazardmon::hazard::HazardState;
use hazardmon::pins;
use hazardmon::sensors::SensorHub;
use hazardmon::sensors::dht11::{self, Dht11Sensor};
use hazardmon::sensors::flame::{self, FlameSensor};
use hazardmon::sensors::smoke::{self, SmokeSensor};
use hazardmon::telemetry::PublishOutcome;

use crate::mock_hw::MockClock;

#[test]
fn simulated_device_end_to_end() {
    let credentials =
        Credentials::new("HomeWiFi", "mysecret8", "hazard-demo.firebaseio.com", "tok").unwrap();

    let mut hw = HardwareAdapter::new(
        SensorHub::new(
            FlameSensor::new(pins::FLAME_SENSOR_GPIO),
            SmokeSensor::new(pins::SMOKE_ADC_GPIO),
            Dht11Sensor::new(pins::DHT_DATA_GPIO),
        ),
        IndicatorLed::new(pins::FIRE_LED_GPIO),
        IndicatorLed::new(pins::SMOKE_LED_GPIO),
        Buzzer::new(),
    );
    let mut wifi = WifiAdapter::new();
    let mut sink = FirebaseSink::new(&credentials).unwrap();
    let mut display = ConsoleDisplay::new();
    let mut events = LogEventSink::new();
    let mut clock = MockClock::at_ms(0);

    wifi.begin(&credentials).unwrap();
    let mut service = MonitorService::new(SystemConfig::default(), 0);
    service.start(&mut events);

    // 1. Quiet room, still connecting.
    flame::sim_set_flame(false);
    smoke::sim_set_smoke_adc(180);
    dht11::sim_set_climate(Some(22.5), Some(41.0));
    clock.set_ms(1_000);
    let report = service.run_cycle(&mut hw, &mut wifi, &mut clock, &mut sink, &mut display, &mut events);
    assert_eq!(report.connectivity, ConnectivityStatus::Connecting { elapsed_ms: 1_000 });
    assert_eq!(report.reading.temperature_c, Some(22.5));
    assert_eq!(display.screen(), &Screen::Connecting { elapsed_ms: 1_000 });
    assert!(sink.sent().is_empty());

    // 2. Associated; flame appears.
    wifi.sim_set_associated(true);
    wifi.sim_set_rssi(-52);
    flame::sim_set_flame(true);
    let report = service.run_cycle(&mut hw, &mut wifi, &mut clock, &mut sink, &mut display, &mut events);
    assert_eq!(report.hazard, HazardState::FireAlert);
    assert_eq!(report.publish, Some(PublishOutcome::Success));
    assert_eq!(hw.outputs(), (true, false, BuzzerState::Silent));
    assert_eq!(sink.sent().len(), 1);
    assert!(sink.sent()[0].contains(r#""fireDetected":true"#));

    // 3. Store rejects the write; alerting is unaffected.
    sink.sim_set_failure(Some(CommsError::HttpStatus(500)));
    flame::sim_set_flame(false);
    smoke::sim_set_smoke_adc(1_200);
    let report = service.run_cycle(&mut hw, &mut wifi, &mut clock, &mut sink, &mut display, &mut events);
    assert_eq!(report.hazard, HazardState::SmokeWarning);
    assert!(matches!(report.publish, Some(PublishOutcome::Failure(_))));
    assert_eq!(hw.outputs(), (false, true, BuzzerState::Silent));

    // 4. Link lost after the deadline: offline readings screen.
    wifi.sim_set_associated(false);
    smoke::sim_set_smoke_adc(90);
    clock.set_ms(70_000);
    let report = service.run_cycle(&mut hw, &mut wifi, &mut clock, &mut sink, &mut display, &mut events);
    assert_eq!(report.connectivity, ConnectivityStatus::TimedOut);
    assert_eq!(hw.outputs(), (false, false, BuzzerState::Silent));
    match display.screen() {
        Screen::Readings(view) => {
            assert_eq!(view.header.as_deref(), Some("No WiFi"));
            assert!(view.contains("Smoke: 90"));
        }
        other => panic!("expected readings screen, got {:?}", other),
    }
    // The drop armed a reconnect for 72 s; the error hold got us there.
    assert_eq!(clock.now_ms(), 72_000);

    // 5. AP back: the next cycle re-requests association and publishes.
    wifi.sim_set_ap_reachable(true);
    let calls_before = wifi.sim_connect_calls();
    let report = service.run_cycle(&mut hw, &mut wifi, &mut clock, &mut sink, &mut display, &mut events);
    assert_eq!(wifi.sim_connect_calls(), calls_before + 1);
    assert_eq!(report.connectivity, ConnectivityStatus::Connected);
    assert_eq!(report.publish, Some(PublishOutcome::Failure(PublishError::from(
        CommsError::HttpStatus(500)
    ))));
}
