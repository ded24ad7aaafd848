//! HazardMon Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative monitoring loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   WifiAdapter    FirebaseSink   Esp32Time     │
//! │  (Sensor+Actuator) (Network)      (Telemetry)    (Clock)       │
//! │  ConsoleDisplay    LogEventSink                                │
//! │  (Display)         (EventSink)                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  classify · alert · connectivity · telemetry · display │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::{info, warn};

use hazardmon::adapters::display::ConsoleDisplay;
use hazardmon::adapters::firebase::FirebaseSink;
use hazardmon::adapters::hardware::HardwareAdapter;
use hazardmon::adapters::log_sink::LogEventSink;
use hazardmon::adapters::time::Esp32TimeAdapter;
use hazardmon::adapters::wifi::WifiAdapter;
use hazardmon::app::ports::{ActuatorPort, ClockPort, DisplayPort};
use hazardmon::app::service::MonitorService;
use hazardmon::config::{Credentials, SystemConfig};
use hazardmon::drivers::buzzer::Buzzer;
use hazardmon::drivers::hw_init;
use hazardmon::drivers::indicator_led::IndicatorLed;
use hazardmon::drivers::watchdog::{WATCHDOG_TIMEOUT_MS, Watchdog};
use hazardmon::error::Error;
use hazardmon::pins;
use hazardmon::sensors::SensorHub;
use hazardmon::sensors::dht11::Dht11Sensor;
use hazardmon::sensors::flame::FlameSensor;
use hazardmon::sensors::smoke::SmokeSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HazardMon v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().context("peripheral init")?;
    let watchdog = Watchdog::new(WATCHDOG_TIMEOUT_MS);

    // ── 3. Config + credentials ───────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    let credentials = Credentials::from_build_env()
        .map_err(Error::from)
        .context("HAZARD_* build environment")?;
    info!("Config: {:?}", config);
    info!("Credentials: {:?}", credentials);

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hardware = HardwareAdapter::new(
        SensorHub::new(
            FlameSensor::new(pins::FLAME_SENSOR_GPIO),
            SmokeSensor::new(pins::SMOKE_ADC_GPIO),
            Dht11Sensor::new(pins::DHT_DATA_GPIO),
        ),
        IndicatorLed::new(pins::FIRE_LED_GPIO),
        IndicatorLed::new(pins::SMOKE_LED_GPIO),
        Buzzer::new(),
    );
    hardware.all_off();

    let mut clock = Esp32TimeAdapter::new();
    let mut display = ConsoleDisplay::new();
    let mut events = LogEventSink::new();
    let mut telemetry = FirebaseSink::new(&credentials).map_err(Error::from)?;

    display.show_boot();

    // ── 5. Network (started once; never restarted) ────────────
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let esp_wifi = EspWifi::new(peripherals.modem, sys_loop, Some(nvs))?;
    let mut wifi = WifiAdapter::new(esp_wifi);
    if let Err(e) = wifi.begin(&credentials) {
        // Stay offline: the connecting window runs out and telemetry is
        // skipped, but local alerting keeps working.
        warn!("WiFi start failed ({}), running offline", e);
    }

    // ── 6. Monitoring loop ────────────────────────────────────
    let mut service = MonitorService::new(config, clock.now_ms());
    service.start(&mut events);

    service.run_forever(
        &mut hardware,
        &mut wifi,
        &mut clock,
        &mut telemetry,
        &mut display,
        &mut events,
        |_| watchdog.feed(),
    )
}
