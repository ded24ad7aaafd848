//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the configuration, the connectivity manager
//! (with its boot-time start stamp), the telemetry publisher counters and
//! the cycle counter.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//! NetworkPort ──▶ │        MonitorService         │ ──▶ TelemetrySink
//!   ClockPort ◀─▶ │ classify · alert · connectivity│ ──▶ DisplayPort
//! ActuatorPort ◀──└──────────────────────────────┘
//! ```
//!
//! One cycle: link upkeep → sense → classify → actuate → evaluate
//! connectivity → (if connected) publish → present → report cadence.

use log::{debug, info};

use crate::alert::AlertActuator;
use crate::config::SystemConfig;
use crate::connectivity::{ConnectivityManager, ConnectivityStatus};
use crate::hazard::{self, HazardState};
use crate::presenter::StatusPresenter;
use crate::sensors::SensorReading;
use crate::telemetry::{PublishOutcome, TelemetryPublisher};

use super::events::AppEvent;
use super::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, NetworkPort, SensorPort, TelemetrySink,
};

/// What happened during one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    pub reading: SensorReading,
    pub hazard: HazardState,
    pub connectivity: ConnectivityStatus,
    /// `None` when publishing was skipped.
    pub publish: Option<PublishOutcome>,
    /// Pause before the next cycle.
    pub next_delay_ms: u32,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    config: SystemConfig,
    connectivity: ConnectivityManager,
    alerts: AlertActuator,
    publisher: TelemetryPublisher,
    presenter: StatusPresenter,
    cycle_count: u64,
}

impl MonitorService {
    /// `started_at_ms` is the clock reading taken right after the network
    /// stack was started; the connecting deadline counts from there.
    pub fn new(config: SystemConfig, started_at_ms: u64) -> Self {
        let connectivity = ConnectivityManager::new(started_at_ms, config.connect_timeout_ms);
        let alerts = AlertActuator::new(&config.alerts);
        let publisher = TelemetryPublisher::new(&config);
        let presenter = StatusPresenter::new(config.cadence.error_screen_hold_ms);
        Self {
            config,
            connectivity,
            alerts,
            publisher,
            presenter,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            connect_timeout_ms: self.config.connect_timeout_ms,
        });
        info!(
            "MonitorService started (smoke threshold {}, connect timeout {} ms)",
            self.config.smoke_threshold, self.config.connect_timeout_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one monitoring cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while keeping
    /// the port boundary explicit.  Nothing here can fail: unavailable
    /// readings, timeouts and rejected publishes all end up in the report.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        net: &mut impl NetworkPort,
        clock: &mut impl ClockPort,
        telemetry: &mut impl TelemetrySink,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        net.maintain(clock.now_ms());

        // 1. Sense
        let reading = hw.read();
        sink.emit(&AppEvent::Reading {
            reading,
            smoke_over_threshold: hazard::smoke_exceeds(&reading, self.config.smoke_threshold),
        });

        // 2. Classify
        let hazard = hazard::classify(&reading, self.config.smoke_threshold);

        // 3. Actuate (blocks for the pattern duration)
        self.alerts.actuate(hazard, hw, clock);

        // 4. Connectivity
        let connectivity = self
            .connectivity
            .status(clock.now_ms(), net.is_associated());
        sink.emit(&AppEvent::Assessed {
            cycle: self.cycle_count,
            hazard,
            connectivity,
        });

        // 5. Publish (connected only, never retried)
        let publish = if ConnectivityManager::should_publish(connectivity) {
            let outcome = self.publisher.publish(telemetry, &reading, hazard);
            match &outcome {
                PublishOutcome::Success => sink.emit(&AppEvent::Published),
                PublishOutcome::Failure(e) => sink.emit(&AppEvent::PublishFailed(e.clone())),
            }
            Some(outcome)
        } else {
            sink.emit(&AppEvent::PublishSkipped);
            None
        };

        // 6. Present
        self.presenter.present(
            display,
            clock,
            connectivity,
            hazard,
            &reading,
            net.signal_strength(),
        );

        let next_delay_ms = self.cycle_delay(connectivity);
        debug!(
            "cycle {}: {} / {} / next in {} ms",
            self.cycle_count, hazard, connectivity, next_delay_ms
        );

        CycleReport {
            cycle: self.cycle_count,
            reading,
            hazard,
            connectivity,
            publish,
            next_delay_ms,
        }
    }

    /// Loop forever: one cycle, `after_cycle`, then the cadence delay.
    #[allow(clippy::too_many_arguments)]
    pub fn run_forever(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        net: &mut impl NetworkPort,
        clock: &mut impl ClockPort,
        telemetry: &mut impl TelemetrySink,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        mut after_cycle: impl FnMut(&CycleReport),
    ) -> ! {
        loop {
            let report = self.run_cycle(hw, net, clock, telemetry, display, sink);
            after_cycle(&report);
            clock.delay_ms(report.next_delay_ms);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Delay before the next cycle for a given connectivity status.
    ///
    /// Timed-out cycles already spent the error-screen hold inside the
    /// presenter, so they go again immediately.
    pub fn cycle_delay(&self, status: ConnectivityStatus) -> u32 {
        match status {
            ConnectivityStatus::Connected => self.config.cadence.connected_interval_ms,
            ConnectivityStatus::Connecting { .. } => self.config.cadence.connecting_interval_ms,
            ConnectivityStatus::TimedOut => 0,
        }
    }

    /// Cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn publisher(&self) -> &TelemetryPublisher {
        &self.publisher
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
