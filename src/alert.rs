//! Alert actuator: LED + buzzer patterns per hazard state.
//!
//! Patterns are plain data, an ordered list of [`AlertStep`]s, played by
//! the [`PatternSequencer`] against an injected [`ClockPort`].  Playing is
//! blocking; the fire pattern takes about one second with default timings.
//!
//! | Hazard        | Pattern                                             | Afterwards          |
//! |---------------|-----------------------------------------------------|---------------------|
//! | FireAlert     | 5 × (fire LED + 1000 Hz, 100 ms / dark + silent, 100 ms) | fire LED held on |
//! | SmokeWarning  | smoke LED + 500 Hz, 300 ms / dark + silent, 700 ms  | smoke LED held on   |
//! | Normal        | —                                                   | everything off      |
//!
//! Every call re-drives every output, so the end state depends only on the
//! hazard passed in.

use heapless::Vec;

use crate::app::ports::{ActuatorPort, ClockPort};
use crate::config::{AlertTimings, MAX_FIRE_REPETITIONS};
use crate::hazard::HazardState;

const MAX_STEPS: usize = MAX_FIRE_REPETITIONS as usize * 2;

/// Which indicator LED a pattern drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Fire,
    Smoke,
}

/// One timed phase of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertStep {
    pub led_on: bool,
    /// `None` = buzzer silent.
    pub tone_hz: Option<u16>,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPattern {
    pub indicator: Indicator,
    pub steps: Vec<AlertStep, MAX_STEPS>,
    /// LED level left on the indicator once the steps are done.
    pub hold_led: bool,
}

impl AlertPattern {
    /// Fire pattern: `fire_repetitions` on/off bursts.  Repetitions beyond
    /// the step capacity are dropped; `SystemConfig::validate` rejects them.
    pub fn fire(t: &AlertTimings) -> Self {
        let mut steps = Vec::new();
        for _ in 0..t.fire_repetitions.min(MAX_FIRE_REPETITIONS) {
            let _ = steps.push(AlertStep {
                led_on: true,
                tone_hz: Some(t.fire_tone_hz),
                duration_ms: t.fire_on_ms,
            });
            let _ = steps.push(AlertStep {
                led_on: false,
                tone_hz: None,
                duration_ms: t.fire_off_ms,
            });
        }
        Self {
            indicator: Indicator::Fire,
            steps,
            hold_led: true,
        }
    }

    /// Smoke pattern: a single on/off cycle.
    pub fn smoke(t: &AlertTimings) -> Self {
        let mut steps = Vec::new();
        let _ = steps.push(AlertStep {
            led_on: true,
            tone_hz: Some(t.smoke_tone_hz),
            duration_ms: t.smoke_on_ms,
        });
        let _ = steps.push(AlertStep {
            led_on: false,
            tone_hz: None,
            duration_ms: t.smoke_off_ms,
        });
        Self {
            indicator: Indicator::Smoke,
            steps,
            hold_led: true,
        }
    }

    /// Sum of all step durations.
    pub fn duration_ms(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }
}

/// Plays [`AlertPattern`]s step by step.
pub struct PatternSequencer;

impl PatternSequencer {
    pub fn play(pattern: &AlertPattern, hw: &mut impl ActuatorPort, clock: &mut impl ClockPort) {
        for step in &pattern.steps {
            Self::set_indicator(hw, pattern.indicator, step.led_on);
            match step.tone_hz {
                Some(hz) => hw.tone(hz),
                None => hw.no_tone(),
            }
            clock.delay_ms(step.duration_ms);
        }
        hw.no_tone();
        Self::set_indicator(hw, pattern.indicator, pattern.hold_led);
    }

    fn set_indicator(hw: &mut impl ActuatorPort, indicator: Indicator, on: bool) {
        match indicator {
            Indicator::Fire => hw.set_fire_led(on),
            Indicator::Smoke => hw.set_smoke_led(on),
        }
    }
}

/// Maps a hazard state onto actuator output.
pub struct AlertActuator {
    fire: AlertPattern,
    smoke: AlertPattern,
}

impl AlertActuator {
    pub fn new(timings: &AlertTimings) -> Self {
        Self {
            fire: AlertPattern::fire(timings),
            smoke: AlertPattern::smoke(timings),
        }
    }

    pub fn actuate(
        &self,
        hazard: HazardState,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
    ) {
        match hazard {
            HazardState::FireAlert => {
                hw.set_smoke_led(false);
                PatternSequencer::play(&self.fire, hw, clock);
            }
            HazardState::SmokeWarning => {
                hw.set_fire_led(false);
                PatternSequencer::play(&self.smoke, hw, clock);
            }
            HazardState::Normal => hw.all_off(),
        }
    }

    pub fn pattern_for(&self, hazard: HazardState) -> Option<&AlertPattern> {
        match hazard {
            HazardState::FireAlert => Some(&self.fire),
            HazardState::SmokeWarning => Some(&self.smoke),
            HazardState::Normal => None,
        }
    }
}
