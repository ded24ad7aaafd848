//! Passive piezo buzzer driven by an LEDC square wave.
//!
//! The LEDC timer is retuned to the requested pitch and the channel runs
//! at 50 % duty; silence is duty 0.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC channel 0 via hw_init.
//! On host/test: tracks state in-memory only.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Below this the LEDC divider overflows at 8-bit resolution.
const MIN_TONE_HZ: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { hz: u16 },
}

pub struct Buzzer {
    state: BuzzerState,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    /// Sound at `hz`.  Inaudible requests silence the buzzer instead.
    pub fn tone(&mut self, hz: u16) {
        if hz < MIN_TONE_HZ {
            self.silence();
            return;
        }
        if self.state == (BuzzerState::Sounding { hz }) {
            return;
        }
        #[cfg(target_os = "espidf")]
        hw_init::buzzer_tone(u32::from(hz));
        self.state = BuzzerState::Sounding { hz };
    }

    pub fn silence(&mut self) {
        #[cfg(target_os = "espidf")]
        hw_init::buzzer_off();
        self.state = BuzzerState::Silent;
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }
}
