//! Console display adapter.
//!
//! Implements [`DisplayPort`] by writing each frame to the log as text,
//! one line per display row.  Keeps the last frame so tests and the
//! serial console show exactly what a panel would.

use log::info;

use crate::app::ports::DisplayPort;
use crate::presenter::ReadingsView;

/// What the display currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Blank,
    Boot,
    Connecting {
        elapsed_ms: u64,
    },
    ConnectionError,
    Readings(ReadingsView),
}

pub struct ConsoleDisplay {
    screen: Screen,
    frames: u32,
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self {
            screen: Screen::Blank,
            frames: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Frames drawn since boot.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    fn draw(&mut self, screen: Screen) {
        self.frames = self.frames.wrapping_add(1);
        self.screen = screen;
    }
}

impl DisplayPort for ConsoleDisplay {
    fn show_boot(&mut self) {
        info!("DISPLAY | HazardMon | Flame · Smoke · Climate");
        self.draw(Screen::Boot);
    }

    fn show_connecting(&mut self, elapsed_ms: u64) {
        // One dot per second spent connecting, like a spinner.
        let dots = ((elapsed_ms / 1000) % 4) as usize;
        info!("DISPLAY | Connecting to WiFi{:.<width$}", "", width = dots);
        self.draw(Screen::Connecting { elapsed_ms });
    }

    fn show_connection_error(&mut self) {
        info!("DISPLAY | Connection Error! | Check WiFi");
        self.draw(Screen::ConnectionError);
    }

    fn show_readings(&mut self, view: &ReadingsView) {
        for line in view.lines() {
            info!("DISPLAY | {}", line);
        }
        self.draw(Screen::Readings(view.clone()));
    }
}
