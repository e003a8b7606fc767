//! Game state owned by the UI thread and the transitions applied to it.

use shared::{parse_led_report, LedColor, LedIndex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    active_led: Option<LedIndex>,
    running: bool,
}

impl GameState {
    pub fn start(&mut self) {
        self.active_led = None;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.active_led = None;
    }

    /// Applies one line from the board. Returns true when the strip needs a redraw.
    pub fn apply_line(&mut self, line: &str) -> bool {
        if !self.running {
            return false;
        }
        match parse_led_report(line) {
            Ok(index) => {
                self.active_led = Some(index);
                true
            }
            Err(err) => {
                tracing::trace!(%err, "ignoring serial line");
                false
            }
        }
    }

    pub fn active_led(&self) -> Option<LedIndex> {
        self.active_led
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn color_at(&self, index: LedIndex) -> LedColor {
        LedColor::for_led(index, self.active_led)
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
