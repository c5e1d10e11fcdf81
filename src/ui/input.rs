//! Terminal input - turns crossterm key events into per-tick input
//!
//! Terminals that support keyboard enhancement report key releases, so
//! backspace can be tracked as truly held and the game's own repeat timing
//! applies. Other terminals only send presses (auto-repeated by the
//! terminal); each press is then a one-tick pulse.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Instant;

use crate::interaction::{KeyState, TickInput};

/// Everything collected between two ticks
#[derive(Debug, Default)]
pub struct PolledInput {
    pub tick: TickInput,
    pub quit: bool,
    pub toggle_log: bool,
}

#[derive(Debug)]
pub struct TerminalInput {
    /// Release events are reported
    enhanced: bool,
    backspace_down: bool,
}

impl TerminalInput {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            backspace_down: false,
        }
    }

    /// Drain key events until `deadline`
    pub fn collect_until(&mut self, deadline: Instant) -> io::Result<PolledInput> {
        let mut polled = PolledInput::default();
        let mut pulse = false;

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                self.apply(key, &mut polled, &mut pulse);
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        polled.tick.backspace = if self.backspace_down || pulse {
            KeyState::Held
        } else {
            KeyState::Up
        };
        Ok(polled)
    }

    fn apply(&mut self, key: KeyEvent, polled: &mut PolledInput, pulse: &mut bool) {
        match (key.code, key.kind) {
            (KeyCode::Esc, KeyEventKind::Press) => polled.quit = true,
            (KeyCode::Char('c'), KeyEventKind::Press)
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                polled.quit = true
            }
            (KeyCode::Tab, KeyEventKind::Press) => polled.toggle_log = true,
            (KeyCode::Backspace, KeyEventKind::Press) => {
                if self.enhanced {
                    self.backspace_down = true;
                } else {
                    *pulse = true;
                }
            }
            (KeyCode::Backspace, KeyEventKind::Repeat) if !self.enhanced => *pulse = true,
            (KeyCode::Backspace, KeyEventKind::Release) => self.backspace_down = false,
            (KeyCode::Char(c), KeyEventKind::Press | KeyEventKind::Repeat) => {
                polled.tick.typed.push(c);
            }
            _ => {}
        }
    }
}
