//! UI module - crossterm/ratatui terminal frontend

pub mod input;
pub mod state;
pub mod terminal;

pub use input::{PolledInput, TerminalInput};
pub use state::{GameUI, LogCategory, LogEntry};
pub use terminal::TerminalUi;
