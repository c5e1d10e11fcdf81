//! Keystroke handling: the typed buffer, backspace repeat, and the actions a
//! completed word triggers

pub mod controller;
pub mod repeat;

pub use controller::{InteractionController, InteractionState, TickInput};
pub use repeat::{KeyState, RepeatKey};
