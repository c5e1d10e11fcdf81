//! Simulation: game state, the per-tick update, render snapshots, and
//! headless script replay

pub mod events;
pub mod frame;
pub mod script;
pub mod state;
pub mod tick;

pub use events::GameEvent;
pub use frame::{render, Frame};
pub use script::{run_script, Script};
pub use state::GameState;
pub use tick::update;
