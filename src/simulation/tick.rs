//! Tick system - one logical update of the game
//!
//! Order within a tick:
//! 1. Input: append typed characters, match words, expand/dispatch, backspace
//! 2. Movement: every unit steps toward its home node
//! 3. Advance tick counter
//!
//! Movement runs every tick whether or not anything was typed.

use super::events::GameEvent;
use super::state::GameState;
use crate::interaction::TickInput;

/// Advance the game by one tick
///
/// Returns the events that occurred during this tick for UI display.
pub fn update(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let GameState {
        config,
        graph,
        words,
        army,
        controller,
        current_tick,
    } = state;

    let mut events = controller.handle_input(input, words, graph, army, config);

    for (unit, node) in army.tick_all(graph, config) {
        tracing::debug!(
            "Unit {} arrived at {}",
            unit.0,
            graph.name(node).unwrap_or("?")
        );
        events.push(GameEvent::UnitArrived { unit, node });
    }

    *current_tick += 1;
    events
}

/// Run `ticks` updates with no input, collecting all events
pub fn run_idle(state: &mut GameState, ticks: u32) -> Vec<GameEvent> {
    let idle = TickInput::idle();
    (0..ticks).flat_map(|_| update(state, &idle)).collect()
}
