//! UI state management for the terminal frontend

use std::collections::VecDeque;

use crate::campaign::NodeGraph;
use crate::simulation::GameEvent;

/// Maximum action log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Game UI state
#[derive(Debug)]
pub struct GameUI {
    /// Action log entries, oldest first
    pub action_log: VecDeque<LogEntry>,
    /// Whether to show the action log panel
    pub show_action_log: bool,
    /// Set when the player asks to quit
    pub quit_requested: bool,
}

impl Default for GameUI {
    fn default() -> Self {
        Self::new()
    }
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tick: u64,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Expand,
    Dispatch,
    Arrival,
    System,
}

impl GameUI {
    pub fn new() -> Self {
        Self {
            action_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            show_action_log: true,
            quit_requested: false,
        }
    }

    /// Add an entry to the action log
    pub fn log(&mut self, tick: u64, message: String, category: LogCategory) {
        if self.action_log.len() >= MAX_LOG_ENTRIES {
            self.action_log.pop_front();
        }
        self.action_log.push_back(LogEntry {
            tick,
            message,
            category,
        });
    }

    /// Describe a game event in the action log
    pub fn record(&mut self, tick: u64, event: &GameEvent, graph: &NodeGraph) {
        let name = |id| graph.name(id).unwrap_or("?");
        let (message, category) = match event {
            GameEvent::NodeExpanded { node, choices } => (
                format!("{}: {} roads", name(*node), choices),
                LogCategory::Expand,
            ),
            GameEvent::UnitsDispatched { source, dest, units } if units.is_empty() => (
                format!("No ready units at {} for {}", name(*source), name(*dest)),
                LogCategory::Dispatch,
            ),
            GameEvent::UnitsDispatched { source, dest, units } => (
                format!("{} unit(s) march {} -> {}", units.len(), name(*source), name(*dest)),
                LogCategory::Dispatch,
            ),
            GameEvent::UnitArrived { unit, node } => (
                format!("Unit {} reached {}", unit.0, name(*node)),
                LogCategory::Arrival,
            ),
            GameEvent::PoolExhausted { in_use } => (
                format!("Out of words ({} on screen)", in_use),
                LogCategory::System,
            ),
        };
        self.log(tick, message, category);
    }

    pub fn toggle_action_log(&mut self) {
        self.show_action_log = !self.show_action_log;
    }
}
