//! Events produced by a simulation tick
//!
//! Returned by `update` so frontends can show them in the action log.

use serde::Serialize;

use crate::core::types::{NodeId, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A node word was typed and its travel choices were laid out
    NodeExpanded { node: NodeId, choices: usize },
    /// An edge word was typed; `units` left `source` for `dest`
    UnitsDispatched {
        source: NodeId,
        dest: NodeId,
        units: Vec<UnitId>,
    },
    /// A unit reached its destination and accepts orders again
    UnitArrived { unit: UnitId, node: NodeId },
    /// A word could not be drawn because every word is on screen
    PoolExhausted { in_use: usize },
}
