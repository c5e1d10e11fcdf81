//! Interaction controller - turns keystrokes into map actions
//!
//! The controller owns the typed buffer. Each tick it appends the new
//! characters, asks the word registry for a match, and acts on it:
//!
//! - node word typed: lay out one edge word per neighbor (expand the node)
//! - edge word typed: march every ready unit on the source node to the
//!   destination and clear the edge words
//!
//! Backspace is handled after matching, with held-key repeat.

use super::repeat::{KeyState, RepeatKey};
use crate::campaign::{Army, NodeGraph};
use crate::core::config::GameConfig;
use crate::core::error::GameError;
use crate::core::types::NodeId;
use crate::simulation::events::GameEvent;
use crate::words::{EntityKind, EntityRef, WordRegistry};

/// Input collected for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Characters typed since the previous tick, raw
    pub typed: String,
    /// State of the delete-last-character key
    pub backspace: KeyState,
}

impl TickInput {
    /// A tick with no input
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            typed: text.into(),
            backspace: KeyState::Up,
        }
    }

    /// A tick with backspace held and nothing typed
    pub fn backspace() -> Self {
        Self {
            typed: String::new(),
            backspace: KeyState::Held,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// Buffer empty
    Idle,
    /// Buffer holds a partial word
    Typing,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    buffer: String,
    backspace: RepeatKey,
}

impl InteractionController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            buffer: String::new(),
            backspace: RepeatKey::new(config.backspace_delay, config.backspace_interval),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> InteractionState {
        if self.buffer.is_empty() {
            InteractionState::Idle
        } else {
            InteractionState::Typing
        }
    }

    /// Append raw typed text: lower-cased, whitespace dropped
    pub fn push_typed(&mut self, raw: &str) {
        self.buffer.extend(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase),
        );
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Process one tick of input
    pub fn handle_input(
        &mut self,
        input: &TickInput,
        words: &mut WordRegistry,
        graph: &NodeGraph,
        army: &mut Army,
        config: &GameConfig,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.push_typed(&input.typed);

        if let Some(link) = words.match_typed_buffer(&self.buffer) {
            self.buffer.clear();
            match link {
                EntityRef::Node(node) => {
                    expand_node(node, words, graph, config, &mut events);
                }
                EntityRef::Edge { dest, source } => {
                    dispatch_edge(source, dest, words, graph, army, &mut events);
                }
            }
        }

        if self.backspace.update(input.backspace) {
            self.buffer.pop();
        }

        events
    }
}

/// Replace the edge words with one per neighbor of `node`
///
/// Each label sits `edge_anchor_fraction` of the way from the node toward the
/// neighbor, nudged down by `edge_label_offset_y`.
fn expand_node(
    node: NodeId,
    words: &mut WordRegistry,
    graph: &NodeGraph,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    let Some(origin) = graph.node(node) else {
        tracing::warn!("Typed word for unknown node #{}", node.0);
        return;
    };

    words.purge_kind(EntityKind::Edge);

    let mut choices = 0;
    for &neighbor in origin.adjacent() {
        let Some(target) = graph.center(neighbor) else {
            tracing::warn!("{} lists missing neighbor #{}", origin.name, neighbor.0);
            continue;
        };
        let anchor = origin.center + (target - origin.center) * config.edge_anchor_fraction;
        let link = EntityRef::Edge {
            dest: neighbor,
            source: node,
        };
        match words.create_entity(
            link,
            anchor.x as i32,
            anchor.y as i32 + config.edge_label_offset_y,
        ) {
            Ok(_) => choices += 1,
            Err(GameError::ExhaustedPool { in_use }) => {
                tracing::warn!(
                    "Word pool exhausted expanding {} ({} words in use)",
                    origin.name,
                    in_use
                );
                events.push(GameEvent::PoolExhausted { in_use });
                break;
            }
            Err(err) => {
                tracing::warn!("Could not label edge from {}: {}", origin.name, err);
                break;
            }
        }
    }

    tracing::debug!("Expanded {} into {} choices", origin.name, choices);
    events.push(GameEvent::NodeExpanded { node, choices });
}

/// March every ready unit on `source` to `dest` and clear the edge words
fn dispatch_edge(
    source: NodeId,
    dest: NodeId,
    words: &mut WordRegistry,
    graph: &NodeGraph,
    army: &mut Army,
    events: &mut Vec<GameEvent>,
) {
    let (Some(from), Some(to)) = (graph.name(source), graph.name(dest)) else {
        tracing::warn!(
            "Edge word points at missing node (#{} -> #{})",
            source.0,
            dest.0
        );
        words.purge_kind(EntityKind::Edge);
        return;
    };

    let units = army.dispatch_from(source, dest);
    words.purge_kind(EntityKind::Edge);

    tracing::info!("Dispatched {} unit(s) from {} to {}", units.len(), from, to);
    events.push(GameEvent::UnitsDispatched {
        source,
        dest,
        units,
    });
}
