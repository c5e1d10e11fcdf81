//! Render snapshot - read-only view of the state for drawing
//!
//! `render` copies out everything a frontend needs so that drawing never
//! touches live game state.

use serde::Serialize;

use super::state::GameState;
use crate::core::types::Tick;
use crate::words::EntityKind;

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Undirected edge between two node centers
#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, Serialize)]
pub struct WordView {
    pub text: String,
    pub kind: EntityKind,
    pub highlighted: bool,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub home: String,
    pub can_move: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: Tick,
    pub buffer: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub words: Vec<WordView>,
    pub units: Vec<UnitView>,
}

impl Frame {
    /// Bounding box of all nodes as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        let first = self.nodes.first()?;
        Some(self.nodes.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), n| {
                (min_x.min(n.x), min_y.min(n.y), max_x.max(n.x), max_y.max(n.y))
            },
        ))
    }
}

/// Snapshot the state for drawing
pub fn render(state: &GameState) -> Frame {
    let graph = &state.graph;

    let nodes = graph
        .nodes()
        .iter()
        .map(|n| NodeView {
            name: n.name.clone(),
            x: n.center.x,
            y: n.center.y,
        })
        .collect();

    let edges = graph
        .edges()
        .filter_map(|(a, b)| {
            let from = graph.center(a)?;
            let to = graph.center(b)?;
            Some(EdgeView {
                from: (from.x, from.y),
                to: (to.x, to.y),
            })
        })
        .collect();

    let words = state
        .words
        .entities()
        .iter()
        .map(|e| {
            let (x, y) = e.anchor();
            WordView {
                text: e.word().to_string(),
                kind: e.link().kind(),
                highlighted: e.is_highlighted(),
                x,
                y,
            }
        })
        .collect();

    let units = state
        .army
        .units()
        .iter()
        .map(|u| UnitView {
            id: u.id.0,
            x: u.position().x,
            y: u.position().y,
            home: graph.name(u.home()).unwrap_or("?").to_string(),
            can_move: u.can_move(),
        })
        .collect();

    Frame {
        tick: state.current_tick,
        buffer: state.buffer().to_string(),
        nodes,
        edges,
        words,
        units,
    }
}
