//! Node - a place on the map
//!
//! Nodes are the vertices of the map graph. Units stand on them and march
//! between adjacent ones.

use serde::Serialize;

use crate::core::types::{NodeId, Vec2};

/// A named, positioned node on the map
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub center: Vec2,
    adjacent: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, name: String, center: Vec2) -> Self {
        Self {
            id,
            name,
            center,
            adjacent: Vec::new(),
        }
    }

    /// Neighbors in the order they were connected
    pub fn adjacent(&self) -> &[NodeId] {
        &self.adjacent
    }

    pub fn is_adjacent_to(&self, other: NodeId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Add a one-way link; returns false if it already existed
    pub(crate) fn link(&mut self, other: NodeId) -> bool {
        if self.is_adjacent_to(other) {
            return false;
        }
        self.adjacent.push(other);
        true
    }
}
