//! Node graph - the static map topology
//!
//! Adjacency is undirected. The builder inserts both directions for every
//! connection, and `validate` checks the result.

use ahash::AHashSet;

use super::node::Node;
use crate::core::error::{GameError, Result};
use crate::core::types::{NodeId, Vec2};

/// The map graph, fixed after construction
#[derive(Debug, Clone)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub fn builder() -> NodeGraphBuilder {
        NodeGraphBuilder::default()
    }

    /// Look a node up by name (linear scan; maps have tens of nodes)
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn center(&self, id: NodeId) -> Option<Vec2> {
        self.node(id).map(|n| n.center)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    /// Neighbors of a node; empty for an unknown id
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.adjacent()).unwrap_or(&[])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every undirected edge once, as (lower id, higher id)
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.adjacent()
                .iter()
                .filter(move |&&other| node.id < other)
                .map(move |&other| (node.id, other))
        })
    }

    /// Check the node invariants: unique names, in-range neighbors, no self
    /// loops, symmetric adjacency
    pub fn validate(&self) -> Result<()> {
        let mut names = AHashSet::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.id.index() != idx {
                return Err(GameError::InvalidTopology(format!(
                    "node {} stored at index {} has id {}",
                    node.name, idx, node.id.0
                )));
            }
            if !names.insert(node.name.as_str()) {
                return Err(GameError::DuplicateNode(node.name.clone()));
            }

            for &other in node.adjacent() {
                if other == node.id {
                    return Err(GameError::SelfLoop(node.name.clone()));
                }
                let Some(neighbor) = self.node(other) else {
                    return Err(GameError::NodeNotFound(format!("#{}", other.0)));
                };
                if !neighbor.is_adjacent_to(node.id) {
                    return Err(GameError::AsymmetricAdjacency {
                        from: node.name.clone(),
                        to: neighbor.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Collects nodes and connections, then resolves them into a `NodeGraph`
#[derive(Debug, Default)]
pub struct NodeGraphBuilder {
    nodes: Vec<(String, Vec2)>,
    connections: Vec<(String, String)>,
}

impl NodeGraphBuilder {
    pub fn node(mut self, name: impl Into<String>, x: f32, y: f32) -> Self {
        self.nodes.push((name.into(), Vec2::new(x, y)));
        self
    }

    /// Connect two nodes by name; direction does not matter
    pub fn connect(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.connections.push((a.into(), b.into()));
        self
    }

    pub fn build(self) -> Result<NodeGraph> {
        let mut seen = AHashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (idx, (name, center)) in self.nodes.into_iter().enumerate() {
            if !seen.insert(name.clone()) {
                return Err(GameError::DuplicateNode(name));
            }
            nodes.push(Node::new(NodeId(idx as u32), name, center));
        }

        let mut graph = NodeGraph { nodes };
        for (a, b) in &self.connections {
            let from = graph
                .find_node(a)
                .ok_or_else(|| GameError::NodeNotFound(a.clone()))?;
            let to = graph
                .find_node(b)
                .ok_or_else(|| GameError::NodeNotFound(b.clone()))?;
            if from == to {
                return Err(GameError::SelfLoop(a.clone()));
            }
            graph.nodes[from.index()].link(to);
            graph.nodes[to.index()].link(from);
        }

        graph.validate()?;
        Ok(graph)
    }
}
