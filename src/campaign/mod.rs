//! Campaign map: node graph, level loading, and unit movement

pub mod army;
pub mod graph;
pub mod node;
pub mod topology;
pub mod unit;

pub use army::Army;
pub use graph::{NodeGraph, NodeGraphBuilder};
pub use node::Node;
pub use topology::{Level, UnitPlacement};
pub use unit::{MovementResult, Unit};
