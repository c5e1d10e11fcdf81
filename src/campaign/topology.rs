//! Load levels (map topology and starting units) from TOML
//!
//! ```toml
//! [[node]]
//! name = "vertex1"
//! x = 100.0
//! y = 180.0
//! adjacent = ["vertex2", "vertex3"]
//!
//! [[unit]]
//! node = "vertex1"
//! speed = 5.0
//! ```
//!
//! Adjacency only needs to be listed on one side; the graph builder mirrors it.

use serde::Deserialize;
use std::path::Path;

use super::graph::NodeGraph;
use crate::core::error::{GameError, Result};
use crate::core::types::NodeId;

/// Built-in level used when no level file is given
pub const DEFAULT_LEVEL: &str = include_str!("../../data/level1.toml");

/// Speed for units that do not specify one
const DEFAULT_UNIT_SPEED: f32 = 5.0;

/// A unit's starting node and speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPlacement {
    pub node: NodeId,
    pub speed: f32,
}

/// A resolved level: the map graph plus where units start
#[derive(Debug, Clone)]
pub struct Level {
    pub graph: NodeGraph,
    pub units: Vec<UnitPlacement>,
}

impl Level {
    /// Load a level from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// The level compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::parse_toml(DEFAULT_LEVEL)
    }

    /// Parse a level from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: TomlLevel = toml::from_str(content)?;
        file.into_level()
    }
}

/// TOML representation of a level file
#[derive(Debug, Deserialize)]
struct TomlLevel {
    #[serde(rename = "node", default)]
    nodes: Vec<TomlNode>,
    #[serde(rename = "unit", default)]
    units: Vec<TomlUnit>,
}

#[derive(Debug, Deserialize)]
struct TomlNode {
    name: String,
    x: f32,
    y: f32,
    #[serde(default)]
    adjacent: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlUnit {
    node: String,
    #[serde(default = "default_speed")]
    speed: f32,
}

fn default_speed() -> f32 {
    DEFAULT_UNIT_SPEED
}

impl TomlLevel {
    fn into_level(self) -> Result<Level> {
        if self.nodes.is_empty() {
            return Err(GameError::InvalidTopology("level has no nodes".into()));
        }

        let mut builder = NodeGraph::builder();
        for node in &self.nodes {
            builder = builder.node(node.name.clone(), node.x, node.y);
        }
        for node in &self.nodes {
            for other in &node.adjacent {
                builder = builder.connect(node.name.clone(), other.clone());
            }
        }
        let graph = builder.build()?;

        let units = self
            .units
            .into_iter()
            .map(|unit| {
                let node = graph
                    .find_node(&unit.node)
                    .ok_or_else(|| GameError::NodeNotFound(unit.node.clone()))?;
                if !(unit.speed > 0.0) {
                    return Err(GameError::InvalidTopology(format!(
                        "unit at {} has non-positive speed {}",
                        unit.node, unit.speed
                    )));
                }
                Ok(UnitPlacement {
                    node,
                    speed: unit.speed,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Level { graph, units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_level_loads() {
        let level = Level::builtin().unwrap();
        assert_eq!(level.graph.len(), 14);
        assert_eq!(level.units.len(), 3);
        assert!(level.graph.validate().is_ok());

        let v7 = level.graph.find_node("vertex7").unwrap();
        assert_eq!(level.graph.neighbors(v7).len(), 4);
    }

    #[test]
    fn test_one_sided_adjacency_is_mirrored() {
        let level = Level::parse_toml(
            r#"
            [[node]]
            name = "a"
            x = 0.0
            y = 0.0
            adjacent = ["b"]

            [[node]]
            name = "b"
            x = 5.0
            y = 5.0
            "#,
        )
        .unwrap();
        let a = level.graph.find_node("a").unwrap();
        let b = level.graph.find_node("b").unwrap();
        assert_eq!(level.graph.neighbors(b), &[a]);
        assert!(level.units.is_empty());
    }

    #[test]
    fn test_unit_defaults_and_errors() {
        let level = Level::parse_toml(
            r#"
            [[node]]
            name = "a"
            x = 0.0
            y = 0.0

            [[unit]]
            node = "a"
            "#,
        )
        .unwrap();
        assert_eq!(level.units[0].speed, DEFAULT_UNIT_SPEED);

        let unknown = Level::parse_toml(
            r#"
            [[node]]
            name = "a"
            x = 0.0
            y = 0.0

            [[unit]]
            node = "nowhere"
            "#,
        );
        assert!(matches!(unknown, Err(GameError::NodeNotFound(_))));

        let frozen = Level::parse_toml(
            r#"
            [[node]]
            name = "a"
            x = 0.0
            y = 0.0

            [[unit]]
            node = "a"
            speed = 0.0
            "#,
        );
        assert!(matches!(frozen, Err(GameError::InvalidTopology(_))));
    }

    #[test]
    fn test_empty_level_rejected() {
        assert!(matches!(
            Level::parse_toml(""),
            Err(GameError::InvalidTopology(_))
        ));
        assert!(matches!(
            Level::parse_toml("[[node]]\nname = 1"),
            Err(GameError::TomlError(_))
        ));
    }
}
