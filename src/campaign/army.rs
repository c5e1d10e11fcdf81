//! Army - every unit on the map
//!
//! Holds the unit list, hands out orders, and runs movement each tick.

use rayon::prelude::*;

use super::graph::NodeGraph;
use super::unit::{MovementResult, Unit};
use crate::core::config::GameConfig;
use crate::core::types::{NodeId, UnitId, Vec2};

/// All units in play
#[derive(Debug, Clone)]
pub struct Army {
    units: Vec<Unit>,
    next_unit_id: u32,
}

impl Default for Army {
    fn default() -> Self {
        Self::new()
    }
}

impl Army {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            next_unit_id: 1,
        }
    }

    /// Spawn a unit standing on `home`
    pub fn spawn(&mut self, home: NodeId, center: Vec2, speed: f32) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.push(Unit::new(id, home, center, speed));
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units whose home is `node`, moving toward it or standing on it
    pub fn units_at(&self, node: NodeId) -> Vec<&Unit> {
        self.units.iter().filter(|u| u.home() == node).collect()
    }

    /// Send every ready unit standing on `source` to `dest`
    ///
    /// Units still marching (can_move == false) are left alone. Returns the
    /// ids of the dispatched units.
    pub fn dispatch_from(&mut self, source: NodeId, dest: NodeId) -> Vec<UnitId> {
        self.units
            .iter_mut()
            .filter(|u| u.home() == source && u.can_move())
            .map(|u| {
                u.dispatch(dest);
                u.id
            })
            .collect()
    }

    /// Run one movement tick for every unit; returns the units that arrived
    pub fn tick_all(&mut self, graph: &NodeGraph, config: &GameConfig) -> Vec<(UnitId, NodeId)> {
        let results: Vec<(UnitId, NodeId, MovementResult)> =
            if self.units.len() >= config.parallel_threshold {
                self.units
                    .par_iter_mut()
                    .map(|u| (u.id, u.home(), u.tick(graph, config)))
                    .collect()
            } else {
                self.units
                    .iter_mut()
                    .map(|u| (u.id, u.home(), u.tick(graph, config)))
                    .collect()
            };

        results
            .into_iter()
            .filter_map(|(id, home, result)| match result {
                MovementResult::Arrived => Some((id, home)),
                MovementResult::Blocked => {
                    tracing::warn!("Unit {} has no valid home node #{}", id.0, home.0);
                    None
                }
                _ => None,
            })
            .collect()
    }
}
