//! Units - tokens that stand on nodes and march between them
//!
//! A unit always belongs to a home node. Dispatching it changes the home node
//! and the unit walks there at constant speed, one step per tick.

use serde::Serialize;

use super::graph::NodeGraph;
use crate::core::config::GameConfig;
use crate::core::types::{NodeId, UnitId, Vec2};

/// Result of a unit's movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementResult {
    /// Standing at its home node
    Idle,
    /// Still walking
    Moving,
    /// Came within the arrival epsilon this tick
    Arrived,
    /// Home node is missing from the graph
    Blocked,
}

/// A movable unit
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub speed: f32,
    home: NodeId,
    position: Vec2,
    can_move: bool,
}

impl Unit {
    /// Create a unit standing on `home`, whose center is `center`
    pub fn new(id: UnitId, home: NodeId, center: Vec2, speed: f32) -> Self {
        Self {
            id,
            speed,
            home,
            position: center,
            can_move: true,
        }
    }

    /// Start the unit somewhere other than its home node's center
    pub fn with_position(mut self, position: Vec2, home_center: Vec2, epsilon: f32) -> Self {
        self.position = position;
        self.can_move = position.distance(&home_center) < epsilon;
        self
    }

    pub fn home(&self) -> NodeId {
        self.home
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// True when the unit stands at its home node and accepts orders
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Order the unit to march to `target`
    ///
    /// Callers check eligibility (`can_move` and standing at the source node).
    pub fn dispatch(&mut self, target: NodeId) {
        self.home = target;
        self.can_move = false;
    }

    /// Advance one tick toward the home node's center
    pub fn tick(&mut self, graph: &NodeGraph, config: &GameConfig) -> MovementResult {
        let Some(target) = graph.center(self.home) else {
            return MovementResult::Blocked;
        };
        self.advance_toward(target, config)
    }

    /// Advance one tick toward `target`
    ///
    /// Outside the arrival epsilon the unit steps along the direction to the
    /// target, scaled to `direction_magnitude * speed / (tps * speed_divisor)`.
    /// A step that would pass the target lands on it instead. Inside the
    /// epsilon the position is left alone and the unit becomes movable.
    pub fn advance_toward(&mut self, target: Vec2, config: &GameConfig) -> MovementResult {
        let distance = self.position.distance(&target);
        if distance < config.arrival_epsilon {
            if self.can_move {
                return MovementResult::Idle;
            }
            self.can_move = true;
            return MovementResult::Arrived;
        }

        let step_len = config.step_scale() * self.speed;
        if step_len >= distance {
            self.position = target;
        } else {
            self.position += (target - self.position).normalize() * step_len;
        }
        MovementResult::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_unit_is_ready() {
        let unit = Unit::new(UnitId(1), NodeId(0), Vec2::new(5.0, 5.0), 5.0);
        assert!(unit.can_move());
        assert_eq!(unit.position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_idle_unit_stays_put() {
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::new(5.0, 5.0), 5.0);
        let result = unit.advance_toward(Vec2::new(5.0, 5.0), &config());
        assert_eq!(result, MovementResult::Idle);
        assert_eq!(unit.position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_dispatch_locks_unit() {
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::default(), 5.0);
        unit.dispatch(NodeId(3));
        assert_eq!(unit.home(), NodeId(3));
        assert!(!unit.can_move());
    }

    #[test]
    fn test_step_length_matches_speed_formula() {
        let cfg = config();
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::new(0.0, 0.0), 6.0);
        unit.dispatch(NodeId(1));

        let result = unit.advance_toward(Vec2::new(100.0, 0.0), &cfg);
        assert_eq!(result, MovementResult::Moving);
        // 50 * 6 / (60 * 2) = 2.5
        assert!((unit.position().x - 2.5).abs() < 1e-5);
        assert_eq!(unit.position().y, 0.0);
    }

    #[test]
    fn test_arrival_only_after_convergence() {
        let cfg = config();
        let target = Vec2::new(30.0, 40.0);
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::default(), 5.0);
        unit.dispatch(NodeId(1));

        let mut ticks = 0;
        loop {
            let before = unit.position().distance(&target);
            let result = unit.advance_toward(target, &cfg);
            ticks += 1;
            if before >= cfg.arrival_epsilon {
                assert_eq!(result, MovementResult::Moving);
                assert!(!unit.can_move());
            } else {
                assert_eq!(result, MovementResult::Arrived);
                assert!(unit.can_move());
                break;
            }
            assert!(ticks < 1000, "unit never arrived");
        }
        assert!(unit.position().distance(&target) < cfg.arrival_epsilon);
    }

    #[test]
    fn test_large_step_snaps_instead_of_oscillating() {
        let cfg = config();
        // Step is ~20.8 map units, target only 1.5 away
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::new(0.0, 0.0), 50.0);
        unit.dispatch(NodeId(1));

        assert_eq!(
            unit.advance_toward(Vec2::new(1.5, 0.0), &cfg),
            MovementResult::Moving
        );
        assert_eq!(unit.position(), Vec2::new(1.5, 0.0));
        assert_eq!(
            unit.advance_toward(Vec2::new(1.5, 0.0), &cfg),
            MovementResult::Arrived
        );
    }

    #[test]
    fn test_tick_uses_graph_center() {
        let graph = NodeGraph::builder()
            .node("a", 0.0, 0.0)
            .node("b", 0.0, 10.0)
            .connect("a", "b")
            .build()
            .unwrap();
        let mut unit = Unit::new(UnitId(1), NodeId(0), Vec2::default(), 5.0);
        unit.dispatch(NodeId(1));
        assert_eq!(unit.tick(&graph, &config()), MovementResult::Moving);
        assert!(unit.position().y > 0.0);

        unit.dispatch(NodeId(9));
        assert_eq!(unit.tick(&graph, &config()), MovementResult::Blocked);
    }

    #[test]
    fn test_with_position_off_node() {
        let unit = Unit::new(UnitId(1), NodeId(0), Vec2::default(), 5.0).with_position(
            Vec2::new(10.0, 0.0),
            Vec2::default(),
            1.0,
        );
        assert!(!unit.can_move());
    }
}
