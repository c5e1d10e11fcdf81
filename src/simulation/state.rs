//! Game state - everything one running game owns
//!
//! There are no globals: the tick loop hands this struct to `update` and
//! `render` each frame.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::campaign::{Army, Level, NodeGraph};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::interaction::InteractionController;
use crate::words::{EntityRef, WordPool, WordRegistry};

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub graph: NodeGraph,
    pub words: WordRegistry,
    pub army: Army,
    pub controller: InteractionController,
    pub current_tick: Tick,
}

impl GameState {
    /// Set up a new game
    ///
    /// Every node gets a word anchored at its center and every unit placement
    /// in the level spawns a unit. Fails if the config is invalid or the
    /// vocabulary is too small to label every node.
    pub fn new(config: GameConfig, vocabulary: &str, level: Level) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let pool = WordPool::from_text(vocabulary, rng)?
            .with_max_attempts(config.max_sample_attempts);
        let mut words = WordRegistry::new(pool);

        let Level { graph, units } = level;
        for node in graph.nodes() {
            words.create_entity(
                EntityRef::Node(node.id),
                node.center.x as i32,
                node.center.y as i32,
            )?;
        }

        let mut army = Army::new();
        for placement in &units {
            if let Some(center) = graph.center(placement.node) {
                army.spawn(placement.node, center, placement.speed);
            }
        }

        tracing::info!(
            "New game: {} nodes, {} units, {} words",
            graph.len(),
            army.len(),
            words.pool().len()
        );

        let controller = InteractionController::new(&config);
        Ok(Self {
            config,
            graph,
            words,
            army,
            controller,
            current_tick: 0,
        })
    }

    /// The text typed so far
    pub fn buffer(&self) -> &str {
        self.controller.buffer()
    }

    /// The word currently labelling `link`, if any
    pub fn word_for(&self, link: EntityRef) -> Option<&str> {
        self.words.find_by_link(link).map(|e| e.word())
    }
}
