//! Word matching engine: the vocabulary pool and the on-screen word entities

pub mod pool;
pub mod registry;

pub use pool::WordPool;
pub use registry::{EntityKind, EntityRef, WordEntity, WordRegistry};

/// Built-in vocabulary used when no word list is given
pub const DEFAULT_WORDS: &str = include_str!("../../data/words.txt");
