//! Word entity registry - words on screen and what typing them means
//!
//! Each entity pairs a displayed word with the thing it resolves to: a map
//! node, or a directed edge offered while a node is expanded.

use serde::Serialize;

use super::pool::WordPool;
use crate::core::error::Result;
use crate::core::types::NodeId;

/// What a word entity resolves to when its word is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityRef {
    /// A map node; typing it expands the node
    Node(NodeId),
    /// A travel choice from `source` to `dest`; typing it dispatches units
    Edge { dest: NodeId, source: NodeId },
}

/// Discriminant of `EntityRef`, used for bulk purges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Node,
    Edge,
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Node(_) => EntityKind::Node,
            EntityRef::Edge { .. } => EntityKind::Edge,
        }
    }
}

/// A word displayed on screen
#[derive(Debug, Clone)]
pub struct WordEntity {
    word: String,
    link: EntityRef,
    anchor_x: i32,
    anchor_y: i32,
    highlighted: bool,
}

impl WordEntity {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn link(&self) -> EntityRef {
        self.link
    }

    pub fn anchor(&self) -> (i32, i32) {
        (self.anchor_x, self.anchor_y)
    }

    /// True iff the last matched buffer was a nonempty prefix of the word
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    fn refresh_highlight(&mut self, buffer: &str) {
        self.highlighted = !buffer.is_empty() && self.word.starts_with(buffer);
    }
}

/// All live word entities plus the pool their words come from
#[derive(Debug, Clone)]
pub struct WordRegistry {
    pool: WordPool,
    entities: Vec<WordEntity>,
}

impl WordRegistry {
    pub fn new(pool: WordPool) -> Self {
        Self {
            pool,
            entities: Vec::new(),
        }
    }

    /// Spawn an entity for `link` at the given anchor with a fresh word
    ///
    /// Returns the assigned word.
    pub fn create_entity(&mut self, link: EntityRef, x: i32, y: i32) -> Result<String> {
        let word = self.pool.sample()?;
        self.entities.push(WordEntity {
            word: word.clone(),
            link,
            anchor_x: x,
            anchor_y: y,
            highlighted: false,
        });
        Ok(word)
    }

    /// Remove every entity whose link satisfies `predicate`
    ///
    /// Purged words go back to the pool. Returns how many entities were removed.
    pub fn purge_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&EntityRef) -> bool,
    {
        let before = self.entities.len();
        let pool = &mut self.pool;
        self.entities.retain(|entity| {
            if predicate(&entity.link) {
                pool.release(&entity.word);
                false
            } else {
                true
            }
        });
        before - self.entities.len()
    }

    /// Remove every entity of the given kind
    pub fn purge_kind(&mut self, kind: EntityKind) -> usize {
        self.purge_where(|link| link.kind() == kind)
    }

    /// Match the typed buffer against every live word
    ///
    /// Updates every entity's highlight. The first entity (in creation order)
    /// whose word equals a nonempty buffer gets a fresh word and its link is
    /// returned.
    pub fn match_typed_buffer(&mut self, buffer: &str) -> Option<EntityRef> {
        let mut matched = None;
        for (idx, entity) in self.entities.iter_mut().enumerate() {
            if matched.is_none() && !buffer.is_empty() && entity.word == buffer {
                matched = Some(idx);
            }
            entity.refresh_highlight(buffer);
        }

        let idx = matched?;
        self.recycle_word(idx);
        let entity = &mut self.entities[idx];
        entity.refresh_highlight(buffer);
        Some(entity.link)
    }

    /// Swap the entity's word for a fresh one
    ///
    /// The replacement is drawn while the old word is still reserved, so it
    /// always differs. If nothing else is free the old word is released first
    /// and may come straight back.
    fn recycle_word(&mut self, idx: usize) {
        let old = self.entities[idx].word.clone();
        let fresh = match self.pool.sample() {
            Ok(word) => {
                self.pool.release(&old);
                word
            }
            Err(err) => {
                tracing::warn!("{}; recycling '{}' in place", err, old);
                self.pool.release(&old);
                match self.pool.sample() {
                    Ok(word) => word,
                    Err(_) => {
                        self.pool.reserve(&old);
                        old
                    }
                }
            }
        };
        self.entities[idx].word = fresh;
    }

    pub fn entities(&self) -> &[WordEntity] {
        &self.entities
    }

    /// First entity bound to `link`
    pub fn find_by_link(&self, link: EntityRef) -> Option<&WordEntity> {
        self.entities.iter().find(|e| e.link == link)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.link.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }
}
