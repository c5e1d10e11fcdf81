//! Property tests for the word pool and registry
//!
//! Random sequences of create / purge / type operations must never break the
//! registry's invariants:
//! - no two live entities share a word
//! - the pool's in-use set is exactly the set of live words
//! - an entity is highlighted iff the last buffer is a nonempty prefix of its word
//! - a match returns the link of the first entity whose word equalled the buffer

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use typewar::core::types::NodeId;
use typewar::words::{EntityKind, EntityRef, WordPool, WordRegistry};

#[derive(Debug, Clone)]
enum Op {
    CreateNode(u32),
    CreateEdge(u32, u32),
    PurgeEdges,
    PurgeAll,
    Type(String),
    /// Type the word of the live entity at this index (mod len)
    TypeLive(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..8).prop_map(Op::CreateNode),
        3 => (0u32..8, 0u32..8).prop_map(|(d, s)| Op::CreateEdge(d, s)),
        1 => Just(Op::PurgeEdges),
        1 => Just(Op::PurgeAll),
        2 => "[a-c]{0,3}".prop_map(Op::Type),
        3 => any::<usize>().prop_map(Op::TypeLive),
    ]
}

fn registry(vocabulary: Vec<String>, seed: u64) -> WordRegistry {
    let pool = WordPool::new(vocabulary, ChaCha8Rng::seed_from_u64(seed))
        .unwrap()
        .with_max_attempts(4);
    WordRegistry::new(pool)
}

fn check_invariants(registry: &WordRegistry) -> Result<(), TestCaseError> {
    let live: Vec<&str> = registry.entities().iter().map(|e| e.word()).collect();
    let distinct: HashSet<&str> = live.iter().copied().collect();
    prop_assert_eq!(distinct.len(), live.len(), "duplicate live word in {:?}", live);
    prop_assert_eq!(registry.pool().in_use_count(), live.len());
    for word in &live {
        prop_assert!(registry.pool().is_in_use(word));
    }
    Ok(())
}

proptest! {
    #[test]
    fn registry_invariants_hold(
        vocabulary in prop::collection::vec("[a-c]{1,3}", 1..16),
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut registry = registry(vocabulary, seed);

        for op in ops {
            match op {
                Op::CreateNode(n) => {
                    // Exhaustion is a legal outcome; the registry must stay consistent
                    let _ = registry.create_entity(EntityRef::Node(NodeId(n)), 0, 0);
                }
                Op::CreateEdge(d, s) => {
                    let link = EntityRef::Edge { dest: NodeId(d), source: NodeId(s) };
                    let _ = registry.create_entity(link, 0, 0);
                }
                Op::PurgeEdges => {
                    registry.purge_kind(EntityKind::Edge);
                    prop_assert_eq!(registry.count_kind(EntityKind::Edge), 0);
                }
                Op::PurgeAll => {
                    let before = registry.len();
                    prop_assert_eq!(registry.purge_where(|_| true), before);
                    prop_assert!(registry.is_empty());
                }
                Op::Type(buffer) => type_and_check(&mut registry, &buffer)?,
                Op::TypeLive(idx) => {
                    if !registry.is_empty() {
                        let buffer = registry.entities()[idx % registry.len()].word().to_string();
                        type_and_check(&mut registry, &buffer)?;
                    }
                }
            }
            check_invariants(&registry)?;
        }
    }

    #[test]
    fn sample_never_repeats_until_exhausted(
        size in 1usize..40,
        seed in any::<u64>(),
    ) {
        let vocabulary: Vec<String> = (0..size).map(|i| format!("w{}", i)).collect();
        let mut pool = WordPool::new(vocabulary, ChaCha8Rng::seed_from_u64(seed)).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..size {
            let word = pool.sample().unwrap();
            prop_assert!(seen.insert(word));
        }
        prop_assert!(pool.sample().is_err());
        prop_assert_eq!(pool.available(), 0);
    }
}

fn type_and_check(registry: &mut WordRegistry, buffer: &str) -> Result<(), TestCaseError> {
    let expected = if buffer.is_empty() {
        None
    } else {
        registry
            .entities()
            .iter()
            .find(|e| e.word() == buffer)
            .map(|e| e.link())
    };

    let matched = registry.match_typed_buffer(buffer);
    prop_assert_eq!(matched, expected);

    for entity in registry.entities() {
        let should = !buffer.is_empty() && entity.word().starts_with(buffer);
        prop_assert_eq!(
            entity.is_highlighted(),
            should,
            "word {:?} buffer {:?}",
            entity.word(),
            buffer
        );
    }
    Ok(())
}
