//! Word pool - the vocabulary and which words are currently on screen
//!
//! Every live word entity holds a word from this pool, and the pool makes sure
//! no two of them hold the same one.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{GameError, Result};

/// Default number of random draws before falling back to a scan
const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Vocabulary plus the set of words assigned to live entities
#[derive(Debug, Clone)]
pub struct WordPool {
    all_words: Vec<String>,
    used_words: AHashSet<String>,
    rng: ChaCha8Rng,
    max_attempts: u32,
}

impl WordPool {
    /// Build a pool from a word list
    ///
    /// Repeated words are collapsed so that "in use" is unambiguous; the first
    /// occurrence keeps its position.
    pub fn new(words: impl IntoIterator<Item = String>, rng: ChaCha8Rng) -> Result<Self> {
        let mut seen = AHashSet::new();
        let all_words: Vec<String> = words
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();

        if all_words.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }

        Ok(Self {
            all_words,
            used_words: AHashSet::new(),
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Build a pool from a whitespace-delimited blob of words
    pub fn from_text(text: &str, rng: ChaCha8Rng) -> Result<Self> {
        Self::new(text.split_whitespace().map(str::to_string), rng)
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Draw a word nobody is using and mark it as in use
    ///
    /// Tries `max_attempts` uniform draws over the whole vocabulary, then picks
    /// uniformly among the free words. Fails with `ExhaustedPool` when every
    /// word is taken.
    pub fn sample(&mut self) -> Result<String> {
        if self.used_words.len() >= self.all_words.len() {
            return Err(GameError::ExhaustedPool {
                in_use: self.used_words.len(),
            });
        }

        for _ in 0..self.max_attempts {
            let idx = self.rng.gen_range(0..self.all_words.len());
            if !self.used_words.contains(&self.all_words[idx]) {
                return Ok(self.claim(idx));
            }
        }

        let free: Vec<usize> = (0..self.all_words.len())
            .filter(|&i| !self.used_words.contains(&self.all_words[i]))
            .collect();
        match free.choose(&mut self.rng) {
            Some(&idx) => Ok(self.claim(idx)),
            None => Err(GameError::ExhaustedPool {
                in_use: self.used_words.len(),
            }),
        }
    }

    fn claim(&mut self, idx: usize) -> String {
        let word = self.all_words[idx].clone();
        self.used_words.insert(word.clone());
        word
    }

    /// Return a word to the pool. Returns false if it was not in use.
    pub fn release(&mut self, word: &str) -> bool {
        self.used_words.remove(word)
    }

    /// Mark a specific vocabulary word as in use again
    pub(crate) fn reserve(&mut self, word: &str) -> bool {
        if self.all_words.iter().any(|w| w == word) {
            self.used_words.insert(word.to_string())
        } else {
            false
        }
    }

    pub fn is_in_use(&self, word: &str) -> bool {
        self.used_words.contains(word)
    }

    /// Number of distinct words in the vocabulary
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    pub fn in_use_count(&self) -> usize {
        self.used_words.len()
    }

    /// Number of words that can still be sampled
    pub fn available(&self) -> usize {
        self.all_words.len() - self.used_words.len()
    }

    pub fn words(&self) -> &[String] {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool(words: &[&str]) -> WordPool {
        WordPool::new(
            words.iter().map(|w| w.to_string()),
            ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn test_two_word_pool_samples_both_then_exhausts() {
        let mut p = pool(&["cat", "dog"]);

        let first = p.sample().unwrap();
        let second = p.sample().unwrap();
        let mut drawn = vec![first, second];
        drawn.sort();
        assert_eq!(drawn, vec!["cat".to_string(), "dog".to_string()]);

        let err = p.sample().unwrap_err();
        assert!(matches!(err, GameError::ExhaustedPool { in_use: 2 }));
    }

    #[test]
    fn test_release_makes_word_available_again() {
        let mut p = pool(&["cat", "dog"]);
        let a = p.sample().unwrap();
        let _b = p.sample().unwrap();
        assert_eq!(p.available(), 0);

        assert!(p.release(&a));
        assert!(!p.is_in_use(&a));
        assert_eq!(p.sample().unwrap(), a);
    }

    #[test]
    fn test_release_unknown_word_is_noop() {
        let mut p = pool(&["cat"]);
        assert!(!p.release("zebra"));
        assert_eq!(p.in_use_count(), 0);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let err = WordPool::from_text("  \n\t ", ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, GameError::EmptyVocabulary));
    }

    #[test]
    fn test_from_text_splits_and_dedups() {
        let p = WordPool::from_text("alpha beta\nalpha\tgamma", ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        assert_eq!(p.words(), &["alpha", "beta", "gamma"]);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_fallback_scan_when_draws_keep_missing() {
        // Zero random attempts forces the scan path every time
        let mut p = pool(&["a", "b", "c", "d"]).with_max_attempts(0);
        let mut drawn: Vec<String> = (0..4).map(|_| p.sample().unwrap()).collect();
        drawn.sort();
        assert_eq!(drawn, vec!["a", "b", "c", "d"]);
        assert!(p.sample().is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let words = ["one", "two", "three", "four", "five", "six"];
        let mut a = pool(&words);
        let mut b = pool(&words);
        for _ in 0..6 {
            assert_eq!(a.sample().unwrap(), b.sample().unwrap());
        }
    }

    #[test]
    fn test_reserve_only_vocabulary_words() {
        let mut p = pool(&["cat"]);
        assert!(p.reserve("cat"));
        assert!(p.is_in_use("cat"));
        assert!(!p.reserve("dog"));
    }
}
