//! Held-key repeat timing
//!
//! A held key fires on its first tick, then again once it has been held for
//! `delay` ticks, then every `interval` ticks after that.

/// Whether a key is down this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Up,
    Held,
}

/// Tracks how long a key has been held and decides when it fires
#[derive(Debug, Clone)]
pub struct RepeatKey {
    held_ticks: u32,
    delay: u32,
    interval: u32,
}

impl RepeatKey {
    pub fn new(delay: u32, interval: u32) -> Self {
        Self {
            held_ticks: 0,
            delay,
            interval: interval.max(1),
        }
    }

    /// Feed this tick's key state; returns true if the key fires
    pub fn update(&mut self, state: KeyState) -> bool {
        match state {
            KeyState::Up => {
                self.held_ticks = 0;
                false
            }
            KeyState::Held => {
                self.held_ticks = self.held_ticks.saturating_add(1);
                let d = self.held_ticks;
                d == 1 || (d >= self.delay && (d - self.delay) % self.interval == 0)
            }
        }
    }

    pub fn held_ticks(&self) -> u32 {
        self.held_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_ticks(key: &mut RepeatKey, held_for: u32) -> Vec<u32> {
        (1..=held_for)
            .filter(|_| key.update(KeyState::Held))
            .collect()
    }

    #[test]
    fn test_first_press_fires_immediately() {
        let mut key = RepeatKey::new(30, 3);
        assert!(key.update(KeyState::Held));
        assert!(!key.update(KeyState::Held));
    }

    #[test]
    fn test_repeat_after_delay_then_interval() {
        let mut key = RepeatKey::new(30, 3);
        assert_eq!(fire_ticks(&mut key, 40), vec![1, 30, 33, 36, 39]);
    }

    #[test]
    fn test_release_resets() {
        let mut key = RepeatKey::new(30, 3);
        key.update(KeyState::Held);
        key.update(KeyState::Held);
        assert!(!key.update(KeyState::Up));
        assert_eq!(key.held_ticks(), 0);
        assert!(key.update(KeyState::Held));
    }

    #[test]
    fn test_taps_fire_every_time() {
        let mut key = RepeatKey::new(30, 3);
        for _ in 0..5 {
            assert!(key.update(KeyState::Held));
            key.update(KeyState::Up);
        }
    }
}
