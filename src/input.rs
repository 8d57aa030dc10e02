//! Polled keyboard state.
//!
//! The game only ever asks "is this key held right now?".  Turning raw
//! terminal events into that answer is the front end's job.

use std::collections::HashSet;

/// Logical keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Fire a bolt.
    Fire,
    /// Start a game or continue after losing a ship.
    Start,
}

pub trait KeyInput {
    fn is_key_down(&self, key: Key) -> bool;
}

/// The set of keys held during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(keys: &[Key]) -> Self {
        HeldKeys { keys: keys.iter().copied().collect() }
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }
}

impl KeyInput for HeldKeys {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}
