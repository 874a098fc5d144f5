//! Seeded number stream.
//!
//! A linear congruential generator whose exact recurrence is part of the
//! dungeon's identity: the same seed must replay the same layout in any
//! implementation, so the constants and modulus never change.

use serde::{Deserialize, Serialize};

use crate::constants::{RNG_INCREMENT, RNG_MODULUS, RNG_MULTIPLIER};

/// Advance the recurrence once.
///
/// Returns the drawn value in `[0, 1)` and the new state.
pub fn next(state: u64) -> (f64, u64) {
    let new_state = ((state % RNG_MODULUS) * RNG_MULTIPLIER + RNG_INCREMENT) % RNG_MODULUS;
    (new_state as f64 / RNG_MODULUS as f64, new_state)
}

/// Stateful wrapper around [`next`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let (value, state) = next(self.state);
        self.state = state;
        value
    }

    /// Inclusive integer in `[min, max]`. Consumes one draw even when the
    /// range is degenerate.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        let roll = self.next_f64();
        if max <= min {
            return min;
        }
        min + (roll * (max - min + 1) as f64) as usize
    }

    /// Inclusive signed integer in `[min, max]`.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        let roll = self.next_f64();
        if max <= min {
            return min;
        }
        min + (roll * (max - min + 1) as f64) as i32
    }

    /// `true` with probability one half.
    pub fn coin_flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }

    /// Uniform pick from a slice; `None` (and no draw) when it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = (self.next_f64() * items.len() as f64) as usize;
        items.get(idx.min(items.len() - 1))
    }
}
