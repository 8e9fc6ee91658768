//! Deterministic random number generation.
//!
//! Every random draw in a match (tie-breaks, weather, food dice, random
//! picks made by abilities) comes from the single `GameRng` owned by
//! `GameState`. Two matches built from the same seed and the same intents
//! therefore produce the same event sequence.
//!
//! ```
//! use primal_arena::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(6), b.roll_die(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 generator with game-oriented helpers.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random integer in `[range.start, range.end)`. Empty ranges return `start`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    /// Random index below `len`, or `None` for an empty collection.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Roll one die with `sides` faces (1..=sides).
    pub fn roll_die(&mut self, sides: u32) -> i32 {
        let sides = sides.max(1) as i32;
        self.inner.gen_range(1..=sides)
    }

    /// Key used to break ordering ties between otherwise equal creatures.
    pub fn tie_break_key(&mut self) -> u32 {
        self.inner.gen()
    }

    /// Choose an index with integer-weighted probability.
    ///
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let roll = self.inner.gen_range(0..total);
        let mut acc = 0u64;
        for (i, &weight) in weights.iter().enumerate() {
            acc += u64::from(weight);
            if roll < acc {
                return Some(i);
            }
        }

        weights.iter().rposition(|&w| w > 0)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the generator position for replay.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a generator captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the generator started from
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}
