//! The shared food pile.

use serde::{Deserialize, Serialize};

/// One shared food counter. All consumption goes through [`FoodPile::take`].
///
/// ```
/// use primal_arena::board::FoodPile;
///
/// let mut pile = FoodPile::new(3);
/// assert_eq!(pile.take(5), 3);
/// assert_eq!(pile.count(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPile {
    count: i32,
}

impl FoodPile {
    #[must_use]
    pub fn new(count: i32) -> Self {
        Self {
            count: count.max(0),
        }
    }

    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove up to `amount` food and return what was removed.
    pub fn take(&mut self, amount: i32) -> i32 {
        let taken = amount.clamp(0, self.count);
        self.count -= taken;
        taken
    }

    /// Add food. Negative amounts remove food, floored at zero.
    pub fn add(&mut self, amount: i32) {
        self.count = (self.count + amount).max(0);
    }

    /// Replace the pile contents. Leftovers are discarded.
    pub fn set(&mut self, count: i32) {
        self.count = count.max(0);
    }
}
