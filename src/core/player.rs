//! Factions and per-faction data.
//!
//! ## PlayerId
//!
//! Every creature and slot belongs to one faction. The engine supports any
//! number of factions; "enemy" means "any other faction".
//!
//! ## PlayerMap
//!
//! Dense per-faction storage indexed by `PlayerId` (scores, momentum).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Faction identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all factions of a match.
    ///
    /// ```
    /// use primal_arena::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Is `other` an opposing faction?
    #[must_use]
    pub fn is_enemy_of(self, other: PlayerId) -> bool {
        self != other
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Per-faction values with O(1) access.
///
/// ```
/// use primal_arena::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<i64> = PlayerMap::with_value(2, 0);
/// score[PlayerId::new(1)] += 4;
/// assert_eq!(score[PlayerId::new(1)], 4);
/// assert_eq!(score.total(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map with one value per faction from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Build a map with every entry set to `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Number of factions.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over `(PlayerId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Overwrite every entry.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for slot in &mut self.data {
            *slot = value.clone();
        }
    }
}

impl PlayerMap<i64> {
    /// Sum over all factions.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.data.iter().sum()
    }

    /// Entry-wise difference `self - earlier`.
    #[must_use]
    pub fn delta_since(&self, earlier: &PlayerMap<i64>) -> PlayerMap<i64> {
        PlayerMap {
            data: self
                .data
                .iter()
                .zip(earlier.data.iter())
                .map(|(now, then)| now - then)
                .collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(format!("{}", PlayerId::new(0)), "P1");
        assert_eq!(format!("{}", PlayerId::new(1)), "P2");
    }

    #[test]
    fn test_enemy_relation() {
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);
        assert!(a.is_enemy_of(b));
        assert!(!a.is_enemy_of(a));
    }

    #[test]
    fn test_delta_since() {
        let before: PlayerMap<i64> = PlayerMap::new(3, |p| p.index() as i64);
        let mut after = before.clone();
        after[PlayerId::new(2)] += 5;

        let delta = after.delta_since(&before);
        assert_eq!(delta[PlayerId::new(0)], 0);
        assert_eq!(delta[PlayerId::new(2)], 5);
        assert_eq!(delta.total(), 5);
    }

    #[test]
    fn test_fill_resets_every_entry() {
        let mut momentum: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 3);
        momentum.fill(7);
        assert!(momentum.iter().all(|(_, v)| *v == 7));
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_zero_players() {
        let _: PlayerMap<i64> = PlayerMap::with_value(0, 0);
    }
}
