//! Per-creature status stacks.

use serde::{Deserialize, Serialize};

use super::tag::StatusTag;

/// What happened to a status add.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stacks were added; carries the new count.
    Applied(u32),
    /// A negative tag was blocked and one Immune charge spent.
    Blocked,
    /// Nothing to add.
    Ignored,
}

/// Stack counts for every [`StatusTag`] on one creature.
///
/// Counts are unsigned, so they can never go below zero, and an absent tag is
/// simply a zero entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffectStore {
    stacks: [u32; StatusTag::COUNT],
}

impl StatusEffectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stacks of `tag`.
    #[must_use]
    pub fn get(&self, tag: StatusTag) -> u32 {
        self.stacks[tag.index()]
    }

    /// Current stacks of `tag` as a signed stat delta.
    #[must_use]
    pub fn get_i32(&self, tag: StatusTag) -> i32 {
        i32::try_from(self.get(tag)).unwrap_or(i32::MAX)
    }

    #[must_use]
    pub fn has(&self, tag: StatusTag) -> bool {
        self.get(tag) > 0
    }

    /// Add stacks, honouring boolean tags and Immune interception.
    pub fn add(&mut self, tag: StatusTag, stacks: u32) -> AddOutcome {
        if stacks == 0 {
            return AddOutcome::Ignored;
        }
        if tag.is_negative() && self.has(StatusTag::Immune) {
            self.decrement(StatusTag::Immune, 1);
            return AddOutcome::Blocked;
        }

        let slot = &mut self.stacks[tag.index()];
        *slot = if tag.stacks() {
            slot.saturating_add(stacks)
        } else {
            1
        };
        AddOutcome::Applied(*slot)
    }

    /// Remove up to `amount` stacks. Returns the remaining count.
    pub fn decrement(&mut self, tag: StatusTag, amount: u32) -> u32 {
        let slot = &mut self.stacks[tag.index()];
        *slot = slot.saturating_sub(amount);
        *slot
    }

    /// Remove all stacks of `tag`. Returns how many were removed.
    pub fn clear(&mut self, tag: StatusTag) -> u32 {
        std::mem::take(&mut self.stacks[tag.index()])
    }

    /// Spend one charge of `tag` if any is present.
    pub fn consume_charge(&mut self, tag: StatusTag) -> bool {
        if self.has(tag) {
            self.decrement(tag, 1);
            true
        } else {
            false
        }
    }

    /// Remove every cleansable tag.
    pub fn clear_negatives(&mut self) {
        for tag in StatusTag::ALL {
            if tag.is_cleansable() {
                self.clear(tag);
            }
        }
    }

    /// Non-zero entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusTag, u32)> + '_ {
        StatusTag::ALL
            .iter()
            .map(|&tag| (tag, self.get(tag)))
            .filter(|(_, n)| *n > 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(|n| *n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_zero() {
        let store = StatusEffectStore::new();
        assert_eq!(store.get(StatusTag::Regen), 0);
        assert!(!store.has(StatusTag::Regen));
        assert!(store.is_empty());
    }

    #[test]
    fn test_stacking_and_boolean_tags() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Regen, 2);
        store.add(StatusTag::Regen, 1);
        assert_eq!(store.get(StatusTag::Regen), 3);

        store.add(StatusTag::Rage, 1);
        store.add(StatusTag::Rage, 4);
        assert_eq!(store.get(StatusTag::Rage), 1);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Fatigued, 1);
        assert_eq!(store.decrement(StatusTag::Fatigued, 5), 0);
        assert_eq!(store.decrement(StatusTag::Bleeding, 1), 0);
    }

    #[test]
    fn test_immune_blocks_negative_add() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Immune, 1);

        assert_eq!(store.add(StatusTag::Bleeding, 2), AddOutcome::Blocked);
        assert_eq!(store.get(StatusTag::Bleeding), 0);
        assert_eq!(store.get(StatusTag::Immune), 0);

        assert_eq!(store.add(StatusTag::Bleeding, 2), AddOutcome::Applied(2));
    }

    #[test]
    fn test_immune_ignores_positive_add() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Immune, 1);
        assert_eq!(store.add(StatusTag::Shielded, 1), AddOutcome::Applied(1));
        assert_eq!(store.get(StatusTag::Immune), 1);
    }

    #[test]
    fn test_zero_add_is_ignored() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Immune, 1);
        assert_eq!(store.add(StatusTag::Infected, 0), AddOutcome::Ignored);
        assert_eq!(store.get(StatusTag::Immune), 1);
    }

    #[test]
    fn test_consume_charge() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Shielded, 2);
        assert!(store.consume_charge(StatusTag::Shielded));
        assert_eq!(store.get(StatusTag::Shielded), 1);
        assert!(store.consume_charge(StatusTag::Shielded));
        assert!(!store.consume_charge(StatusTag::Shielded));
    }

    #[test]
    fn test_clear_negatives_keeps_buffs() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::Infected, 3);
        store.add(StatusTag::Stunned, 1);
        store.add(StatusTag::Malnourished, 1);
        store.add(StatusTag::Shielded, 1);
        store.add(StatusTag::Starvation, 2);

        store.clear_negatives();

        let left: Vec<_> = store.iter().collect();
        assert_eq!(
            left,
            vec![(StatusTag::Shielded, 1), (StatusTag::Starvation, 2)]
        );
    }

    #[test]
    fn test_clear_returns_previous() {
        let mut store = StatusEffectStore::new();
        store.add(StatusTag::DamageUp, 3);
        assert_eq!(store.clear(StatusTag::DamageUp), 3);
        assert!(!store.has(StatusTag::DamageUp));
    }
}
