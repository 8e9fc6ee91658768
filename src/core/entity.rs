//! Identifiers for board objects.
//!
//! Creatures and slots get small copyable ids. A `CreatureId` is allocated
//! once per spawned creature and never reused within a match, so events and
//! bookkeeping that mention a dead creature stay unambiguous.
//!
//! ```
//! use primal_arena::core::{CreatureId, SlotId};
//!
//! let a = CreatureId::new(3);
//! assert_eq!(a.raw(), 3);
//! assert_eq!(format!("{}", SlotId::new(1)), "Slot(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a creature for the lifetime of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Create a creature id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CreatureId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Index of a board slot. Slots are created once when the board is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u16);

impl SlotId {
    /// Create a slot id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Index into the board's slot table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Monotonic allocator for creature ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next creature id.
    pub fn alloc(&mut self) -> CreatureId {
        let id = CreatureId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_id_display() {
        assert_eq!(format!("{}", CreatureId(42)), "Creature(42)");
        assert_eq!(CreatureId::from(7).raw(), 7);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(SlotId::new(5).index(), 5);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.alloc();
        let b = ids.alloc();
        let c = ids.alloc();
        assert_eq!(a, CreatureId(1));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_default_allocator_skips_zero() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.alloc(), CreatureId(1));
        assert_eq!(ids.alloc(), CreatureId(2));
    }

    #[test]
    fn test_serialization() {
        let id = CreatureId(123);
        let json = serde_json::to_string(&id).unwrap();
        let back: CreatureId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
