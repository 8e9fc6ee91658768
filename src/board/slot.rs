//! Board slots.

use serde::{Deserialize, Serialize};

use super::creature::CreatureTemplate;
use crate::core::{CreatureId, PlayerId, SlotId};

/// What a slot currently holds. Exactly one state at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotContent {
    Empty,
    Occupied(CreatureId),
    /// Played this turn, revealed at the start of the next resolution.
    Pending(CreatureTemplate),
}

/// One position on a player's side of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSlot {
    pub id: SlotId,
    pub owner: PlayerId,
    /// Lane index on the owner's side, used for adjacency and distance.
    pub position: u16,
    pub content: SlotContent,
}

impl BoardSlot {
    #[must_use]
    pub fn new(id: SlotId, owner: PlayerId, position: u16) -> Self {
        Self {
            id,
            owner,
            position,
            content: SlotContent::Empty,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, SlotContent::Empty)
    }

    #[must_use]
    pub fn occupant(&self) -> Option<CreatureId> {
        match self.content {
            SlotContent::Occupied(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<&CreatureTemplate> {
        match &self.content {
            SlotContent::Pending(t) => Some(t),
            _ => None,
        }
    }

    /// Lane distance to another slot. Facing lanes across sides are one step
    /// further apart than neighbours on the same side.
    #[must_use]
    pub fn distance_to(&self, other: &BoardSlot) -> i32 {
        let lanes = (i32::from(self.position) - i32::from(other.position)).abs();
        if self.owner == other.owner {
            lanes
        } else {
            lanes + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Species;

    #[test]
    fn test_content_states() {
        let mut slot = BoardSlot::new(SlotId(0), PlayerId::new(0), 0);
        assert!(slot.is_empty());

        slot.content = SlotContent::Pending(CreatureTemplate::new("Egg", Species::Avian, 1, 1, 1));
        assert!(!slot.is_empty());
        assert!(slot.pending().is_some());
        assert_eq!(slot.occupant(), None);

        slot.content = SlotContent::Occupied(CreatureId(4));
        assert_eq!(slot.occupant(), Some(CreatureId(4)));
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_distance() {
        let a = BoardSlot::new(SlotId(0), PlayerId::new(0), 0);
        let b = BoardSlot::new(SlotId(1), PlayerId::new(0), 2);
        let c = BoardSlot::new(SlotId(3), PlayerId::new(1), 0);
        assert_eq!(a.distance_to(&b), 2);
        assert_eq!(a.distance_to(&c), 1);
        assert_eq!(b.distance_to(&c), 3);
    }
}
