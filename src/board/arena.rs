//! The board: slots, the creatures in them, and board queries.
//!
//! Slots are laid out per player in lane order: player 0 owns slots
//! `0..n`, player 1 owns `n..2n`, and so on. All enumeration is in slot
//! order, which keeps every query deterministic.

use rustc_hash::FxHashMap;

use super::creature::{Creature, CreatureTemplate, Species};
use super::slot::{BoardSlot, SlotContent};
use crate::core::{CreatureId, IdAllocator, PlayerId, SlotId};

/// Slots, live creatures, and the graveyard.
#[derive(Debug)]
pub struct Board {
    slots: Vec<BoardSlot>,
    creatures: FxHashMap<CreatureId, Creature>,
    locations: FxHashMap<CreatureId, SlotId>,
    ids: IdAllocator,
    graveyard: Vec<CreatureId>,
}

impl Board {
    /// Empty board with `slots_per_player` lanes for each player.
    #[must_use]
    pub fn new(player_count: usize, slots_per_player: usize) -> Self {
        let mut slots = Vec::with_capacity(player_count * slots_per_player);
        for player in PlayerId::all(player_count) {
            for lane in 0..slots_per_player {
                let id = SlotId(slots.len() as u16);
                slots.push(BoardSlot::new(id, player, lane as u16));
            }
        }

        Self {
            slots,
            creatures: FxHashMap::default(),
            locations: FxHashMap::default(),
            ids: IdAllocator::new(),
            graveyard: Vec::new(),
        }
    }

    // === Slots ===

    #[must_use]
    pub fn slots(&self) -> &[BoardSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&BoardSlot> {
        self.slots.get(id.index())
    }

    /// Slots owned by `owner`, in lane order.
    pub fn slots_of(&self, owner: PlayerId) -> impl Iterator<Item = &BoardSlot> {
        self.slots.iter().filter(move |s| s.owner == owner)
    }

    #[must_use]
    pub fn slot_of(&self, creature: CreatureId) -> Option<SlotId> {
        self.locations.get(&creature).copied()
    }

    /// Spawn a creature straight into an empty slot.
    pub fn place(&mut self, slot: SlotId, template: &CreatureTemplate) -> Option<CreatureId> {
        let owner = match self.slots.get(slot.index()) {
            Some(s) if s.is_empty() => s.owner,
            _ => return None,
        };
        Some(self.spawn_into(slot, owner, template))
    }

    /// Put a template face-down into an empty slot.
    pub fn set_pending(&mut self, slot: SlotId, template: CreatureTemplate) -> bool {
        match self.slots.get_mut(slot.index()) {
            Some(s) if s.is_empty() => {
                s.content = SlotContent::Pending(template);
                true
            }
            _ => false,
        }
    }

    /// Spawn every pending template. Returns `(creature, slot)` in slot order.
    pub fn reveal_pending(&mut self) -> Vec<(CreatureId, SlotId)> {
        let pending: Vec<(SlotId, PlayerId, CreatureTemplate)> = self
            .slots
            .iter()
            .filter_map(|s| s.pending().map(|t| (s.id, s.owner, t.clone())))
            .collect();

        pending
            .into_iter()
            .map(|(slot, owner, template)| (self.spawn_into(slot, owner, &template), slot))
            .collect()
    }

    fn spawn_into(&mut self, slot: SlotId, owner: PlayerId, template: &CreatureTemplate) -> CreatureId {
        let id = self.ids.alloc();
        self.creatures.insert(id, Creature::spawn(id, owner, template));
        self.locations.insert(id, slot);
        if let Some(s) = self.slots.get_mut(slot.index()) {
            s.content = SlotContent::Occupied(id);
        }
        id
    }

    // === Creatures ===

    #[must_use]
    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    /// On the board, health above 0 and not dying.
    #[must_use]
    pub fn is_alive(&self, id: CreatureId) -> bool {
        self.get(id).is_some_and(Creature::is_alive)
    }

    /// Every creature still on the board, dying ones included, in slot order.
    #[must_use]
    pub fn all_ids(&self) -> Vec<CreatureId> {
        self.slots.iter().filter_map(BoardSlot::occupant).collect()
    }

    /// Living creatures in slot order.
    #[must_use]
    pub fn living(&self) -> Vec<CreatureId> {
        self.slots
            .iter()
            .filter_map(BoardSlot::occupant)
            .filter(|id| self.is_alive(*id))
            .collect()
    }

    #[must_use]
    pub fn living_of(&self, owner: PlayerId) -> Vec<CreatureId> {
        self.living()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|c| c.owner == owner))
            .collect()
    }

    #[must_use]
    pub fn living_species(&self, owner: PlayerId, species: Species) -> Vec<CreatureId> {
        self.living_of(owner)
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|c| c.species == species))
            .collect()
    }

    /// Living creatures of every other player.
    #[must_use]
    pub fn enemies_of(&self, id: CreatureId) -> Vec<CreatureId> {
        let Some(owner) = self.get(id).map(|c| c.owner) else {
            return Vec::new();
        };
        self.living()
            .into_iter()
            .filter(|other| self.get(*other).is_some_and(|c| c.owner.is_enemy_of(owner)))
            .collect()
    }

    /// Living creatures of the same player, excluding `id` itself.
    #[must_use]
    pub fn allies_of(&self, id: CreatureId) -> Vec<CreatureId> {
        let Some(owner) = self.get(id).map(|c| c.owner) else {
            return Vec::new();
        };
        self.living_of(owner).into_iter().filter(|other| *other != id).collect()
    }

    /// Living allies in the neighbouring lanes.
    #[must_use]
    pub fn adjacent_allies(&self, id: CreatureId) -> Vec<CreatureId> {
        let Some(here) = self.slot_of(id).and_then(|s| self.slot(s)) else {
            return Vec::new();
        };
        self.allies_of(id)
            .into_iter()
            .filter(|other| {
                self.slot_of(*other)
                    .and_then(|s| self.slot(s))
                    .is_some_and(|there| there.distance_to(here) == 1 && there.owner == here.owner)
            })
            .collect()
    }

    /// Lane distance between two creatures' slots.
    #[must_use]
    pub fn distance(&self, a: CreatureId, b: CreatureId) -> Option<i32> {
        let sa = self.slot(self.slot_of(a)?)?;
        let sb = self.slot(self.slot_of(b)?)?;
        Some(sa.distance_to(sb))
    }

    /// Closest candidate to `from`. Ties go to the lower slot id.
    #[must_use]
    pub fn nearest(&self, from: CreatureId, candidates: &[CreatureId]) -> Option<CreatureId> {
        candidates
            .iter()
            .filter_map(|c| Some((self.distance(from, *c)?, self.slot_of(*c)?, *c)))
            .min_by_key(|(d, slot, _)| (*d, *slot))
            .map(|(_, _, c)| c)
    }

    // === Removal ===

    /// Take dying creatures off the board, freeing their slots.
    pub fn remove_dying(&mut self) -> Vec<Creature> {
        let dying: Vec<CreatureId> = self
            .all_ids()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|c| c.is_dying() || c.current_health() == 0))
            .collect();

        let mut removed = Vec::with_capacity(dying.len());
        for id in dying {
            if let Some(slot) = self.locations.remove(&id) {
                if let Some(s) = self.slots.get_mut(slot.index()) {
                    s.content = SlotContent::Empty;
                }
            }
            if let Some(creature) = self.creatures.remove(&id) {
                self.graveyard.push(id);
                removed.push(creature);
            }
        }
        removed
    }

    /// Removed creatures in removal order.
    #[must_use]
    pub fn graveyard(&self) -> &[CreatureId] {
        &self.graveyard
    }
}
