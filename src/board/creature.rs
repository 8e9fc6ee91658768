//! Creatures and the templates they are spawned from.
//!
//! A `CreatureTemplate` is static card data (serializable, shareable). A
//! `Creature` is one live instance on the board: it owns its own trait
//! instances, status stacks and per-round bookkeeping.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{CreatureId, PlayerId};
use crate::status::StatusEffectStore;
use crate::traits::{TraitKind, TraitList};

/// Dietary class of a creature. Drives which phases it takes part in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Herbivore,
    Carnivore,
    Avian,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stat block and initial traits of a creature card.
///
/// ```
/// use primal_arena::board::{CreatureTemplate, Species};
/// use primal_arena::traits::TraitKind;
///
/// let raptor = CreatureTemplate::new("Raptor", Species::Carnivore, 2, 4, 3)
///     .with_tier(2)
///     .with_trait(TraitKind::Ambush);
///
/// assert_eq!(raptor.body, 2);
/// assert_eq!(raptor.traits, vec![TraitKind::Ambush]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub name: String,
    pub species: Species,
    pub body: i32,
    pub speed: i32,
    pub max_health: i32,
    #[serde(default = "default_tier")]
    pub tier: u8,
    #[serde(default)]
    pub traits: Vec<TraitKind>,
}

fn default_tier() -> u8 {
    1
}

impl CreatureTemplate {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        species: Species,
        body: i32,
        speed: i32,
        max_health: i32,
    ) -> Self {
        Self {
            name: name.into(),
            species,
            body: body.max(0),
            speed: speed.max(0),
            max_health: max_health.max(1),
            tier: 1,
            traits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub fn with_trait(mut self, kind: TraitKind) -> Self {
        self.traits.push(kind);
        self
    }

    /// Momentum cost of playing this card.
    #[must_use]
    pub fn cost(&self) -> i32 {
        i32::from(self.tier.clamp(1, 3))
    }
}

/// Bookkeeping that only lives for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundLedger {
    /// Damage this creature dealt this round.
    pub damage_dealt: i32,
    /// Part of that damage healed back by its victims.
    pub healing_undone: i32,
    /// Creatures this one damaged this round.
    pub damaged: FxHashSet<CreatureId>,
    /// Has this creature taken its attack turn?
    pub acted: bool,
    /// Transient speed adjustment from abilities.
    pub speed_mod: i32,
}

impl RoundLedger {
    /// Score contribution of this creature's fighting.
    #[must_use]
    pub fn net_score(&self) -> i32 {
        (self.damage_dealt - self.healing_undone).max(0)
    }
}

/// A live creature on the board.
#[derive(Debug)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub owner: PlayerId,
    pub species: Species,
    pub tier: u8,
    pub body: i32,
    pub speed: i32,
    max_health: i32,
    current_health: i32,
    /// Food eaten this round.
    pub eaten: i32,
    pub traits: TraitList,
    pub statuses: StatusEffectStore,
    is_dying: bool,
    pub ledger: RoundLedger,
}

impl Creature {
    /// Instantiate a template. Base traits are fresh instances per creature.
    #[must_use]
    pub fn spawn(id: CreatureId, owner: PlayerId, template: &CreatureTemplate) -> Self {
        let mut traits = TraitList::new();
        for kind in &template.traits {
            traits.attach(*kind, None);
        }

        Self {
            id,
            name: template.name.clone(),
            owner,
            species: template.species,
            tier: template.tier,
            body: template.body.max(0),
            speed: template.speed.max(0),
            max_health: template.max_health.max(1),
            current_health: template.max_health.max(1),
            eaten: 0,
            traits,
            statuses: StatusEffectStore::new(),
            is_dying: false,
            ledger: RoundLedger::default(),
        }
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[must_use]
    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    /// Alive and not already on its way out.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dying && self.current_health > 0
    }

    #[must_use]
    pub fn is_dying(&self) -> bool {
        self.is_dying
    }

    pub(crate) fn mark_dying(&mut self) {
        self.is_dying = true;
    }

    /// Lose up to `amount` health. Returns the health actually lost.
    pub fn lose_health(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.current_health);
        self.current_health -= lost;
        lost
    }

    /// Regain up to `amount` health, capped at max. Returns the health gained.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let gained = amount.clamp(0, self.max_health - self.current_health);
        self.current_health += gained;
        gained
    }

    /// Set health directly, clamped to `0..=max`.
    pub fn set_health(&mut self, value: i32) {
        self.current_health = value.clamp(0, self.max_health);
    }

    /// Raise max health and heal by the same amount.
    pub fn grow_max_health(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.max_health += amount;
        self.restore_health(amount);
    }

    /// Permanent body change, floored at zero.
    pub fn adjust_body(&mut self, delta: i32) {
        self.body = (self.body + delta).max(0);
    }

    /// Permanent speed change, floored at zero.
    pub fn adjust_speed(&mut self, delta: i32) {
        self.speed = (self.speed + delta).max(0);
    }

    /// Food still wanted this round for a given effective body.
    #[must_use]
    pub fn unmet_need(&self, effective_body: i32) -> i32 {
        (effective_body - self.eaten).max(0)
    }

    #[must_use]
    pub fn is(&self, species: Species) -> bool {
        self.species == species
    }
}
