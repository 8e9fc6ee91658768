//! Effect card definitions.
//!
//! An effect card attaches effect traits to the creatures it targets and may
//! also queue a global effect. Gating (era, weather, momentum) lives in
//! [`crate::rules`]; this module only describes the card and who it can hit.

use serde::{Deserialize, Serialize};

use crate::board::Species;
use crate::core::{CreatureId, GameState, PlayerId};
use crate::rules::Era;
use crate::traits::TraitKind;

use super::global::GlobalEffectKind;

/// Whose creatures a card may target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSide {
    Ally,
    Enemy,
    #[default]
    Any,
}

/// Species filter on targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSpecies {
    #[default]
    Any,
    Only(Species),
}

/// How many targets a play names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCount {
    #[default]
    One,
    UpTo(usize),
    /// Every valid creature; the player names none.
    AllValid,
}

/// Who an effect card can hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRule {
    pub side: TargetSide,
    pub species: TargetSpecies,
    pub count: TargetCount,
}

impl TargetRule {
    /// No creature targets at all.
    pub const NONE: TargetRule = TargetRule {
        side: TargetSide::Any,
        species: TargetSpecies::Any,
        count: TargetCount::UpTo(0),
    };

    #[must_use]
    pub fn new(side: TargetSide, count: TargetCount) -> Self {
        Self {
            side,
            species: TargetSpecies::Any,
            count,
        }
    }

    #[must_use]
    pub fn species(mut self, species: Species) -> Self {
        self.species = TargetSpecies::Only(species);
        self
    }

    /// Most creatures a single play may name.
    #[must_use]
    pub fn max_targets(&self) -> usize {
        match self.count {
            TargetCount::One => 1,
            TargetCount::UpTo(n) => n,
            TargetCount::AllValid => 0,
        }
    }

    /// Does `candidate` pass the side and species filters for `player`?
    #[must_use]
    pub fn accepts(&self, state: &GameState, player: PlayerId, candidate: CreatureId) -> bool {
        let Some(c) = state.creature(candidate).filter(|c| c.is_alive()) else {
            return false;
        };
        let side_ok = match self.side {
            TargetSide::Ally => c.owner == player,
            TargetSide::Enemy => c.owner != player,
            TargetSide::Any => true,
        };
        let species_ok = match self.species {
            TargetSpecies::Any => true,
            TargetSpecies::Only(s) => c.species == s,
        };
        side_ok && species_ok
    }

    /// Every living creature this rule accepts, in slot order.
    #[must_use]
    pub fn valid_targets(&self, state: &GameState, player: PlayerId) -> Vec<CreatureId> {
        state
            .board
            .living()
            .into_iter()
            .filter(|id| self.accepts(state, player, *id))
            .collect()
    }
}

/// One effect trait an effect card attaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: TraitKind,
    /// Lifetime in rounds; one-shot effects ignore it.
    pub rounds: u32,
}

/// A playable effect card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectCard {
    pub name: String,
    pub min_era: Era,
    pub cost: i32,
    #[serde(default)]
    pub requires_clear_weather: bool,
    pub target: TargetRule,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub global: Option<(GlobalEffectKind, u32)>,
}

impl EffectCard {
    /// Card with no targets and no effects; build it up with the `with_*` methods.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i32) -> Self {
        Self {
            name: name.into(),
            min_era: Era::Triassic,
            cost,
            requires_clear_weather: false,
            target: TargetRule::NONE,
            attachments: Vec::new(),
            global: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetRule) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, kind: TraitKind, rounds: u32) -> Self {
        self.attachments.push(Attachment { kind, rounds });
        self
    }

    #[must_use]
    pub fn with_global(mut self, kind: GlobalEffectKind, rounds: u32) -> Self {
        self.global = Some((kind, rounds));
        self
    }

    #[must_use]
    pub fn with_min_era(mut self, era: Era) -> Self {
        self.min_era = era;
        self
    }

    #[must_use]
    pub fn clear_weather_only(mut self) -> Self {
        self.requires_clear_weather = true;
        self
    }

    /// Does this card hit creatures without the player naming them?
    #[must_use]
    pub fn auto_targets(&self) -> bool {
        self.target.count == TargetCount::AllValid
    }

    /// Does a play of this card need named targets?
    #[must_use]
    pub fn needs_targets(&self) -> bool {
        !self.attachments.is_empty() && !self.auto_targets() && self.target.max_targets() > 0
    }
}
