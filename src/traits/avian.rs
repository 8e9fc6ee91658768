//! Avian abilities: harassment, stealth and scavenging.

use crate::board::Species;
use crate::core::{CreatureId, GameState};
use crate::resolution::stats;
use crate::status::StatusTag;

use super::{Trait, TraitKind};

/// Equal-body prey is fair game when this creature is faster.
#[derive(Debug)]
pub struct AerialPredator;

impl Trait for AerialPredator {
    fn kind(&self) -> TraitKind {
        TraitKind::AerialPredator
    }

    fn can_target_equal_body(&self, state: &GameState, me: CreatureId, target: CreatureId) -> bool {
        stats::effective_speed(state, me) > stats::effective_speed(state, target)
    }
}

/// Landed hits suppress the target while another allied avian is alive.
#[derive(Debug)]
pub struct ConfusionStrike;

impl Trait for ConfusionStrike {
    fn kind(&self) -> TraitKind {
        TraitKind::ConfusionStrike
    }

    fn on_damage_dealt(&mut self, state: &mut GameState, me: CreatureId, target: CreatureId, amount: i32) {
        if amount <= 0 {
            return;
        }
        let flock = state
            .board
            .allies_of(me)
            .into_iter()
            .any(|a| state.is_species(a, Species::Avian));
        if flock {
            state.add_status(target, StatusTag::Suppressed, 1);
        }
    }
}

/// The first hit each round tires the target.
#[derive(Debug, Default)]
pub struct DisruptingPeck {
    used_round: Option<u32>,
}

impl Trait for DisruptingPeck {
    fn kind(&self) -> TraitKind {
        TraitKind::DisruptingPeck
    }

    fn on_damage_dealt(&mut self, state: &mut GameState, _me: CreatureId, target: CreatureId, _amount: i32) {
        if self.used_round == Some(state.round) {
            return;
        }
        self.used_round = Some(state.round);
        state.add_status(target, StatusTag::Fatigued, 1);
    }
}

/// Taking damage grants Stealth at the start of next round.
#[derive(Debug, Default)]
pub struct Evasive {
    armed: bool,
}

impl Trait for Evasive {
    fn kind(&self) -> TraitKind {
        TraitKind::Evasive
    }

    fn on_damage_taken(
        &mut self,
        _state: &mut GameState,
        _me: CreatureId,
        _attacker: Option<CreatureId>,
        amount: i32,
    ) {
        if amount > 0 {
            self.armed = true;
        }
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        if std::mem::take(&mut self.armed) {
            state.add_status(me, StatusTag::Stealth, 1);
        }
    }
}

/// Re-enters stealth after every attack.
#[derive(Debug)]
pub struct GhostStrike;

impl Trait for GhostStrike {
    fn kind(&self) -> TraitKind {
        TraitKind::GhostStrike
    }

    fn on_after_attack_resolved(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        _target: CreatureId,
        _negated: bool,
    ) {
        state.add_status(me, StatusTag::Stealth, 1);
    }
}

/// May attack anything, always for exactly 1, and stuns what it hits.
#[derive(Debug)]
pub struct PrecisionStrike;

impl Trait for PrecisionStrike {
    fn kind(&self) -> TraitKind {
        TraitKind::PrecisionStrike
    }

    fn can_target_any(&self, _state: &GameState, _me: CreatureId) -> bool {
        true
    }

    fn try_override_final_damage(&self, _state: &GameState, _me: CreatureId, _target: CreatureId) -> Option<i32> {
        Some(1)
    }

    fn on_damage_dealt(&mut self, state: &mut GameState, _me: CreatureId, target: CreatureId, _amount: i32) {
        state.add_status(target, StatusTag::Stunned, 1);
    }
}

/// A kill heals and refreshes every allied avian, this one included.
#[derive(Debug)]
pub struct RallyingCall;

impl Trait for RallyingCall {
    fn kind(&self) -> TraitKind {
        TraitKind::RallyingCall
    }

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        let Some(owner) = state.owner_of(me) else {
            return;
        };
        for ally in state.board.living_species(owner, Species::Avian) {
            state.add_status(ally, StatusTag::Regen, 1);
            state.decrement_status(ally, StatusTag::Fatigued, 1);
        }
    }
}

/// Any death feeds an avian by 1, up to its need.
#[derive(Debug)]
pub struct Scavenge;

impl Trait for Scavenge {
    fn kind(&self) -> TraitKind {
        TraitKind::Scavenge
    }

    fn on_any_death(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        if state.is_species(me, Species::Avian) && stats::unmet_need(state, me) > 0 {
            state.feed(me, 1);
        }
    }
}

/// Body +1 whenever anything dies.
#[derive(Debug)]
pub struct ScavengerGrowth;

impl Trait for ScavengerGrowth {
    fn kind(&self) -> TraitKind {
        TraitKind::ScavengerGrowth
    }

    fn on_any_death(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        if let Some(c) = state.creature_mut(me) {
            c.adjust_body(1);
        }
    }
}

/// A carnivore with this can catch faster avians.
#[derive(Debug)]
pub struct SkyHunter;

impl Trait for SkyHunter {
    fn kind(&self) -> TraitKind {
        TraitKind::SkyHunter
    }

    fn ignore_avian_speed_requirement(&self, state: &GameState, me: CreatureId, target: CreatureId) -> bool {
        state.is_species(me, Species::Carnivore) && state.is_species(target, Species::Avian)
    }
}

/// Snatches 1 food from the pile before herbivores eat.
#[derive(Debug)]
pub struct Swoop;

impl Trait for Swoop {
    fn kind(&self) -> TraitKind {
        TraitKind::Swoop
    }

    fn pre_herbivore_pile_steal(&self, _state: &GameState, _me: CreatureId) -> i32 {
        1
    }
}

/// Takes 1 leftover food when foraging starts, if still hungry.
#[derive(Debug)]
pub struct Windfall;

impl Trait for Windfall {
    fn kind(&self) -> TraitKind {
        TraitKind::Windfall
    }

    fn on_foraging(&mut self, state: &mut GameState, me: CreatureId) {
        if state.food.is_empty() || stats::unmet_need(state, me) <= 0 {
            return;
        }
        state.change_food(-1);
        state.feed(me, 1);
    }
}
