//! Lasting effect traits attached by effect cards.
//!
//! These stay on the creature for their card's lifetime (see
//! [`TraitList::tick_lifetimes`](super::TraitList::tick_lifetimes)).

use crate::core::{CreatureId, GameState};
use crate::resolution::damage;
use crate::status::StatusTag;

use super::{ApplyOutcome, Trait, TraitKind};

/// Hidden: attacks on it are negated, but it neither attacks nor grazes.
#[derive(Debug)]
pub struct AdaptiveCamouflage;

impl Trait for AdaptiveCamouflage {
    fn kind(&self) -> TraitKind {
        TraitKind::AdaptiveCamouflage
    }

    fn try_negate_attack(&mut self, _state: &GameState, _me: CreatureId, _attacker: CreatureId) -> bool {
        true
    }

    fn can_attack(&self, _state: &GameState, _me: CreatureId) -> bool {
        false
    }

    fn modify_herbivore_eat_amount(&self, _state: &GameState, _me: CreatureId, _amount: i32) -> i32 {
        0
    }
}

/// Reduces the next incoming hit by 2, then falls off.
#[derive(Debug, Default)]
pub struct LingeringCarapace {
    spent: bool,
}

impl Trait for LingeringCarapace {
    fn kind(&self) -> TraitKind {
        TraitKind::LingeringCarapace
    }

    fn modify_incoming_damage(
        &mut self,
        _state: &GameState,
        _me: CreatureId,
        _attacker: CreatureId,
        damage: i32,
    ) -> i32 {
        if self.spent {
            return damage;
        }
        self.spent = true;
        (damage - 2).max(0)
    }

    fn is_spent(&self) -> bool {
        self.spent
    }
}

/// 1 damage at the start of every round.
#[derive(Debug)]
pub struct LingeringParasite;

impl Trait for LingeringParasite {
    fn kind(&self) -> TraitKind {
        TraitKind::LingeringParasite
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        damage::deal_damage(state, me, 1, None);
    }
}

/// Doubles outgoing attack damage.
#[derive(Debug)]
pub struct LingeringRage;

impl Trait for LingeringRage {
    fn kind(&self) -> TraitKind {
        TraitKind::LingeringRage
    }

    fn modify_outgoing_damage(
        &mut self,
        _state: &GameState,
        _me: CreatureId,
        _target: CreatureId,
        damage: i32,
    ) -> i32 {
        (damage * 2).max(0)
    }
}

#[derive(Debug)]
pub struct NutrientSurgeBuff;

impl Trait for NutrientSurgeBuff {
    fn kind(&self) -> TraitKind {
        TraitKind::NutrientSurgeBuff
    }

    fn modify_herbivore_eat_amount(&self, _state: &GameState, _me: CreatureId, amount: i32) -> i32 {
        amount + 1
    }
}

/// SpeedUp 2 and DamageUp 1 on application. SpeedUp is wiped at round end.
#[derive(Debug)]
pub struct PrimalInstinct;

impl Trait for PrimalInstinct {
    fn kind(&self) -> TraitKind {
        TraitKind::PrimalInstinct
    }

    fn on_apply(&mut self, state: &mut GameState, me: CreatureId) -> ApplyOutcome {
        state.add_status(me, StatusTag::SpeedUp, 2);
        state.add_status(me, StatusTag::DamageUp, 1);
        ApplyOutcome::Keep
    }

    fn on_round_end(&mut self, state: &mut GameState, me: CreatureId) {
        state.clear_status(me, StatusTag::SpeedUp);
    }
}

/// Doubles body through BodyUp until round end.
#[derive(Debug)]
pub struct TitansMight;

impl Trait for TitansMight {
    fn kind(&self) -> TraitKind {
        TraitKind::TitansMight
    }

    fn on_apply(&mut self, state: &mut GameState, me: CreatureId) -> ApplyOutcome {
        let body = state.creature(me).map_or(0, |c| c.body.max(0));
        if body > 0 {
            state.add_status(me, StatusTag::BodyUp, body as u32);
        }
        ApplyOutcome::Keep
    }

    fn on_round_end(&mut self, state: &mut GameState, me: CreatureId) {
        state.clear_status(me, StatusTag::BodyUp);
    }
}
