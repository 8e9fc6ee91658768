//! Herbivore abilities: feeding bonuses, defence and support.

use crate::board::Species;
use crate::core::{CreatureId, GameState};
use crate::resolution::{combat, damage, stats};
use crate::status::StatusTag;

use super::{Trait, TraitKind};

/// After eating, body +1.
#[derive(Debug)]
pub struct AdaptiveArmor;

impl Trait for AdaptiveArmor {
    fn kind(&self) -> TraitKind {
        TraitKind::AdaptiveArmor
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount <= 0 {
            return;
        }
        if let Some(c) = state.creature_mut(me) {
            c.adjust_body(1);
        }
    }
}

/// Strikes back at whoever damaged it, if it survives.
#[derive(Debug)]
pub struct ArmoredCounter;

impl Trait for ArmoredCounter {
    fn kind(&self) -> TraitKind {
        TraitKind::ArmoredCounter
    }

    fn on_damage_taken(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        attacker: Option<CreatureId>,
        amount: i32,
    ) {
        if let Some(attacker) = attacker.filter(|_| amount > 0) {
            if state.is_alive(me) {
                combat::immediate_attack(state, me, attacker);
            }
        }
    }
}

/// Negates the first attack against it each round.
#[derive(Debug, Default)]
pub struct Burrow {
    used_round: Option<u32>,
}

impl Trait for Burrow {
    fn kind(&self) -> TraitKind {
        TraitKind::Burrow
    }

    fn try_negate_attack(&mut self, state: &GameState, _me: CreatureId, _attacker: CreatureId) -> bool {
        if self.used_round == Some(state.round) {
            return false;
        }
        self.used_round = Some(state.round);
        true
    }
}

/// After eating, counts one extra food as eaten.
#[derive(Debug)]
pub struct ExtendedReach;

impl Trait for ExtendedReach {
    fn kind(&self) -> TraitKind {
        TraitKind::ExtendedReach
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount > 0 {
            state.feed(me, 1);
        }
    }
}

/// After eating, adjacent allied herbivores count one extra food.
#[derive(Debug)]
pub struct Generous;

impl Trait for Generous {
    fn kind(&self) -> TraitKind {
        TraitKind::Generous
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount <= 0 {
            return;
        }
        for ally in state.board.adjacent_allies(me) {
            if state.is_species(ally, Species::Herbivore) {
                state.feed(ally, 1);
            }
        }
    }
}

/// Gains a shield whenever an adjacent ally is hurt.
#[derive(Debug)]
pub struct Guardian;

impl Trait for Guardian {
    fn kind(&self) -> TraitKind {
        TraitKind::Guardian
    }

    fn on_any_damage(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        victim: CreatureId,
        _source: Option<CreatureId>,
        amount: i32,
    ) {
        if amount > 0 && state.board.adjacent_allies(me).contains(&victim) {
            state.add_status(me, StatusTag::Shielded, 1);
        }
    }
}

#[derive(Debug)]
pub struct HerdCaller;

impl Trait for HerdCaller {
    fn kind(&self) -> TraitKind {
        TraitKind::HerdCaller
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount <= 0 {
            return;
        }
        for ally in state.board.adjacent_allies(me) {
            if state.is_species(ally, Species::Herbivore) {
                state.add_status(ally, StatusTag::Regen, 1);
            }
        }
    }
}

/// Eats one more while another allied herbivore is alive.
#[derive(Debug)]
pub struct Herding;

impl Trait for Herding {
    fn kind(&self) -> TraitKind {
        TraitKind::Herding
    }

    fn modify_herbivore_eat_amount(&self, state: &GameState, me: CreatureId, amount: i32) -> i32 {
        let herd = state
            .board
            .allies_of(me)
            .into_iter()
            .any(|a| state.is_species(a, Species::Herbivore));
        if herd {
            amount + 1
        } else {
            amount
        }
    }
}

/// Taunts every round; eating puts two food back on the pile.
#[derive(Debug)]
pub struct Immovable;

impl Trait for Immovable {
    fn kind(&self) -> TraitKind {
        TraitKind::Immovable
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        state.add_status(me, StatusTag::Taunt, 1);
    }

    fn on_after_eat(&mut self, state: &mut GameState, _me: CreatureId, amount: i32) {
        if amount > 0 {
            state.change_food(2);
        }
    }
}

/// Reaches at least one food while the pile has any.
#[derive(Debug)]
pub struct LongNeck;

impl Trait for LongNeck {
    fn kind(&self) -> TraitKind {
        TraitKind::LongNeck
    }

    fn modify_herbivore_eat_amount(&self, state: &GameState, me: CreatureId, amount: i32) -> i32 {
        if !state.food.is_empty() && amount == stats::unmet_need(state, me) {
            amount.max(1)
        } else {
            amount
        }
    }
}

#[derive(Debug)]
pub struct PhalanxLeader;

impl Trait for PhalanxLeader {
    fn kind(&self) -> TraitKind {
        TraitKind::PhalanxLeader
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        for ally in state.board.allies_of(me) {
            if state.is_species(ally, Species::Herbivore) {
                state.add_status(ally, StatusTag::BodyUp, 1);
            }
        }
    }

    fn on_targeted_by_attack(&mut self, state: &mut GameState, _me: CreatureId, attacker: CreatureId) {
        state.add_status(attacker, StatusTag::Bleeding, 1);
    }
}

/// Strikes any attacker that targets an allied herbivore.
#[derive(Debug)]
pub struct ProtectorsFury;

impl Trait for ProtectorsFury {
    fn kind(&self) -> TraitKind {
        TraitKind::ProtectorsFury
    }

    fn on_ally_targeted(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        ally: CreatureId,
        attacker: CreatureId,
    ) {
        if state.is_species(ally, Species::Herbivore) {
            combat::immediate_attack(state, me, attacker);
        }
    }
}

#[derive(Debug)]
pub struct QuickBite;

impl Trait for QuickBite {
    fn kind(&self) -> TraitKind {
        TraitKind::QuickBite
    }

    fn modify_herbivore_eat_amount(&self, _state: &GameState, _me: CreatureId, amount: i32) -> i32 {
        amount + 1
    }
}

/// 1 damage to anything that targets it.
#[derive(Debug)]
pub struct Retaliate;

impl Trait for Retaliate {
    fn kind(&self) -> TraitKind {
        TraitKind::Retaliate
    }

    fn on_targeted_by_attack(&mut self, state: &mut GameState, me: CreatureId, attacker: CreatureId) {
        damage::deal_damage(state, attacker, 1, Some(me));
    }
}

/// After eating, the weakest ally regenerates and this creature tires.
#[derive(Debug)]
pub struct Sacrifice;

impl Trait for Sacrifice {
    fn kind(&self) -> TraitKind {
        TraitKind::Sacrifice
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount <= 0 {
            return;
        }
        let allies = state.board.allies_of(me);
        let lowest = allies
            .iter()
            .filter_map(|a| state.creature(*a).map(|c| c.current_health()))
            .min();
        let Some(lowest) = lowest else {
            return;
        };
        let weakest: Vec<CreatureId> = allies
            .into_iter()
            .filter(|a| state.creature(*a).is_some_and(|c| c.current_health() == lowest))
            .collect();
        if let Some(&target) = state.rng.choose(&weakest) {
            state.add_status(target, StatusTag::Regen, 2);
        }
        state.add_status(me, StatusTag::Fatigued, 2);
    }
}

#[derive(Debug)]
pub struct ThickHide;

impl Trait for ThickHide {
    fn kind(&self) -> TraitKind {
        TraitKind::ThickHide
    }

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {
        if amount > 0 {
            state.add_status(me, StatusTag::Absorb, 2);
        }
    }
}

/// 1 damage back to any creature that damages it.
#[derive(Debug)]
pub struct Thorns;

impl Trait for Thorns {
    fn kind(&self) -> TraitKind {
        TraitKind::Thorns
    }

    fn on_damage_taken(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        attacker: Option<CreatureId>,
        amount: i32,
    ) {
        if let Some(attacker) = attacker.filter(|a| amount > 0 && *a != me) {
            damage::deal_damage(state, attacker, 1, Some(me));
        }
    }
}

/// Once per creature: survive lethal damage at 1 health, regenerate and
/// shake off negative statuses.
#[derive(Debug, Default)]
pub struct UndyingSpirit {
    used: bool,
}

impl Trait for UndyingSpirit {
    fn kind(&self) -> TraitKind {
        TraitKind::UndyingSpirit
    }

    fn try_prevent_death(&mut self, state: &mut GameState, me: CreatureId) -> bool {
        if self.used {
            return false;
        }
        let Some(c) = state.creature_mut(me) else {
            return false;
        };
        self.used = true;
        c.set_health(1);
        state.add_status(me, StatusTag::Regen, 2);
        state.cleanse(me);
        true
    }
}
