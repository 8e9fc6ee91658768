//! Carnivore abilities: targeting, damage and kill rewards.

use crate::board::Species;
use crate::core::{CreatureId, GameState};
use crate::resolution::{combat, damage, stats};
use crate::status::StatusTag;

use super::{Trait, TraitKind};

/// Speed +1, and the first hit each round deals +1.
#[derive(Debug, Default)]
pub struct Ambush {
    used_round: Option<u32>,
}

impl Trait for Ambush {
    fn kind(&self) -> TraitKind {
        TraitKind::Ambush
    }

    fn speed_bonus(&self, _state: &GameState, _me: CreatureId) -> i32 {
        1
    }

    fn modify_outgoing_damage(
        &mut self,
        state: &GameState,
        _me: CreatureId,
        _target: CreatureId,
        damage: i32,
    ) -> i32 {
        if self.used_round == Some(state.round) {
            return damage;
        }
        self.used_round = Some(state.round);
        damage + 1
    }
}

/// Rallies allied carnivores into a rage every round.
#[derive(Debug)]
pub struct ApexPredator;

impl Trait for ApexPredator {
    fn kind(&self) -> TraitKind {
        TraitKind::ApexPredator
    }

    fn can_target_equal_body(&self, _state: &GameState, _me: CreatureId, _target: CreatureId) -> bool {
        true
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        for ally in state.board.allies_of(me) {
            if state.is_species(ally, Species::Carnivore) {
                state.add_status(ally, StatusTag::Rage, 1);
            }
        }
    }
}

#[derive(Debug)]
pub struct BleedMaster;

impl Trait for BleedMaster {
    fn kind(&self) -> TraitKind {
        TraitKind::BleedMaster
    }

    fn on_damage_dealt(&mut self, state: &mut GameState, _me: CreatureId, target: CreatureId, amount: i32) {
        if amount > 0 {
            state.add_status(target, StatusTag::Bleeding, 1);
        }
    }
}

/// A kill grants Regen 2 now and DamageUp 1 at the start of next round.
#[derive(Debug, Default)]
pub struct BloodRush {
    pending_damage_up: u32,
}

impl Trait for BloodRush {
    fn kind(&self) -> TraitKind {
        TraitKind::BloodRush
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        if self.pending_damage_up > 0 {
            state.add_status(me, StatusTag::DamageUp, self.pending_damage_up);
            self.pending_damage_up = 0;
        }
    }

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        state.add_status(me, StatusTag::Regen, 2);
        self.pending_damage_up += 1;
    }
}

/// After a kill, attacks the next best target straight away.
#[derive(Debug)]
pub struct Bloodthirsty;

impl Trait for Bloodthirsty {
    fn kind(&self) -> TraitKind {
        TraitKind::Bloodthirsty
    }

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, victim: CreatureId) {
        if let Some(next) = combat::find_best_target(state, me).filter(|n| *n != victim) {
            combat::immediate_attack(state, me, next);
        }
    }
}

#[derive(Debug)]
pub struct CamouflageHunter;

impl Trait for CamouflageHunter {
    fn kind(&self) -> TraitKind {
        TraitKind::CamouflageHunter
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        state.add_status(me, StatusTag::Stealth, 1);
    }
}

/// Speed +1 per adjacent allied carnivore. Shared by Clever and Pack Tactics.
#[derive(Debug)]
pub struct PackSpeed(pub TraitKind);

impl Trait for PackSpeed {
    fn kind(&self) -> TraitKind {
        self.0
    }

    fn speed_bonus(&self, state: &GameState, me: CreatureId) -> i32 {
        state
            .board
            .adjacent_allies(me)
            .into_iter()
            .filter(|a| state.is_species(*a, Species::Carnivore))
            .count() as i32
    }
}

/// After a kill, the nearest enemy herbivore slows for the rest of the round.
#[derive(Debug)]
pub struct Demoralize;

impl Trait for Demoralize {
    fn kind(&self) -> TraitKind {
        TraitKind::Demoralize
    }

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        let herbivores: Vec<CreatureId> = state
            .board
            .enemies_of(me)
            .into_iter()
            .filter(|e| state.is_species(*e, Species::Herbivore))
            .collect();
        if let Some(nearest) = state.board.nearest(me, &herbivores) {
            state.adjust_round_speed(nearest, -1);
        }
    }
}

/// +1 damage against bigger targets.
#[derive(Debug)]
pub struct GiantSlayer;

impl Trait for GiantSlayer {
    fn kind(&self) -> TraitKind {
        TraitKind::GiantSlayer
    }

    fn modify_outgoing_damage(
        &mut self,
        state: &GameState,
        me: CreatureId,
        target: CreatureId,
        damage: i32,
    ) -> i32 {
        if stats::effective_body(state, target) > stats::effective_body(state, me) {
            damage + 1
        } else {
            damage
        }
    }
}

/// Tires the closest enemy at round start.
#[derive(Debug)]
pub struct Intimidate;

impl Trait for Intimidate {
    fn kind(&self) -> TraitKind {
        TraitKind::Intimidate
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {
        let enemies = state.board.enemies_of(me);
        if let Some(nearest) = state.board.nearest(me, &enemies) {
            state.add_status(nearest, StatusTag::Fatigued, 1);
        }
    }
}

/// +1 damage against targets below half health.
#[derive(Debug)]
pub struct Opportunist;

impl Trait for Opportunist {
    fn kind(&self) -> TraitKind {
        TraitKind::Opportunist
    }

    fn modify_outgoing_damage(
        &mut self,
        state: &GameState,
        _me: CreatureId,
        target: CreatureId,
        damage: i32,
    ) -> i32 {
        let wounded = state
            .creature(target)
            .is_some_and(|t| t.current_health() * 2 < t.max_health());
        if wounded {
            damage + 1
        } else {
            damage
        }
    }
}

/// Counts one body bigger when choosing prey, if it hunts with other carnivores.
#[derive(Debug)]
pub struct Pack;

impl Trait for Pack {
    fn kind(&self) -> TraitKind {
        TraitKind::Pack
    }

    fn predator_body_bonus(&self, state: &GameState, me: CreatureId) -> i32 {
        let hunting_party = state
            .board
            .allies_of(me)
            .into_iter()
            .any(|a| state.is_species(a, Species::Carnivore));
        i32::from(hunting_party)
    }
}

/// After a landed attack, allied carnivores pile onto the same target.
#[derive(Debug)]
pub struct PackLeader;

impl Trait for PackLeader {
    fn kind(&self) -> TraitKind {
        TraitKind::PackLeader
    }

    fn on_after_attack_resolved(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        target: CreatureId,
        negated: bool,
    ) {
        if negated {
            return;
        }
        for ally in state.board.allies_of(me) {
            if !state.is_alive(target) {
                break;
            }
            if state.is_species(ally, Species::Carnivore) && combat::is_valid_target(state, ally, target) {
                combat::immediate_attack(state, ally, target);
            }
        }
    }
}

#[derive(Debug)]
pub struct PlagueCarrier;

impl Trait for PlagueCarrier {
    fn kind(&self) -> TraitKind {
        TraitKind::PlagueCarrier
    }

    fn on_after_attack_resolved(
        &mut self,
        state: &mut GameState,
        _me: CreatureId,
        target: CreatureId,
        negated: bool,
    ) {
        if !negated {
            state.add_status(target, StatusTag::Infected, 1);
            state.add_status(target, StatusTag::NoForage, 1);
        }
    }
}

/// Goes for the weakest valid target, nearest first on ties.
#[derive(Debug)]
pub struct PredatoryInstinct;

impl Trait for PredatoryInstinct {
    fn kind(&self) -> TraitKind {
        TraitKind::PredatoryInstinct
    }

    fn choose_attack_target(
        &self,
        state: &GameState,
        me: CreatureId,
        _picked: CreatureId,
        candidates: &[CreatureId],
    ) -> Option<CreatureId> {
        candidates
            .iter()
            .filter_map(|c| {
                let health = state.creature(*c)?.current_health();
                let distance = state.board.distance(me, *c)?;
                let slot = state.board.slot_of(*c)?;
                Some(((health, distance, slot), *c))
            })
            .min_by_key(|(key, _)| *key)
            .map(|(_, c)| c)
    }
}

#[derive(Debug)]
pub struct PredatoryRenewal;

impl Trait for PredatoryRenewal {
    fn kind(&self) -> TraitKind {
        TraitKind::PredatoryRenewal
    }

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, _victim: CreatureId) {
        state.add_status(me, StatusTag::Regen, 1);
    }
}

/// Equal-body prey is fair game when it is at least two slower.
#[derive(Debug)]
pub struct Pursuit;

impl Trait for Pursuit {
    fn kind(&self) -> TraitKind {
        TraitKind::Pursuit
    }

    fn can_target_equal_body(&self, state: &GameState, me: CreatureId, target: CreatureId) -> bool {
        stats::effective_speed(state, me) >= stats::effective_speed(state, target) + 2
    }
}

/// Takes on equal-body prey, but every attack costs 1 health.
#[derive(Debug)]
pub struct RecklessCharge;

impl Trait for RecklessCharge {
    fn kind(&self) -> TraitKind {
        TraitKind::RecklessCharge
    }

    fn can_target_equal_body(&self, _state: &GameState, _me: CreatureId, _target: CreatureId) -> bool {
        true
    }

    fn on_after_attack_resolved(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        _target: CreatureId,
        _negated: bool,
    ) {
        damage::deal_damage(state, me, 1, None);
    }
}

#[derive(Debug)]
pub struct Relentless;

impl Trait for Relentless {
    fn kind(&self) -> TraitKind {
        TraitKind::Relentless
    }

    fn ignore_avian_speed_requirement(&self, _state: &GameState, _me: CreatureId, _target: CreatureId) -> bool {
        true
    }
}

/// Infects the target heavily and its neighbours lightly.
#[derive(Debug)]
pub struct ToxicBite;

impl Trait for ToxicBite {
    fn kind(&self) -> TraitKind {
        TraitKind::ToxicBite
    }

    fn on_damage_dealt(&mut self, state: &mut GameState, _me: CreatureId, target: CreatureId, _amount: i32) {
        let neighbours = state.board.adjacent_allies(target);
        state.add_status(target, StatusTag::Infected, 2);
        for n in neighbours {
            state.add_status(n, StatusTag::Infected, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreatureTemplate;
    use crate::core::{MatchConfig, SlotId};
    use crate::traits::hooks;

    fn carnivore(traits: &[TraitKind]) -> CreatureTemplate {
        let mut t = CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5);
        t.traits = traits.to_vec();
        t
    }

    fn grazer(health: i32) -> CreatureTemplate {
        CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, health)
    }

    fn state() -> GameState {
        GameState::new(MatchConfig::new(21))
    }

    #[test]
    fn test_ambush_bonus_once_per_round() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::Ambush])).unwrap();
        let prey = s.board.place(SlotId(3), &grazer(4)).unwrap();
        s.round = 1;

        assert_eq!(stats::effective_speed(&s, me), 3);
        assert_eq!(hooks::modify_outgoing_damage(&s, me, prey, 2), 3);
        assert_eq!(hooks::modify_outgoing_damage(&s, me, prey, 2), 2);
        s.round = 2;
        assert_eq!(hooks::modify_outgoing_damage(&s, me, prey, 2), 3);
    }

    #[test]
    fn test_pack_speed_counts_adjacent_carnivores() {
        let mut s = state();
        let me = s.board.place(SlotId(1), &carnivore(&[TraitKind::PackTactics])).unwrap();
        s.board.place(SlotId(0), &carnivore(&[])).unwrap();
        s.board.place(SlotId(2), &grazer(3)).unwrap();
        assert_eq!(hooks::speed_bonus(&s, me), 1);
    }

    #[test]
    fn test_pack_body_bonus() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::Pack])).unwrap();
        assert_eq!(stats::predator_body(&s, me), 3);
        s.board.place(SlotId(2), &carnivore(&[])).unwrap();
        assert_eq!(stats::predator_body(&s, me), 4);
    }

    #[test]
    fn test_predatory_instinct_prefers_weakest() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::PredatoryInstinct])).unwrap();
        let near = s.board.place(SlotId(3), &grazer(4)).unwrap();
        let weak = s.board.place(SlotId(5), &grazer(1)).unwrap();
        let picked = hooks::choose_attack_target(&s, me, near, &[near, weak]);
        assert_eq!(picked, Some(weak));
        assert_eq!(hooks::choose_attack_target(&s, me, near, &[near]), Some(near));
    }

    #[test]
    fn test_opportunist_and_giant_slayer() {
        let mut s = state();
        let me = s
            .board
            .place(SlotId(0), &carnivore(&[TraitKind::Opportunist, TraitKind::GiantSlayer]))
            .unwrap();
        let big = s
            .board
            .place(SlotId(3), &CreatureTemplate::new("Titan", Species::Herbivore, 5, 1, 6))
            .unwrap();
        assert_eq!(hooks::modify_outgoing_damage(&s, me, big, 1), 2);
        s.creature_mut(big).unwrap().lose_health(4);
        assert_eq!(hooks::modify_outgoing_damage(&s, me, big, 1), 3);
    }

    #[test]
    fn test_toxic_bite_spreads() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::ToxicBite])).unwrap();
        let prey = s.board.place(SlotId(3), &grazer(4)).unwrap();
        let next = s.board.place(SlotId(4), &grazer(4)).unwrap();
        hooks::on_damage_dealt(&mut s, me, prey, 1);
        assert_eq!(s.status(prey, StatusTag::Infected), 2);
        assert_eq!(s.status(next, StatusTag::Infected), 1);
    }

    #[test]
    fn test_apex_predator_enrages_allies() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::ApexPredator])).unwrap();
        let ally = s.board.place(SlotId(2), &carnivore(&[])).unwrap();
        hooks::on_round_start(&mut s, me);
        assert!(s.has_status(ally, StatusTag::Rage));
        assert!(!s.has_status(me, StatusTag::Rage));
    }

    #[test]
    fn test_blood_rush_damage_up_next_round() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::BloodRush])).unwrap();
        hooks::on_after_kill(&mut s, me, CreatureId(99));
        assert_eq!(s.status(me, StatusTag::Regen), 2);
        assert_eq!(s.status(me, StatusTag::DamageUp), 0);
        hooks::on_round_start(&mut s, me);
        assert_eq!(s.status(me, StatusTag::DamageUp), 1);
    }

    #[test]
    fn test_demoralize_slows_nearest_herbivore() {
        let mut s = state();
        let me = s.board.place(SlotId(0), &carnivore(&[TraitKind::Demoralize])).unwrap();
        let near = s.board.place(SlotId(3), &grazer(3)).unwrap();
        let far = s.board.place(SlotId(5), &grazer(3)).unwrap();
        hooks::on_after_kill(&mut s, me, CreatureId(99));
        assert_eq!(stats::effective_speed(&s, near), 0);
        assert_eq!(stats::effective_speed(&s, far), 1);
    }
}
