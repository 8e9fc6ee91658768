//! One-shot effects: everything happens in `on_apply`, then the trait
//! detaches itself.

use crate::core::{CreatureId, GameState};
use crate::status::StatusTag;

use super::{ApplyOutcome, Trait, TraitKind};

/// A single instantaneous card effect, keyed by kind.
#[derive(Debug)]
pub struct OneShot(pub TraitKind);

impl OneShot {
    fn grow(state: &mut GameState, me: CreatureId, health: i32, body: i32, speed: i32) {
        if let Some(c) = state.creature_mut(me) {
            c.grow_max_health(health);
            c.adjust_body(body);
            c.adjust_speed(speed);
        }
    }
}

impl Trait for OneShot {
    fn kind(&self) -> TraitKind {
        self.0
    }

    fn on_apply(&mut self, state: &mut GameState, me: CreatureId) -> ApplyOutcome {
        match self.0 {
            TraitKind::ApexAscension => {
                Self::grow(state, me, 2, 2, 2);
                state.cleanse(me);
            }
            TraitKind::CleansingRain => state.cleanse(me),
            TraitKind::EvolutionaryLeap => {
                Self::grow(state, me, 0, 0, 1);
                state.clear_status(me, StatusTag::Fatigued);
            }
            TraitKind::FeralRage => {
                state.add_status(me, StatusTag::Rage, 1);
            }
            TraitKind::GeneticMutation => Self::grow(state, me, 0, 1, 1),
            TraitKind::MassFortification | TraitKind::ReinforcedCarapace => {
                state.add_status(me, StatusTag::Shielded, 1);
            }
            TraitKind::PackBond => {
                state.add_status(me, StatusTag::BodyUp, 1);
                state.add_status(me, StatusTag::SpeedUp, 1);
            }
            TraitKind::ParasiticInfection => {
                state.add_status(me, StatusTag::Infected, 2);
            }
            TraitKind::Provoke => {
                state.add_status(me, StatusTag::Taunt, 1);
            }
            TraitKind::Rabies => {
                state.add_status(me, StatusTag::Infected, 2);
                state.add_status(me, StatusTag::NoForage, 1);
            }
            TraitKind::ReflectiveScales => {
                state.add_status(me, StatusTag::Reflect, 1);
            }
            TraitKind::Regression => {
                state.add_status(me, StatusTag::Suppressed, 2);
            }
            TraitKind::SurvivalInstinct => {
                Self::grow(state, me, 2, 0, 0);
                state.add_status(me, StatusTag::Immune, 1);
            }
            TraitKind::TerritorialDisplay => {
                state.add_status(me, StatusTag::Fatigued, 1);
            }
            _ => {}
        }
        ApplyOutcome::Consume
    }
}
