//! Round orchestration.
//!
//! ## RoundScheduler
//!
//! A round is two calls:
//!
//! 1. [`RoundScheduler::prepare_round`] advances the round counter and era,
//!    resets momentum, refills the food pile and rolls the weather. The turn
//!    phase is then `Place` and players may submit cards.
//! 2. [`RoundScheduler::resolve_round`] runs the eight phases in
//!    [`Phase::ALL`] order and returns a [`RoundReport`].
//!
//! Dying creatures are swept off the board after every phase, so the next
//! phase never sees them.

use tracing::{debug, info};

use crate::board::RoundLedger;
use crate::core::GameState;
use crate::effects::{global, weather, GlobalHook};
use crate::rules::{era_for_round, momentum_for_era, TurnPhase};
use crate::status::tick;
use crate::traits::hooks;

use super::events::{Phase, RoundReport, StepEvent};
use super::{combat, feeding, scoring, stats};

/// Drives rounds of a match.
pub struct RoundScheduler;

impl RoundScheduler {
    /// Start a new round and open it for card plays.
    pub fn prepare_round(state: &mut GameState) {
        state.round += 1;
        let era = era_for_round(&state.config, state.round);
        if era != state.era {
            info!(round = state.round, %era, "era changed");
            state.era = era;
            state.emit(StepEvent::EraChanged { era });
        }

        let momentum = momentum_for_era(&state.config, era);
        state.momentum.fill(momentum);

        let refill = state.config.base_refill() + state.rng.roll_die(state.config.food_die_sides);
        state.food.set(refill);

        weather::roll(state);
        weather::apply_round_start(state);

        state.turn_phase = TurnPhase::Place;
        let food = state.food.count();
        debug!(round = state.round, %era, food, weather = %state.weather.current(), "round prepared");
        state.emit(StepEvent::RoundPrepared {
            round: state.round,
            era,
            food,
        });
    }

    /// Run every resolution phase in order.
    pub fn resolve_round(state: &mut GameState) -> RoundReport {
        state.turn_phase = TurnPhase::Resolve;
        let mark = state.events.len();
        let scores_before = state.scores.clone();
        let graveyard_before = state.board.graveyard().len();

        for phase in Phase::ALL {
            state.phase = Some(phase);
            state.emit(StepEvent::PhaseStarted { phase });
            Self::run_phase(state, phase);
            Self::sweep(state);
        }

        state.phase = None;
        state.turn_phase = TurnPhase::End;

        let report = RoundReport {
            round: state.round,
            weather: state.weather.current(),
            events: state.events_since(mark),
            score_delta: state.scores.delta_since(&scores_before),
            deaths: state.board.graveyard()[graveyard_before..].to_vec(),
            food_remaining: state.food.count(),
        };
        info!(
            round = report.round,
            deaths = report.deaths.len(),
            food = report.food_remaining,
            "round resolved"
        );
        report
    }

    /// Prepare and resolve a round with no card plays in between.
    pub fn run_round(state: &mut GameState) -> RoundReport {
        Self::prepare_round(state);
        Self::resolve_round(state)
    }

    /// Run a single phase. Does not sweep.
    pub fn run_phase(state: &mut GameState, phase: Phase) {
        debug!(?phase, "phase");
        match phase {
            Phase::RevealPendings => {
                for (creature, slot) in state.board.reveal_pending() {
                    state.emit(StepEvent::CreatureRevealed { creature, slot });
                }
            }
            Phase::RoundStart => {
                for id in state.board.all_ids() {
                    if let Some(c) = state.creature_mut(id) {
                        c.ledger = RoundLedger::default();
                    }
                }
                for id in state.board.living() {
                    tick::round_start_tick(state, id);
                }
                let living = state.board.living();
                for id in stats::speed_order(state, living) {
                    hooks::on_round_start(state, id);
                }
                global::activate_queued(state);
                global::dispatch(state, GlobalHook::RoundStart);
            }
            Phase::PreHerbivoreSteal => {
                global::dispatch(state, GlobalHook::PreHerbivore);
                feeding::pre_herbivore_steals(state);
            }
            Phase::HerbivoreFeeding => {
                global::dispatch(state, GlobalHook::Herbivores);
                feeding::feed_herbivores(state);
            }
            Phase::AttackResolution => combat::resolve_attacks(state),
            Phase::AvianForaging => {
                global::dispatch(state, GlobalHook::Foraging);
                feeding::forage(state);
            }
            Phase::StarvationAndScoring => {
                scoring::starvation_and_scoring(state);
            }
            Phase::RoundEnd => {
                for id in state.board.living() {
                    tick::round_end_tick(state, id);
                }
                for id in state.board.living() {
                    hooks::on_round_end(state, id);
                }
                for id in state.board.living() {
                    hooks::tick_trait_lifetimes(state, id);
                }
                global::dispatch(state, GlobalHook::RoundEnd);
                global::tick(state);
                weather::apply_round_end(state);
            }
        }
    }

    fn sweep(state: &mut GameState) {
        for creature in state.board.remove_dying() {
            debug!(creature = %creature.id, name = %creature.name, "removed");
            state.emit(StepEvent::Removed { creature: creature.id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreatureTemplate, Species};
    use crate::core::{MatchConfig, PlayerId, SlotId, WeatherWeights};
    use crate::effects::{GlobalEffectKind, Weather};
    use crate::rules::Era;
    use crate::status::StatusTag;

    fn clear_only() -> WeatherWeights {
        WeatherWeights {
            clear: 1,
            drought: 0,
            storm: 0,
            wildfire: 0,
        }
    }

    fn state() -> GameState {
        GameState::new(MatchConfig::new(11).with_weather(clear_only()))
    }

    #[test]
    fn test_prepare_round() {
        let mut s = state();
        RoundScheduler::prepare_round(&mut s);
        assert_eq!(s.round, 1);
        assert_eq!(s.era, Era::Triassic);
        assert_eq!(s.turn_phase, TurnPhase::Place);
        assert_eq!(s.momentum[PlayerId::new(0)], 2);
        assert_eq!(s.weather.current(), Weather::Clear);
        // 11 base, d6, then Clear adds 1..=2
        assert!((13..=19).contains(&s.food.count()));
    }

    #[test]
    fn test_refill_does_not_carry_over() {
        let mut s = state();
        s.food.set(500);
        RoundScheduler::prepare_round(&mut s);
        assert!(s.food.count() < 20);
    }

    #[test]
    fn test_era_advances() {
        let mut s = state();
        s.round = 4;
        RoundScheduler::prepare_round(&mut s);
        assert_eq!(s.era, Era::Jurassic);
        assert_eq!(s.momentum[PlayerId::new(1)], 3);
        assert!(s.events.iter().any(|e| *e == StepEvent::EraChanged { era: Era::Jurassic }));
    }

    #[test]
    fn test_phases_run_in_order() {
        let mut s = state();
        let report = RoundScheduler::run_round(&mut s);
        let phases: Vec<Phase> = report
            .events
            .iter()
            .filter_map(|e| match e {
                StepEvent::PhaseStarted { phase } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert_eq!(s.turn_phase, TurnPhase::End);
        assert_eq!(s.phase, None);
    }

    #[test]
    fn test_pending_creature_is_revealed() {
        let mut s = state();
        RoundScheduler::prepare_round(&mut s);
        s.board
            .set_pending(SlotId(0), CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 4));
        let report = RoundScheduler::resolve_round(&mut s);

        let revealed = report
            .events_matching(|e| matches!(e, StepEvent::CreatureRevealed { .. }))
            .count();
        assert_eq!(revealed, 1);
        assert_eq!(s.board.living().len(), 1);
        assert_eq!(report.score_delta[PlayerId::new(0)], 2);
    }

    #[test]
    fn test_dead_creatures_are_swept() {
        let mut s = state();
        let doomed = s
            .board
            .place(SlotId(0), &CreatureTemplate::new("Hunter", Species::Carnivore, 1, 1, 1))
            .unwrap_or_else(|| panic!("slot 0 should be free"));
        s.add_status(doomed, StatusTag::Infected, 1);

        let report = RoundScheduler::run_round(&mut s);
        assert!(report.died(doomed));
        assert!(s.creature(doomed).is_none());
        assert!(s.board.slot(SlotId(0)).is_some_and(|slot| slot.is_empty()));
    }

    #[test]
    fn test_queued_global_activates_next_round() {
        let mut s = state();
        let a = s
            .board
            .place(SlotId(0), &CreatureTemplate::new("Grazer", Species::Herbivore, 1, 1, 5))
            .unwrap_or_else(|| panic!("slot 0 should be free"));
        RoundScheduler::prepare_round(&mut s);
        s.globals.queue(GlobalEffectKind::EnvironmentalToxin, 1);
        RoundScheduler::resolve_round(&mut s);

        assert_eq!(s.creature(a).map(|c| c.current_health()), Some(4));
        assert!(!s.globals.is_active(GlobalEffectKind::EnvironmentalToxin));
    }
}
