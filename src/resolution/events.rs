//! Step events and round reports.
//!
//! Everything the engine does that a viewer might want to show is appended
//! to `GameState::events` as a [`StepEvent`]. The log is write-only for the
//! engine: no rule ever reads it back.

use serde::{Deserialize, Serialize};

use crate::core::{CreatureId, PlayerId, PlayerMap, SlotId};
use crate::effects::{GlobalEffectKind, Weather};
use crate::rules::Era;
use crate::status::StatusTag;
use crate::traits::TraitKind;

/// Resolution phases in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    RevealPendings,
    RoundStart,
    PreHerbivoreSteal,
    HerbivoreFeeding,
    AttackResolution,
    AvianForaging,
    StarvationAndScoring,
    RoundEnd,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::RevealPendings,
        Phase::RoundStart,
        Phase::PreHerbivoreSteal,
        Phase::HerbivoreFeeding,
        Phase::AttackResolution,
        Phase::AvianForaging,
        Phase::StarvationAndScoring,
        Phase::RoundEnd,
    ];
}

/// One observable step of resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    RoundPrepared { round: u32, era: Era, food: i32 },
    EraChanged { era: Era },
    WeatherChanged { weather: Weather },
    FoodChanged { delta: i32, total: i32 },
    PhaseStarted { phase: Phase },

    CreatureRevealed { creature: CreatureId, slot: SlotId },
    CardPlayed { player: PlayerId, card: String },

    StatusAdded { creature: CreatureId, tag: StatusTag, total: u32 },
    StatusBlocked { creature: CreatureId, tag: StatusTag },
    StatusRemoved { creature: CreatureId, tag: StatusTag, remaining: u32 },
    TraitAttached { creature: CreatureId, kind: TraitKind, rounds: Option<u32> },
    TraitDetached { creature: CreatureId, kind: TraitKind },
    GlobalEffectStarted { kind: GlobalEffectKind, rounds: u32 },
    GlobalEffectExpired { kind: GlobalEffectKind },

    Ate { creature: CreatureId, amount: i32 },
    Stole { creature: CreatureId, amount: i32 },

    Attacked { attacker: CreatureId, target: CreatureId },
    AttackNegated { attacker: CreatureId, target: CreatureId },
    NoTarget { attacker: CreatureId },
    Damaged { target: CreatureId, source: Option<CreatureId>, amount: i32 },
    DamageShielded { target: CreatureId, source: Option<CreatureId> },
    DamageReflected { from: CreatureId, to: CreatureId },
    DamageAbsorbed { target: CreatureId, amount: i32 },
    Healed { creature: CreatureId, amount: i32 },
    DeathPrevented { creature: CreatureId },
    Died { creature: CreatureId, killer: Option<CreatureId> },
    Removed { creature: CreatureId },

    Starving { creature: CreatureId, stacks: u32 },
    Scored { player: PlayerId, points: i64 },
}

/// Outcome of one call to `RoundScheduler::resolve_round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub weather: Weather,
    /// Events emitted during this round, in order.
    pub events: Vec<StepEvent>,
    /// Points gained by each player this round.
    pub score_delta: PlayerMap<i64>,
    /// Creatures that died this round.
    pub deaths: Vec<CreatureId>,
    pub food_remaining: i32,
}

impl RoundReport {
    /// Events of one kind, for tests and viewers.
    pub fn events_matching<'a>(
        &'a self,
        pred: impl Fn(&StepEvent) -> bool + 'a,
    ) -> impl Iterator<Item = &'a StepEvent> + 'a {
        self.events.iter().filter(move |e| pred(e))
    }

    #[must_use]
    pub fn died(&self, creature: CreatureId) -> bool {
        self.deaths.contains(&creature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert_eq!(Phase::ALL[0], Phase::RevealPendings);
        assert_eq!(Phase::ALL[7], Phase::RoundEnd);
    }

    #[test]
    fn test_event_json() {
        let event = StepEvent::Damaged {
            target: CreatureId(2),
            source: Some(CreatureId(1)),
            amount: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: StepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
