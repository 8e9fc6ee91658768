//! The match context.
//!
//! ## GameState
//!
//! One explicit object holds everything round resolution reads or writes:
//! - Board (slots, creatures, graveyard) and the shared food pile
//! - Weather, active global effects, era and turn phase
//! - Scores and momentum per player
//! - The match RNG
//! - The step-event log
//!
//! Resolvers and trait hooks receive it by reference. Nothing in the crate
//! is global.
//!
//! ## BoardSnapshot
//!
//! A serializable copy of the observable state, used to compare two runs.
//! [`GameState::fingerprint`] is its bincode encoding.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::MatchConfig;
use super::entity::{CreatureId, SlotId};
use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::board::{Board, Creature, FoodPile, Species};
use crate::effects::{GlobalEffectRegistry, Weather, WeatherState};
use crate::resolution::{Phase, StepEvent};
use crate::rules::{Era, TurnPhase};
use crate::status::{AddOutcome, StatusEffectStore, StatusTag};
use crate::traits::TraitKind;

/// Complete state of a match.
#[derive(Debug)]
pub struct GameState {
    pub config: MatchConfig,
    pub board: Board,
    pub food: FoodPile,
    pub rng: GameRng,
    pub weather: WeatherState,
    pub globals: GlobalEffectRegistry,

    /// Running score per player.
    pub scores: PlayerMap<i64>,
    /// Momentum available for card plays this round.
    pub momentum: PlayerMap<i32>,

    /// Current round, starting at 1 after the first `prepare_round`.
    pub round: u32,
    pub era: Era,
    pub turn_phase: TurnPhase,
    /// Resolution phase currently executing, if any.
    pub phase: Option<Phase>,

    /// Everything that happened, in order.
    pub events: Vector<StepEvent>,

    /// Nesting level of trait-initiated immediate attacks.
    pub(crate) attack_depth: u32,
}

impl GameState {
    /// Fresh match: empty board, empty pile, round 0.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let players = config.player_count;
        Self {
            board: Board::new(players, config.slots_per_player),
            food: FoodPile::default(),
            rng: GameRng::new(config.seed),
            weather: WeatherState::default(),
            globals: GlobalEffectRegistry::new(),
            scores: PlayerMap::with_value(players, 0),
            momentum: PlayerMap::with_value(players, 0),
            round: 0,
            era: Era::Triassic,
            turn_phase: TurnPhase::Setup,
            phase: None,
            events: Vector::new(),
            attack_depth: 0,
            config,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.config.player_count)
    }

    // === Creatures ===

    #[must_use]
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.board.get(id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.board.get_mut(id)
    }

    #[must_use]
    pub fn is_alive(&self, id: CreatureId) -> bool {
        self.board.is_alive(id)
    }

    #[must_use]
    pub fn is_species(&self, id: CreatureId, species: Species) -> bool {
        self.board.get(id).is_some_and(|c| c.species == species)
    }

    #[must_use]
    pub fn owner_of(&self, id: CreatureId) -> Option<PlayerId> {
        self.board.get(id).map(|c| c.owner)
    }

    #[must_use]
    pub fn status(&self, id: CreatureId, tag: StatusTag) -> u32 {
        self.board.get(id).map_or(0, |c| c.statuses.get(tag))
    }

    #[must_use]
    pub fn has_status(&self, id: CreatureId, tag: StatusTag) -> bool {
        self.status(id, tag) > 0
    }

    /// Add status stacks to a living creature. Dead targets are ignored.
    pub fn add_status(&mut self, id: CreatureId, tag: StatusTag, stacks: u32) -> AddOutcome {
        let outcome = match self.board.get_mut(id) {
            Some(c) if c.is_alive() => c.statuses.add(tag, stacks),
            _ => return AddOutcome::Ignored,
        };
        match outcome {
            AddOutcome::Applied(total) => self.emit(StepEvent::StatusAdded {
                creature: id,
                tag,
                total,
            }),
            AddOutcome::Blocked => self.emit(StepEvent::StatusBlocked { creature: id, tag }),
            AddOutcome::Ignored => {}
        }
        outcome
    }

    /// Remove up to `amount` stacks. Returns the remaining count.
    pub fn decrement_status(&mut self, id: CreatureId, tag: StatusTag, amount: u32) -> u32 {
        let (before, after) = match self.board.get_mut(id) {
            Some(c) => (c.statuses.get(tag), c.statuses.decrement(tag, amount)),
            None => return 0,
        };
        if before != after {
            self.emit(StepEvent::StatusRemoved {
                creature: id,
                tag,
                remaining: after,
            });
        }
        after
    }

    /// Remove all stacks of `tag`. Returns how many were removed.
    pub fn clear_status(&mut self, id: CreatureId, tag: StatusTag) -> u32 {
        let removed = match self.board.get_mut(id) {
            Some(c) => c.statuses.clear(tag),
            None => return 0,
        };
        if removed > 0 {
            self.emit(StepEvent::StatusRemoved {
                creature: id,
                tag,
                remaining: 0,
            });
        }
        removed
    }

    /// Strip every cleansable status.
    pub fn cleanse(&mut self, id: CreatureId) {
        for tag in StatusTag::ALL {
            if tag.is_cleansable() {
                self.clear_status(id, tag);
            }
        }
    }

    /// Transient speed adjustment that lasts until the end of the round.
    pub fn adjust_round_speed(&mut self, id: CreatureId, delta: i32) {
        if let Some(c) = self.board.get_mut(id) {
            c.ledger.speed_mod += delta;
        }
    }

    /// Add food to a creature's eaten counter without touching the pile.
    pub fn feed(&mut self, id: CreatureId, amount: i32) {
        if let Some(c) = self.board.get_mut(id).filter(|c| c.is_alive()) {
            c.eaten += amount.max(0);
        }
    }

    /// Add (or with a negative amount, remove) pile food.
    pub fn change_food(&mut self, delta: i32) {
        let before = self.food.count();
        self.food.add(delta);
        let total = self.food.count();
        if total != before {
            self.emit(StepEvent::FoodChanged {
                delta: total - before,
                total,
            });
        }
    }

    // === Events ===

    /// Append to the event log.
    pub fn emit(&mut self, event: StepEvent) {
        trace!(?event, "step");
        self.events.push_back(event);
    }

    /// Events recorded after position `mark` of the log.
    #[must_use]
    pub fn events_since(&self, mark: usize) -> Vec<StepEvent> {
        self.events.iter().skip(mark).cloned().collect()
    }

    // === Snapshots ===

    /// Serializable view of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let creatures = self
            .board
            .all_ids()
            .into_iter()
            .filter_map(|id| {
                let c = self.board.get(id)?;
                Some(CreatureSnapshot {
                    id,
                    slot: self.board.slot_of(id)?,
                    owner: c.owner,
                    species: c.species,
                    body: c.body,
                    speed: c.speed,
                    max_health: c.max_health(),
                    health: c.current_health(),
                    eaten: c.eaten,
                    statuses: c.statuses.clone(),
                    traits: c.traits.kinds(),
                })
            })
            .collect();

        BoardSnapshot {
            round: self.round,
            era: self.era,
            weather: self.weather.current(),
            food: self.food.count(),
            scores: self.scores.clone(),
            momentum: self.momentum.clone(),
            graveyard: self.board.graveyard().to_vec(),
            creatures,
            rng: self.rng.state(),
        }
    }

    /// Bincode bytes of [`GameState::snapshot`]. Equal fingerprints mean the
    /// observable state and RNG position are identical.
    #[must_use]
    pub fn fingerprint(&self) -> Vec<u8> {
        bincode::serialize(&self.snapshot()).unwrap_or_default()
    }
}

/// Observable state of one creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub slot: SlotId,
    pub owner: PlayerId,
    pub species: Species,
    pub body: i32,
    pub speed: i32,
    pub max_health: i32,
    pub health: i32,
    pub eaten: i32,
    pub statuses: StatusEffectStore,
    pub traits: Vec<TraitKind>,
}

/// Observable state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub round: u32,
    pub era: Era,
    pub weather: Weather,
    pub food: i32,
    pub scores: PlayerMap<i64>,
    pub momentum: PlayerMap<i32>,
    pub graveyard: Vec<CreatureId>,
    pub creatures: Vec<CreatureSnapshot>,
    pub rng: GameRngState,
}
