//! # primal-arena
//!
//! Deterministic round-resolution engine for a turn-based creature battler.
//!
//! Players place creatures (herbivores, carnivores, avians) into board slots
//! and play effect cards. Each round the engine resolves feeding, attacks,
//! foraging, starvation and scoring in a fixed phase order, driven by a
//! catalog of traits and status effects.
//!
//! ## Design Principles
//!
//! 1. **One Explicit Context**: all match state lives in [`GameState`] and is
//!    passed by reference. There are no singletons.
//!
//! 2. **Deterministic**: every random choice draws from the seeded
//!    [`GameRng`]; two matches with the same seed and the same plays produce
//!    the same event log and the same [`GameState::fingerprint`].
//!
//! 3. **Rule Failures Are Values**: card plays answer with a [`PlayError`]
//!    and mutate nothing when rejected.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, errors and `GameState`
//! - `status`: status tags, stacks and tick rules
//! - `board`: creatures, slots and the food pile
//! - `traits`: the trait hook surface and its catalog
//! - `effects`: global effects, weather and effect cards
//! - `resolution`: damage, combat, feeding, scoring and the `RoundScheduler`
//! - `rules`: eras, card gating and the card registry
//!
//! ## Example
//!
//! ```
//! use primal_arena::{GameState, MatchConfig, PlayerId, RoundScheduler, SlotId};
//! use primal_arena::rules::{CardRegistry, PlayIntent};
//!
//! let registry = CardRegistry::standard();
//! let mut state = GameState::new(MatchConfig::new(7));
//!
//! RoundScheduler::prepare_round(&mut state);
//! let card = registry.find_by_name("Iguanodon").unwrap();
//! registry
//!     .play(&mut state, PlayerId::new(0), &PlayIntent::Creature { card, slot: SlotId(0) })
//!     .unwrap();
//!
//! let report = RoundScheduler::resolve_round(&mut state);
//! assert_eq!(report.round, 1);
//! assert_eq!(state.board.living().len(), 1);
//! ```

pub mod board;
pub mod core;
pub mod effects;
pub mod resolution;
pub mod rules;
pub mod status;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, CreatureId, GameRng, GameState, MatchConfig, PlayError, PlayerId, PlayerMap, SlotId,
};

pub use crate::board::{Board, Creature, CreatureTemplate, FoodPile, Species};

pub use crate::status::{StatusEffectStore, StatusTag};

pub use crate::traits::{Trait, TraitKind, TraitList};

pub use crate::effects::{EffectCard, GlobalEffectKind, Weather};

pub use crate::resolution::{Phase, RoundReport, RoundScheduler, StepEvent};

pub use crate::rules::{Card, CardId, CardRegistry, Era, PlayIntent, TurnPhase};
