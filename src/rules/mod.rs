//! Match rules outside round resolution: eras, momentum, card gating and
//! the card registry.

pub mod era;
pub mod play;
pub mod registry;

pub use era::{era_for_round, momentum_for_era, tier_allowed, Era, TurnPhase};
pub use play::{can_play_creature, can_play_effect, play_creature, play_effect};
pub use registry::{Card, CardId, CardRegistry, PlayIntent};
