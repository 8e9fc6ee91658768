//! Error types.
//!
//! Invalid in-round operations are silent no-ops. Errors only come out of
//! configuration loading and player intents.

use thiserror::Error;

use super::entity::{CreatureId, SlotId};
use crate::rules::Era;

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("player count must be between 1 and 255, got {0}")]
    PlayerCount(usize),

    #[error("every player needs at least one board slot")]
    NoSlots,

    #[error("at least one weather weight must be non-zero")]
    NoWeather,

    #[error("era thresholds must be non-decreasing, got {0:?}")]
    EraOrder([u32; 3]),
}

/// A card play was rejected. No state was changed and no cost was spent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("Unknown card.")]
    UnknownCard,

    #[error("Cards can only be played during the Place phase.")]
    WrongPhase,

    #[error("Tier {tier} creatures are not available in the {era} era.")]
    TierLocked { tier: u8, era: Era },

    #[error("This card cannot be played before the {required} era.")]
    EraLocked { required: Era },

    #[error("This card can only be played in Clear weather.")]
    RequiresClearWeather,

    #[error("Not enough Momentum (need {needed}, have {available}).")]
    NotEnoughMomentum { needed: i32, available: i32 },

    #[error("{0} is not available for placement.")]
    SlotUnavailable(SlotId),

    #[error("{0} belongs to another player.")]
    SlotNotOwned(SlotId),

    #[error("{0} is not a valid target for this card.")]
    InvalidTarget(CreatureId),

    #[error("This card accepts at most {max} targets.")]
    TooManyTargets { max: usize },

    #[error("This card needs a target.")]
    MissingTarget,
}

impl PlayError {
    /// Player-facing reason string.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
