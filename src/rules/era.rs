//! Eras, turn phases and the per-era allowances.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::MatchConfig;

/// Stage of the match. Later eras unlock bigger creatures and more momentum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Era {
    #[default]
    Triassic,
    Jurassic,
    Cretaceous,
    Extinction,
}

impl Era {
    pub const ALL: [Era; 4] = [Era::Triassic, Era::Jurassic, Era::Cretaceous, Era::Extinction];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Highest creature tier playable in this era.
    #[must_use]
    pub const fn max_tier(self) -> u8 {
        match self {
            Era::Triassic => 1,
            Era::Jurassic => 2,
            Era::Cretaceous | Era::Extinction => 3,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Where the match is within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Setup,
    Draw,
    /// Cards may be played.
    Place,
    Resolve,
    End,
}

/// Era a round falls in. Round 0 (before the first round) is Triassic.
///
/// ```
/// use primal_arena::core::MatchConfig;
/// use primal_arena::rules::{era_for_round, Era};
///
/// let config = MatchConfig::default();
/// assert_eq!(era_for_round(&config, 4), Era::Triassic);
/// assert_eq!(era_for_round(&config, 5), Era::Jurassic);
/// assert_eq!(era_for_round(&config, 13), Era::Extinction);
/// ```
#[must_use]
pub fn era_for_round(config: &MatchConfig, round: u32) -> Era {
    let [triassic, jurassic, cretaceous] = config.era_last_rounds;
    if round <= triassic {
        Era::Triassic
    } else if round <= jurassic {
        Era::Jurassic
    } else if round <= cretaceous {
        Era::Cretaceous
    } else {
        Era::Extinction
    }
}

/// Momentum each player starts a round of this era with.
#[must_use]
pub fn momentum_for_era(config: &MatchConfig, era: Era) -> i32 {
    config.momentum_per_era[era.index()]
}

/// May a creature of `tier` be played in `era`? Tier 0 counts as tier 1.
#[must_use]
pub fn tier_allowed(era: Era, tier: u8) -> bool {
    tier.max(1) <= era.max_tier()
}
