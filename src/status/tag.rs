//! The closed set of status tags and their static rules.

use serde::{Deserialize, Serialize};

/// A status that can be stacked on a creature.
///
/// | Tag | Stacks | Tick |
/// |---|---|---|
/// | Infected | yes | round start: 1 damage, then -1 |
/// | Fatigued | yes | round end: -1; lowers effective speed |
/// | DamageUp | yes | round end: cleared; adds to attack damage |
/// | Regen | yes | round end: heal by stacks, then -1 |
/// | Bleeding | yes | round end: damage by stacks, no decay |
/// | Suppressed | yes | round end: -1; disables all traits |
/// | Stunned | no | round end: -1; cannot act or forage |
/// | NoForage | no | round end: -1; cannot forage |
/// | Shielded | yes | negates one damage instance per charge |
/// | Immune | yes | blocks one negative status add per charge |
/// | Reflect | yes | redirects one damage instance per charge |
/// | Absorb | yes | soaks damage up to stacks; cleared at round end |
/// | Starvation | yes | set by scoring; lethal at the configured threshold |
/// | Taunt | no | forces enemy targeting; cleared at round end |
/// | Rage | no | doubles the next attack, then clears |
/// | Stealth | no | waives body rules on the next attack, then clears |
/// | BodyUp / SpeedUp / Malnourished | yes | stat deltas; round end: -1 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusTag {
    Infected,
    Shielded,
    Reflect,
    Fatigued,
    Starvation,
    Taunt,
    Rage,
    Stunned,
    Suppressed,
    DamageUp,
    NoForage,
    Immune,
    Regen,
    Bleeding,
    Stealth,
    Absorb,
    BodyUp,
    SpeedUp,
    Malnourished,
}

impl StatusTag {
    /// Number of tags.
    pub const COUNT: usize = 19;

    /// Every tag, in declaration order.
    pub const ALL: [StatusTag; Self::COUNT] = [
        StatusTag::Infected,
        StatusTag::Shielded,
        StatusTag::Reflect,
        StatusTag::Fatigued,
        StatusTag::Starvation,
        StatusTag::Taunt,
        StatusTag::Rage,
        StatusTag::Stunned,
        StatusTag::Suppressed,
        StatusTag::DamageUp,
        StatusTag::NoForage,
        StatusTag::Immune,
        StatusTag::Regen,
        StatusTag::Bleeding,
        StatusTag::Stealth,
        StatusTag::Absorb,
        StatusTag::BodyUp,
        StatusTag::SpeedUp,
        StatusTag::Malnourished,
    ];

    /// Position of this tag in [`StatusTag::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Boolean tags hold at most one stack.
    #[must_use]
    pub const fn stacks(self) -> bool {
        !matches!(
            self,
            StatusTag::Rage
                | StatusTag::Stunned
                | StatusTag::Taunt
                | StatusTag::Stealth
                | StatusTag::NoForage
        )
    }

    /// Harmful tags. Adding one while Immune consumes an Immune charge instead.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(
            self,
            StatusTag::Infected
                | StatusTag::Fatigued
                | StatusTag::Stunned
                | StatusTag::Suppressed
                | StatusTag::NoForage
                | StatusTag::Bleeding
        )
    }

    /// Tags removed by cleansing effects.
    #[must_use]
    pub const fn is_cleansable(self) -> bool {
        self.is_negative() || matches!(self, StatusTag::Malnourished)
    }
}

impl std::fmt::Display for StatusTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
