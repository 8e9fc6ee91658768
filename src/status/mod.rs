//! Status effects: the tag set, per-creature stacks, and tick rules.

pub mod store;
pub mod tag;
pub mod tick;

pub use store::{AddOutcome, StatusEffectStore};
pub use tag::StatusTag;
pub use tick::{round_end_tick, round_start_tick};
