//! Board-wide modifiers and effect cards.
//!
//! - [`Weather`]: one value per round, rolled from configured weights
//! - [`GlobalEffect`]: timed modifiers that fire at phase boundaries
//! - [`EffectCard`]: card data that attaches effect traits and queues globals
//!
//! Weather and globals act on the whole board through [`crate::core::GameState`];
//! cards only describe what a play does. Playing one goes through
//! [`crate::rules::play_effect`].

pub mod cards;
pub mod global;
pub mod weather;

pub use cards::{Attachment, EffectCard, TargetCount, TargetRule, TargetSide, TargetSpecies};
pub use global::{GlobalEffect, GlobalEffectKind, GlobalEffectRegistry, GlobalHook};
pub use weather::{Weather, WeatherState};
