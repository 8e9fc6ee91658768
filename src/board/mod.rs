//! Board state: creatures, slots and the food pile.

pub mod arena;
pub mod creature;
pub mod food;
pub mod slot;

pub use arena::Board;
pub use creature::{Creature, CreatureTemplate, RoundLedger, Species};
pub use food::FoodPile;
pub use slot::{BoardSlot, SlotContent};
