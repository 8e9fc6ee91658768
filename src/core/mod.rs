//! Core engine types: ids, players, RNG, configuration, errors and the
//! match state every resolver works on.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{MatchConfig, WeatherWeights};
pub use entity::{CreatureId, IdAllocator, SlotId};
pub use error::{ConfigError, PlayError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{BoardSnapshot, CreatureSnapshot, GameState};
