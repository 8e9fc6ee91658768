//! Match configuration.
//!
//! `MatchConfig` collects every tunable number the engine uses: board size,
//! the food refill formula, weather weights, era thresholds and momentum.
//! It can be built in code with the builder methods or parsed from TOML:
//!
//! ```
//! use primal_arena::core::MatchConfig;
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     seed = 7
//!     slots_per_player = 4
//!
//!     [weather]
//!     clear = 1
//!     drought = 0
//!     storm = 0
//!     wildfire = 0
//! "#).unwrap();
//!
//! assert_eq!(config.slots_per_player, 4);
//! assert_eq!(config.player_count, 2);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Relative weights of the weather draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherWeights {
    pub clear: u32,
    pub drought: u32,
    pub storm: u32,
    pub wildfire: u32,
}

impl Default for WeatherWeights {
    fn default() -> Self {
        Self {
            clear: 50,
            drought: 20,
            storm: 20,
            wildfire: 10,
        }
    }
}

impl WeatherWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.clear + self.drought + self.storm + self.wildfire
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of factions.
    pub player_count: usize,

    /// Board slots per faction.
    pub slots_per_player: usize,

    /// Flat food bonus added to every refill.
    pub base_food_per_player: i32,

    /// Faces of the die rolled into each refill.
    pub food_die_sides: u32,

    /// Weather draw weights.
    pub weather: WeatherWeights,

    /// Last round of each era before Extinction (Triassic, Jurassic, Cretaceous).
    pub era_last_rounds: [u32; 3],

    /// Momentum granted per round in each era (Triassic..Extinction).
    pub momentum_per_era: [i32; 4],

    /// Starvation stacks at which a creature takes lethal damage.
    pub lethal_starvation_stacks: u32,

    /// How deep trait-initiated immediate attacks may nest.
    pub max_immediate_attack_depth: u32,

    /// Seed of the match RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            slots_per_player: 3,
            base_food_per_player: 3,
            food_die_sides: 6,
            weather: WeatherWeights::default(),
            era_last_rounds: [4, 8, 12],
            momentum_per_era: [2, 3, 5, 7],
            lethal_starvation_stacks: 3,
            max_immediate_attack_depth: 2,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.slots_per_player == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.weather.total() == 0 {
            return Err(ConfigError::NoWeather);
        }
        if self.era_last_rounds.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::EraOrder(self.era_last_rounds));
        }
        Ok(())
    }

    /// Set the number of factions.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the slots per faction.
    #[must_use]
    pub fn with_slots_per_player(mut self, count: usize) -> Self {
        self.slots_per_player = count;
        self
    }

    /// Set the weather weights.
    #[must_use]
    pub fn with_weather(mut self, weights: WeatherWeights) -> Self {
        self.weather = weights;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the lethal starvation threshold.
    #[must_use]
    pub fn with_lethal_starvation(mut self, stacks: u32) -> Self {
        self.lethal_starvation_stacks = stacks;
        self
    }

    /// Food placed on the pile before dice and weather.
    #[must_use]
    pub fn base_refill(&self) -> i32 {
        (self.slots_per_player as i32 + 1) * self.player_count as i32 + self.base_food_per_player
    }
}
