//! Weather: one value per round, drawn from configured weights.
//!
//! | Weather | Round start | Starvation | Round end |
//! |---|---|---|---|
//! | Clear | +1..2 food | | |
//! | Drought | -1..2 food | +1 damage | |
//! | Storm | -1 food, Fatigued 1 on every avian | | |
//! | Wildfire | | | 1 damage to every living creature |
//!
//! The first roll of a match keeps Clear. After that, Wildfire never
//! follows Wildfire or Storm.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Species;
use crate::core::{GameState, WeatherWeights};
use crate::resolution::{damage, StepEvent};
use crate::status::StatusTag;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Drought,
    Storm,
    Wildfire,
}

impl Weather {
    pub const ALL: [Weather; 4] = [Weather::Clear, Weather::Drought, Weather::Storm, Weather::Wildfire];

    fn weight(self, weights: &WeatherWeights) -> u32 {
        match self {
            Weather::Clear => weights.clear,
            Weather::Drought => weights.drought,
            Weather::Storm => weights.storm,
            Weather::Wildfire => weights.wildfire,
        }
    }

    /// May `next` be drawn right after `self`?
    #[must_use]
    pub fn may_precede(self, next: Weather) -> bool {
        !matches!(
            (self, next),
            (Weather::Wildfire, Weather::Wildfire) | (Weather::Storm, Weather::Wildfire)
        )
    }

    /// Extra starvation damage while this weather holds.
    #[must_use]
    pub fn starvation_bonus(self) -> i32 {
        i32::from(self == Weather::Drought)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weather::Clear => "Clear",
            Weather::Drought => "Drought",
            Weather::Storm => "Storm",
            Weather::Wildfire => "Wildfire",
        };
        f.write_str(name)
    }
}

/// Current weather and the one before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    current: Weather,
    /// `None` until the first roll.
    previous: Option<Weather>,
}

impl WeatherState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Weather {
        self.current
    }

    #[must_use]
    pub fn previous(&self) -> Option<Weather> {
        self.previous
    }

    /// Force a value, for scenarios and tests.
    pub fn set(&mut self, weather: Weather) {
        self.previous = Some(self.current);
        self.current = weather;
    }
}

/// Draw the weather for a new round and record a change.
pub fn roll(state: &mut GameState) -> Weather {
    let last = state.weather.current;
    if state.weather.previous.is_none() {
        state.weather.previous = Some(last);
        return last;
    }

    let weights = state.config.weather;
    let mut pool: Vec<Weather> = Vec::with_capacity(4);
    let mut pool_weights: Vec<u32> = Vec::with_capacity(4);
    for w in Weather::ALL {
        let weight = w.weight(&weights);
        if weight > 0 && last.may_precede(w) {
            pool.push(w);
            pool_weights.push(weight);
        }
    }

    let picked = state
        .rng
        .choose_weighted(&pool_weights)
        .and_then(|i| pool.get(i).copied())
        .unwrap_or(Weather::Clear);

    state.weather.set(picked);
    if picked != last {
        debug!(from = %last, to = %picked, "weather changed");
        state.emit(StepEvent::WeatherChanged { weather: picked });
    }
    picked
}

/// Food and fatigue changes at the start of a round.
pub fn apply_round_start(state: &mut GameState) {
    match state.weather.current {
        Weather::Clear => {
            let add = state.rng.gen_range(1..3);
            state.change_food(add);
        }
        Weather::Drought => {
            let remove = state.rng.gen_range(1..3);
            state.change_food(-remove);
        }
        Weather::Storm => {
            state.change_food(-1);
            for id in state.board.living() {
                if state.is_species(id, Species::Avian) {
                    state.add_status(id, StatusTag::Fatigued, 1);
                }
            }
        }
        Weather::Wildfire => {}
    }
}

/// Damage at the end of a round.
pub fn apply_round_end(state: &mut GameState) {
    if state.weather.current == Weather::Wildfire {
        for id in state.board.living() {
            damage::deal_damage(state, id, 1, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreatureTemplate;
    use crate::core::{MatchConfig, SlotId};

    fn state_with(weights: WeatherWeights) -> GameState {
        GameState::new(MatchConfig::new(17).with_weather(weights))
    }

    fn only(clear: u32, drought: u32, storm: u32, wildfire: u32) -> WeatherWeights {
        WeatherWeights {
            clear,
            drought,
            storm,
            wildfire,
        }
    }

    #[test]
    fn test_first_roll_stays_clear() {
        let mut s = state_with(only(0, 0, 0, 1));
        assert_eq!(roll(&mut s), Weather::Clear);
        assert_eq!(roll(&mut s), Weather::Wildfire);
    }

    #[test]
    fn test_no_wildfire_twice() {
        let mut s = state_with(only(0, 0, 0, 1));
        s.weather.set(Weather::Wildfire);
        assert_eq!(roll(&mut s), Weather::Clear);
    }

    #[test]
    fn test_no_wildfire_after_storm() {
        let mut s = state_with(only(0, 0, 1, 1));
        s.weather.set(Weather::Storm);
        for _ in 0..20 {
            let w = roll(&mut s);
            assert_eq!(w, Weather::Storm);
        }
    }

    #[test]
    fn test_storm_fatigues_avians_and_drains_food() {
        let mut s = state_with(WeatherWeights::default());
        let bird = s
            .board
            .place(SlotId(0), &CreatureTemplate::new("Raptor", Species::Avian, 1, 3, 2))
            .unwrap();
        let grazer = s
            .board
            .place(SlotId(1), &CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 3))
            .unwrap();
        s.food.set(5);
        s.weather.set(Weather::Storm);

        apply_round_start(&mut s);

        assert_eq!(s.food.count(), 4);
        assert_eq!(s.status(bird, StatusTag::Fatigued), 1);
        assert_eq!(s.status(grazer, StatusTag::Fatigued), 0);
    }

    #[test]
    fn test_clear_and_drought_food_ranges() {
        let mut s = state_with(WeatherWeights::default());
        for _ in 0..20 {
            s.food.set(10);
            s.weather.set(Weather::Clear);
            apply_round_start(&mut s);
            assert!((11..=12).contains(&s.food.count()));

            s.food.set(1);
            s.weather.set(Weather::Drought);
            apply_round_start(&mut s);
            assert_eq!(s.food.count(), 0);
        }
    }

    #[test]
    fn test_wildfire_burns_everyone() {
        let mut s = state_with(WeatherWeights::default());
        let a = s
            .board
            .place(SlotId(0), &CreatureTemplate::new("Raptor", Species::Avian, 1, 3, 1))
            .unwrap();
        let b = s
            .board
            .place(SlotId(3), &CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 3))
            .unwrap();
        s.weather.set(Weather::Wildfire);
        apply_round_end(&mut s);
        assert!(!s.is_alive(a));
        assert_eq!(s.creature(b).unwrap().current_health(), 2);
    }

    #[test]
    fn test_starvation_bonus() {
        assert_eq!(Weather::Drought.starvation_bonus(), 1);
        assert_eq!(Weather::Storm.starvation_bonus(), 0);
    }
}
