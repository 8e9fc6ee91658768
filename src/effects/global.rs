//! Board-wide timed effects.
//!
//! A global effect card is queued when played and becomes active at the start
//! of the next resolved round: its `on_play` runs, then it answers the
//! phase-boundary hooks until its lifetime runs out at round end. Effects that
//! do all their work in `on_play` consume themselves immediately.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::GameState;
use crate::resolution::{damage, StepEvent};
use crate::status::StatusTag;
use crate::traits::ApplyOutcome;

use super::weather::Weather;

/// A board-wide modifier.
#[allow(unused_variables)]
pub trait GlobalEffect: fmt::Debug {
    fn kind(&self) -> GlobalEffectKind;

    /// Runs once on activation.
    fn on_play(&mut self, state: &mut GameState) -> ApplyOutcome {
        ApplyOutcome::Keep
    }

    fn on_round_start(&mut self, state: &mut GameState) {}

    fn on_pre_herbivore(&mut self, state: &mut GameState) {}

    fn on_herbivores(&mut self, state: &mut GameState) {}

    fn on_foraging(&mut self, state: &mut GameState) {}

    fn on_round_end(&mut self, state: &mut GameState) {}
}

/// Phase boundaries a global effect can hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalHook {
    RoundStart,
    PreHerbivore,
    Herbivores,
    Foraging,
    RoundEnd,
}

/// Every global effect in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalEffectKind {
    EnvironmentalToxin,
    NutrientSurge,
    ExtinctionEvent,
    SolarRecovery,
    SuddenDeath,
}

impl GlobalEffectKind {
    #[must_use]
    pub fn instantiate(self) -> Rc<RefCell<dyn GlobalEffect>> {
        match self {
            GlobalEffectKind::EnvironmentalToxin => Rc::new(RefCell::new(EnvironmentalToxin)),
            GlobalEffectKind::NutrientSurge => Rc::new(RefCell::new(NutrientSurge)),
            GlobalEffectKind::ExtinctionEvent => Rc::new(RefCell::new(ExtinctionEvent)),
            GlobalEffectKind::SolarRecovery => Rc::new(RefCell::new(SolarRecovery)),
            GlobalEffectKind::SuddenDeath => Rc::new(RefCell::new(SuddenDeath)),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GlobalEffectKind::EnvironmentalToxin => "Environmental Toxin",
            GlobalEffectKind::NutrientSurge => "Nutrient Surge",
            GlobalEffectKind::ExtinctionEvent => "Extinction Event",
            GlobalEffectKind::SolarRecovery => "Solar Recovery",
            GlobalEffectKind::SuddenDeath => "Sudden Death",
        }
    }
}

impl fmt::Display for GlobalEffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 1 damage to every living creature at round start.
#[derive(Debug)]
struct EnvironmentalToxin;

impl GlobalEffect for EnvironmentalToxin {
    fn kind(&self) -> GlobalEffectKind {
        GlobalEffectKind::EnvironmentalToxin
    }

    fn on_round_start(&mut self, state: &mut GameState) {
        for id in state.board.living() {
            damage::deal_damage(state, id, 1, None);
        }
    }
}

/// +3 food.
#[derive(Debug)]
struct NutrientSurge;

impl GlobalEffect for NutrientSurge {
    fn kind(&self) -> GlobalEffectKind {
        GlobalEffectKind::NutrientSurge
    }

    fn on_play(&mut self, state: &mut GameState) -> ApplyOutcome {
        state.change_food(3);
        ApplyOutcome::Keep
    }
}

/// 3 damage to every living creature, then +3 food.
#[derive(Debug)]
struct ExtinctionEvent;

impl GlobalEffect for ExtinctionEvent {
    fn kind(&self) -> GlobalEffectKind {
        GlobalEffectKind::ExtinctionEvent
    }

    fn on_play(&mut self, state: &mut GameState) -> ApplyOutcome {
        for id in state.board.living() {
            damage::deal_damage(state, id, 3, None);
        }
        state.change_food(3);
        ApplyOutcome::Consume
    }
}

/// Regen 2 on every living creature, only under a clear sky.
#[derive(Debug)]
struct SolarRecovery;

impl GlobalEffect for SolarRecovery {
    fn kind(&self) -> GlobalEffectKind {
        GlobalEffectKind::SolarRecovery
    }

    fn on_play(&mut self, state: &mut GameState) -> ApplyOutcome {
        if state.weather.current() == Weather::Clear {
            for id in state.board.living() {
                state.add_status(id, StatusTag::Regen, 2);
            }
        }
        ApplyOutcome::Consume
    }
}

/// Kills one random living creature of each player.
#[derive(Debug)]
struct SuddenDeath;

impl GlobalEffect for SuddenDeath {
    fn kind(&self) -> GlobalEffectKind {
        GlobalEffectKind::SuddenDeath
    }

    fn on_play(&mut self, state: &mut GameState) -> ApplyOutcome {
        let players: Vec<_> = state.players().collect();
        for player in players {
            let living = state.board.living_of(player);
            if let Some(victim) = state.rng.choose(&living).copied() {
                damage::kill(state, victim, None);
            }
        }
        ApplyOutcome::Consume
    }
}

#[derive(Debug)]
struct ActiveEffect {
    kind: GlobalEffectKind,
    remaining_rounds: u32,
    cell: Rc<RefCell<dyn GlobalEffect>>,
}

/// Played-but-inactive and active global effects.
#[derive(Debug, Default)]
pub struct GlobalEffectRegistry {
    queued: Vec<(GlobalEffectKind, u32)>,
    active: Vec<ActiveEffect>,
}

impl GlobalEffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect to activate at the next round start.
    pub fn queue(&mut self, kind: GlobalEffectKind, rounds: u32) {
        self.queued.push((kind, rounds.max(1)));
    }

    #[must_use]
    pub fn queued(&self) -> Vec<GlobalEffectKind> {
        self.queued.iter().map(|(k, _)| *k).collect()
    }

    /// Active kinds in activation order.
    #[must_use]
    pub fn active(&self) -> Vec<GlobalEffectKind> {
        self.active.iter().map(|e| e.kind).collect()
    }

    #[must_use]
    pub fn is_active(&self, kind: GlobalEffectKind) -> bool {
        self.active.iter().any(|e| e.kind == kind)
    }

    #[must_use]
    pub fn remaining_rounds(&self, kind: GlobalEffectKind) -> Option<u32> {
        self.active.iter().find(|e| e.kind == kind).map(|e| e.remaining_rounds)
    }

    fn snapshot(&self) -> Vec<Rc<RefCell<dyn GlobalEffect>>> {
        self.active.iter().map(|e| Rc::clone(&e.cell)).collect()
    }
}

/// Activate one effect now and run its `on_play`.
pub fn activate(state: &mut GameState, kind: GlobalEffectKind, rounds: u32) {
    let cell = kind.instantiate();
    let rounds = rounds.max(1);
    state.globals.active.push(ActiveEffect {
        kind,
        remaining_rounds: rounds,
        cell: Rc::clone(&cell),
    });
    debug!(%kind, rounds, "global effect started");
    state.emit(StepEvent::GlobalEffectStarted { kind, rounds });

    let outcome = match cell.try_borrow_mut() {
        Ok(mut effect) => effect.on_play(state),
        Err(_) => ApplyOutcome::Keep,
    };
    if outcome == ApplyOutcome::Consume {
        state.globals.active.retain(|e| !Rc::ptr_eq(&e.cell, &cell));
        state.emit(StepEvent::GlobalEffectExpired { kind });
    }
}

/// Activate everything queued since the last round, in play order.
pub fn activate_queued(state: &mut GameState) {
    let queued = std::mem::take(&mut state.globals.queued);
    for (kind, rounds) in queued {
        activate(state, kind, rounds);
    }
}

/// Call one phase hook on every active effect.
pub fn dispatch(state: &mut GameState, hook: GlobalHook) {
    for cell in state.globals.snapshot() {
        let Ok(mut effect) = cell.try_borrow_mut() else {
            continue;
        };
        match hook {
            GlobalHook::RoundStart => effect.on_round_start(state),
            GlobalHook::PreHerbivore => effect.on_pre_herbivore(state),
            GlobalHook::Herbivores => effect.on_herbivores(state),
            GlobalHook::Foraging => effect.on_foraging(state),
            GlobalHook::RoundEnd => effect.on_round_end(state),
        }
    }
}

/// Count down lifetimes and drop expired effects.
pub fn tick(state: &mut GameState) {
    let mut expired = Vec::new();
    state.globals.active.retain_mut(|e| {
        e.remaining_rounds = e.remaining_rounds.saturating_sub(1);
        if e.remaining_rounds == 0 {
            expired.push(e.kind);
            false
        } else {
            true
        }
    });
    for kind in expired {
        state.emit(StepEvent::GlobalEffectExpired { kind });
    }
}
