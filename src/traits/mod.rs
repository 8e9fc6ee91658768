//! Creature abilities and the hooks they plug into.
//!
//! ## Trait
//!
//! A [`Trait`] is an ability object owned by one creature. The engine calls
//! its hooks at fixed points of round resolution. Every hook has a no-op
//! default, so an ability only overrides the hooks it cares about.
//!
//! Hooks come in a few families with a fixed combination rule (see
//! [`hooks`]):
//!
//! - stat bonuses are summed
//! - eligibility grants are OR-ed, vetoes are AND-ed
//! - damage and eat amounts are folded in list order
//! - reactions get `&mut GameState` and return nothing
//!
//! ## TraitList
//!
//! Each creature keeps its traits in an ordered [`TraitList`]. Entries are
//! `Rc<RefCell<dyn Trait>>` cells. Dispatch always iterates a snapshot of the
//! cells, so a hook may detach traits (its own included) while the engine is
//! iterating. A cell that is already borrowed is skipped: a trait never
//! re-enters itself through a chain of reactions.
//!
//! ## TraitKind
//!
//! The closed catalog of abilities. Card data refers to abilities by kind;
//! [`TraitKind::instantiate`] builds a fresh instance for each creature.

pub mod avian;
pub mod carnivore;
pub mod effect;
pub mod herbivore;
pub mod hooks;
pub mod oneshot;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CreatureId, GameState};

/// Result of attaching an effect trait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Stay attached until the lifetime runs out.
    Keep,
    /// Detach immediately; the trait did all its work on application.
    Consume,
}

/// An ability hooked into round resolution.
///
/// `me` is always the creature that owns the trait.
#[allow(unused_variables)]
pub trait Trait: fmt::Debug {
    fn kind(&self) -> TraitKind;

    // === Stat bonuses (summed) ===

    fn speed_bonus(&self, state: &GameState, me: CreatureId) -> i32 {
        0
    }

    /// Extra body counted only when this creature picks attack targets.
    fn predator_body_bonus(&self, state: &GameState, me: CreatureId) -> i32 {
        0
    }

    // === Eligibility grants (any true wins) ===

    fn can_target_equal_body(&self, state: &GameState, me: CreatureId, target: CreatureId) -> bool {
        false
    }

    fn can_target_any(&self, state: &GameState, me: CreatureId) -> bool {
        false
    }

    fn ignore_avian_speed_requirement(
        &self,
        state: &GameState,
        me: CreatureId,
        target: CreatureId,
    ) -> bool {
        false
    }

    /// Lets a herbivore take an attack turn.
    fn grants_attack(&self, state: &GameState, me: CreatureId) -> bool {
        false
    }

    // === Vetoes (any false wins) ===

    fn can_target(&self, state: &GameState, me: CreatureId, target: CreatureId) -> bool {
        true
    }

    fn can_attack(&self, state: &GameState, me: CreatureId) -> bool {
        true
    }

    fn can_forage(&self, state: &GameState, me: CreatureId) -> bool {
        true
    }

    /// Cancel an incoming attack. Any trait returning true negates it.
    fn try_negate_attack(&mut self, state: &GameState, me: CreatureId, attacker: CreatureId) -> bool {
        false
    }

    // === Damage ===

    /// Fixed final damage. The first claim wins and skips both modify chains.
    fn try_override_final_damage(
        &self,
        state: &GameState,
        me: CreatureId,
        target: CreatureId,
    ) -> Option<i32> {
        None
    }

    fn modify_outgoing_damage(
        &mut self,
        state: &GameState,
        me: CreatureId,
        target: CreatureId,
        damage: i32,
    ) -> i32 {
        damage
    }

    fn modify_incoming_damage(
        &mut self,
        state: &GameState,
        me: CreatureId,
        attacker: CreatureId,
        damage: i32,
    ) -> i32 {
        damage
    }

    /// Damage just brought this creature to 0 health. Returning true keeps it
    /// alive; the trait is responsible for restoring health.
    fn try_prevent_death(&mut self, state: &mut GameState, me: CreatureId) -> bool {
        false
    }

    // === Feeding amounts ===

    fn modify_herbivore_eat_amount(&self, state: &GameState, me: CreatureId, amount: i32) -> i32 {
        amount
    }

    /// Food taken from the pile before herbivores eat (summed).
    fn pre_herbivore_pile_steal(&self, state: &GameState, me: CreatureId) -> i32 {
        0
    }

    // === Target redirect ===

    /// Replace the nearest pick. Only answers present in `candidates` count.
    fn choose_attack_target(
        &self,
        state: &GameState,
        me: CreatureId,
        picked: CreatureId,
        candidates: &[CreatureId],
    ) -> Option<CreatureId> {
        None
    }

    // === Reactions ===

    /// Called once when an effect trait is attached.
    fn on_apply(&mut self, state: &mut GameState, me: CreatureId) -> ApplyOutcome {
        ApplyOutcome::Keep
    }

    fn on_round_start(&mut self, state: &mut GameState, me: CreatureId) {}

    fn on_round_end(&mut self, state: &mut GameState, me: CreatureId) {}

    fn on_after_eat(&mut self, state: &mut GameState, me: CreatureId, amount: i32) {}

    fn on_after_kill(&mut self, state: &mut GameState, me: CreatureId, victim: CreatureId) {}

    fn on_any_death(&mut self, state: &mut GameState, me: CreatureId, victim: CreatureId) {}

    fn on_damage_dealt(&mut self, state: &mut GameState, me: CreatureId, target: CreatureId, amount: i32) {}

    fn on_damage_taken(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        attacker: Option<CreatureId>,
        amount: i32,
    ) {
    }

    /// Some other creature took damage.
    fn on_any_damage(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        victim: CreatureId,
        source: Option<CreatureId>,
        amount: i32,
    ) {
    }

    fn on_targeted_by_attack(&mut self, state: &mut GameState, me: CreatureId, attacker: CreatureId) {}

    fn on_ally_targeted(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        ally: CreatureId,
        attacker: CreatureId,
    ) {
    }

    fn on_after_attack_resolved(
        &mut self,
        state: &mut GameState,
        me: CreatureId,
        target: CreatureId,
        negated: bool,
    ) {
    }

    fn on_foraging(&mut self, state: &mut GameState, me: CreatureId) {}

    /// Spent traits are detached after the current dispatch.
    fn is_spent(&self) -> bool {
        false
    }
}

/// Shared handle to one trait instance.
pub type TraitCell = Rc<RefCell<dyn Trait>>;

/// Cells captured at the start of a dispatch.
pub type TraitSnapshot = SmallVec<[TraitCell; 4]>;

#[derive(Debug)]
struct TraitEntry {
    instance: u32,
    kind: TraitKind,
    remaining_rounds: Option<u32>,
    cell: TraitCell,
}

/// Ordered abilities of one creature.
///
/// Base traits have no lifetime. Effect traits carry a remaining-rounds
/// counter that [`TraitList::tick_lifetimes`] decrements at round end.
#[derive(Debug, Default)]
pub struct TraitList {
    entries: Vec<TraitEntry>,
    next_instance: u32,
}

impl TraitList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kinds in list order.
    #[must_use]
    pub fn kinds(&self) -> Vec<TraitKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    #[must_use]
    pub fn contains(&self, kind: TraitKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Remaining lifetime of the first instance of `kind`.
    #[must_use]
    pub fn remaining_rounds(&self, kind: TraitKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .and_then(|e| e.remaining_rounds)
    }

    /// Append a fresh instance. Returns its instance number.
    pub fn attach(&mut self, kind: TraitKind, remaining_rounds: Option<u32>) -> u32 {
        let instance = self.next_instance;
        self.next_instance += 1;
        self.entries.push(TraitEntry {
            instance,
            kind,
            remaining_rounds,
            cell: kind.instantiate(),
        });
        instance
    }

    /// Append a prebuilt cell.
    #[cfg(test)]
    pub(crate) fn attach_cell(&mut self, kind: TraitKind, cell: TraitCell) -> u32 {
        let instance = self.next_instance;
        self.next_instance += 1;
        self.entries.push(TraitEntry {
            instance,
            kind,
            remaining_rounds: None,
            cell,
        });
        instance
    }

    /// Handle of an attached instance.
    #[must_use]
    pub fn cell(&self, instance: u32) -> Option<TraitCell> {
        self.entries
            .iter()
            .find(|e| e.instance == instance)
            .map(|e| Rc::clone(&e.cell))
    }

    /// Remove one instance. Returns false if it was not attached.
    pub fn detach(&mut self, instance: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.instance != instance);
        self.entries.len() != before
    }

    /// Remove every instance of `kind`. Returns how many were removed.
    pub fn detach_kind(&mut self, kind: TraitKind) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        before - self.entries.len()
    }

    /// Capture the current cells for iteration.
    #[must_use]
    pub fn snapshot(&self) -> TraitSnapshot {
        self.entries.iter().map(|e| Rc::clone(&e.cell)).collect()
    }

    /// Count down effect-trait lifetimes and drop the expired ones.
    pub fn tick_lifetimes(&mut self) -> Vec<TraitKind> {
        let mut expired = Vec::new();
        self.entries.retain_mut(|e| match e.remaining_rounds.as_mut() {
            Some(rounds) => {
                *rounds = rounds.saturating_sub(1);
                if *rounds == 0 {
                    expired.push(e.kind);
                    false
                } else {
                    true
                }
            }
            None => true,
        });
        expired
    }

    /// Drop traits that report themselves spent.
    pub fn prune_spent(&mut self) -> Vec<TraitKind> {
        let mut spent = Vec::new();
        self.entries.retain(|e| {
            let done = e.cell.try_borrow().map(|t| t.is_spent()).unwrap_or(false);
            if done {
                spent.push(e.kind);
            }
            !done
        });
        spent
    }
}

/// Every ability in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    // Herbivore
    AdaptiveArmor,
    ArmoredCounter,
    Burrow,
    ExtendedReach,
    Generous,
    Guardian,
    HerdCaller,
    Herding,
    Immovable,
    LongNeck,
    PhalanxLeader,
    ProtectorsFury,
    QuickBite,
    Retaliate,
    Sacrifice,
    ThickHide,
    Thorns,
    UndyingSpirit,

    // Carnivore
    Ambush,
    ApexPredator,
    BleedMaster,
    BloodRush,
    Bloodthirsty,
    CamouflageHunter,
    Clever,
    Demoralize,
    GiantSlayer,
    Intimidate,
    Opportunist,
    Pack,
    PackLeader,
    PackTactics,
    PlagueCarrier,
    PredatoryInstinct,
    PredatoryRenewal,
    Pursuit,
    RecklessCharge,
    Relentless,
    ToxicBite,

    // Avian
    AerialPredator,
    ConfusionStrike,
    DisruptingPeck,
    Evasive,
    GhostStrike,
    PrecisionStrike,
    RallyingCall,
    Scavenge,
    ScavengerGrowth,
    SkyHunter,
    Swoop,
    Windfall,

    // Lasting effects attached by cards
    AdaptiveCamouflage,
    LingeringCarapace,
    LingeringParasite,
    LingeringRage,
    NutrientSurgeBuff,
    PrimalInstinct,
    TitansMight,

    // One-shot effects: act in `on_apply`, then detach
    ApexAscension,
    CleansingRain,
    EvolutionaryLeap,
    FeralRage,
    GeneticMutation,
    MassFortification,
    PackBond,
    ParasiticInfection,
    Provoke,
    Rabies,
    ReflectiveScales,
    Regression,
    ReinforcedCarapace,
    SurvivalInstinct,
    TerritorialDisplay,
}

impl TraitKind {
    /// Build a fresh instance.
    #[must_use]
    pub fn instantiate(self) -> TraitCell {
        use self::avian as a;
        use self::carnivore as c;
        use self::effect as e;
        use self::herbivore as h;
        use self::oneshot as o;

        match self {
            TraitKind::AdaptiveArmor => Rc::new(RefCell::new(h::AdaptiveArmor)),
            TraitKind::ArmoredCounter => Rc::new(RefCell::new(h::ArmoredCounter)),
            TraitKind::Burrow => Rc::new(RefCell::new(h::Burrow::default())),
            TraitKind::ExtendedReach => Rc::new(RefCell::new(h::ExtendedReach)),
            TraitKind::Generous => Rc::new(RefCell::new(h::Generous)),
            TraitKind::Guardian => Rc::new(RefCell::new(h::Guardian)),
            TraitKind::HerdCaller => Rc::new(RefCell::new(h::HerdCaller)),
            TraitKind::Herding => Rc::new(RefCell::new(h::Herding)),
            TraitKind::Immovable => Rc::new(RefCell::new(h::Immovable)),
            TraitKind::LongNeck => Rc::new(RefCell::new(h::LongNeck)),
            TraitKind::PhalanxLeader => Rc::new(RefCell::new(h::PhalanxLeader)),
            TraitKind::ProtectorsFury => Rc::new(RefCell::new(h::ProtectorsFury)),
            TraitKind::QuickBite => Rc::new(RefCell::new(h::QuickBite)),
            TraitKind::Retaliate => Rc::new(RefCell::new(h::Retaliate)),
            TraitKind::Sacrifice => Rc::new(RefCell::new(h::Sacrifice)),
            TraitKind::ThickHide => Rc::new(RefCell::new(h::ThickHide)),
            TraitKind::Thorns => Rc::new(RefCell::new(h::Thorns)),
            TraitKind::UndyingSpirit => Rc::new(RefCell::new(h::UndyingSpirit::default())),

            TraitKind::Ambush => Rc::new(RefCell::new(c::Ambush::default())),
            TraitKind::ApexPredator => Rc::new(RefCell::new(c::ApexPredator)),
            TraitKind::BleedMaster => Rc::new(RefCell::new(c::BleedMaster)),
            TraitKind::BloodRush => Rc::new(RefCell::new(c::BloodRush::default())),
            TraitKind::Bloodthirsty => Rc::new(RefCell::new(c::Bloodthirsty)),
            TraitKind::CamouflageHunter => Rc::new(RefCell::new(c::CamouflageHunter)),
            TraitKind::Clever => Rc::new(RefCell::new(c::PackSpeed(TraitKind::Clever))),
            TraitKind::Demoralize => Rc::new(RefCell::new(c::Demoralize)),
            TraitKind::GiantSlayer => Rc::new(RefCell::new(c::GiantSlayer)),
            TraitKind::Intimidate => Rc::new(RefCell::new(c::Intimidate)),
            TraitKind::Opportunist => Rc::new(RefCell::new(c::Opportunist)),
            TraitKind::Pack => Rc::new(RefCell::new(c::Pack)),
            TraitKind::PackLeader => Rc::new(RefCell::new(c::PackLeader)),
            TraitKind::PackTactics => Rc::new(RefCell::new(c::PackSpeed(TraitKind::PackTactics))),
            TraitKind::PlagueCarrier => Rc::new(RefCell::new(c::PlagueCarrier)),
            TraitKind::PredatoryInstinct => Rc::new(RefCell::new(c::PredatoryInstinct)),
            TraitKind::PredatoryRenewal => Rc::new(RefCell::new(c::PredatoryRenewal)),
            TraitKind::Pursuit => Rc::new(RefCell::new(c::Pursuit)),
            TraitKind::RecklessCharge => Rc::new(RefCell::new(c::RecklessCharge)),
            TraitKind::Relentless => Rc::new(RefCell::new(c::Relentless)),
            TraitKind::ToxicBite => Rc::new(RefCell::new(c::ToxicBite)),

            TraitKind::AerialPredator => Rc::new(RefCell::new(a::AerialPredator)),
            TraitKind::ConfusionStrike => Rc::new(RefCell::new(a::ConfusionStrike)),
            TraitKind::DisruptingPeck => Rc::new(RefCell::new(a::DisruptingPeck::default())),
            TraitKind::Evasive => Rc::new(RefCell::new(a::Evasive::default())),
            TraitKind::GhostStrike => Rc::new(RefCell::new(a::GhostStrike)),
            TraitKind::PrecisionStrike => Rc::new(RefCell::new(a::PrecisionStrike)),
            TraitKind::RallyingCall => Rc::new(RefCell::new(a::RallyingCall)),
            TraitKind::Scavenge => Rc::new(RefCell::new(a::Scavenge)),
            TraitKind::ScavengerGrowth => Rc::new(RefCell::new(a::ScavengerGrowth)),
            TraitKind::SkyHunter => Rc::new(RefCell::new(a::SkyHunter)),
            TraitKind::Swoop => Rc::new(RefCell::new(a::Swoop)),
            TraitKind::Windfall => Rc::new(RefCell::new(a::Windfall)),

            TraitKind::AdaptiveCamouflage => Rc::new(RefCell::new(e::AdaptiveCamouflage)),
            TraitKind::LingeringCarapace => Rc::new(RefCell::new(e::LingeringCarapace::default())),
            TraitKind::LingeringParasite => Rc::new(RefCell::new(e::LingeringParasite)),
            TraitKind::LingeringRage => Rc::new(RefCell::new(e::LingeringRage)),
            TraitKind::NutrientSurgeBuff => Rc::new(RefCell::new(e::NutrientSurgeBuff)),
            TraitKind::PrimalInstinct => Rc::new(RefCell::new(e::PrimalInstinct)),
            TraitKind::TitansMight => Rc::new(RefCell::new(e::TitansMight)),

            TraitKind::ApexAscension
            | TraitKind::CleansingRain
            | TraitKind::EvolutionaryLeap
            | TraitKind::FeralRage
            | TraitKind::GeneticMutation
            | TraitKind::MassFortification
            | TraitKind::PackBond
            | TraitKind::ParasiticInfection
            | TraitKind::Provoke
            | TraitKind::Rabies
            | TraitKind::ReflectiveScales
            | TraitKind::Regression
            | TraitKind::ReinforcedCarapace
            | TraitKind::SurvivalInstinct
            | TraitKind::TerritorialDisplay => Rc::new(RefCell::new(o::OneShot(self))),
        }
    }

    /// Display name as printed on cards.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TraitKind::AdaptiveArmor => "Adaptive Armor",
            TraitKind::ArmoredCounter => "Armored Counter",
            TraitKind::Burrow => "Burrow",
            TraitKind::ExtendedReach => "Extended Reach",
            TraitKind::Generous => "Generous",
            TraitKind::Guardian => "Guardian",
            TraitKind::HerdCaller => "Herd Caller",
            TraitKind::Herding => "Herding",
            TraitKind::Immovable => "Immovable",
            TraitKind::LongNeck => "Long Neck",
            TraitKind::PhalanxLeader => "Phalanx Leader",
            TraitKind::ProtectorsFury => "Protector's Fury",
            TraitKind::QuickBite => "Quick Bite",
            TraitKind::Retaliate => "Retaliate",
            TraitKind::Sacrifice => "Sacrifice",
            TraitKind::ThickHide => "Thick Hide",
            TraitKind::Thorns => "Thorns",
            TraitKind::UndyingSpirit => "Undying Spirit",
            TraitKind::Ambush => "Ambush",
            TraitKind::ApexPredator => "Apex Predator",
            TraitKind::BleedMaster => "Bleed Master",
            TraitKind::BloodRush => "Blood Rush",
            TraitKind::Bloodthirsty => "Bloodthirsty",
            TraitKind::CamouflageHunter => "Camouflage Hunter",
            TraitKind::Clever => "Clever",
            TraitKind::Demoralize => "Demoralize",
            TraitKind::GiantSlayer => "Giant Slayer",
            TraitKind::Intimidate => "Intimidate",
            TraitKind::Opportunist => "Opportunist",
            TraitKind::Pack => "Pack",
            TraitKind::PackLeader => "Pack Leader",
            TraitKind::PackTactics => "Pack Tactics",
            TraitKind::PlagueCarrier => "Plague Carrier",
            TraitKind::PredatoryInstinct => "Predatory Instinct",
            TraitKind::PredatoryRenewal => "Predatory Renewal",
            TraitKind::Pursuit => "Pursuit",
            TraitKind::RecklessCharge => "Reckless Charge",
            TraitKind::Relentless => "Relentless",
            TraitKind::ToxicBite => "Toxic Bite",
            TraitKind::AerialPredator => "Aerial Predator",
            TraitKind::ConfusionStrike => "Confusion Strike",
            TraitKind::DisruptingPeck => "Disrupting Peck",
            TraitKind::Evasive => "Evasive",
            TraitKind::GhostStrike => "Ghost Strike",
            TraitKind::PrecisionStrike => "Precision Strike",
            TraitKind::RallyingCall => "Rallying Call",
            TraitKind::Scavenge => "Scavenge",
            TraitKind::ScavengerGrowth => "Scavenger Growth",
            TraitKind::SkyHunter => "Sky Hunter",
            TraitKind::Swoop => "Swoop",
            TraitKind::Windfall => "Windfall",
            TraitKind::AdaptiveCamouflage => "Adaptive Camouflage",
            TraitKind::LingeringCarapace => "Carapace Plating",
            TraitKind::LingeringParasite => "Parasite",
            TraitKind::LingeringRage => "Frenzy",
            TraitKind::NutrientSurgeBuff => "Nutrient Surge",
            TraitKind::PrimalInstinct => "Primal Instinct",
            TraitKind::TitansMight => "Titan's Might",
            TraitKind::ApexAscension => "Apex Ascension",
            TraitKind::CleansingRain => "Cleansing Rain",
            TraitKind::EvolutionaryLeap => "Evolutionary Leap",
            TraitKind::FeralRage => "Feral Rage",
            TraitKind::GeneticMutation => "Genetic Mutation",
            TraitKind::MassFortification => "Mass Fortification",
            TraitKind::PackBond => "Pack Bond",
            TraitKind::ParasiticInfection => "Parasitic Infection",
            TraitKind::Provoke => "Provoke",
            TraitKind::Rabies => "Rabies",
            TraitKind::ReflectiveScales => "Reflective Scales",
            TraitKind::Regression => "Regression",
            TraitKind::ReinforcedCarapace => "Reinforced Carapace",
            TraitKind::SurvivalInstinct => "Survival Instinct",
            TraitKind::TerritorialDisplay => "Territorial Display",
        }
    }

    /// One-shot effects detach themselves as soon as they are applied.
    #[must_use]
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            TraitKind::ApexAscension
                | TraitKind::CleansingRain
                | TraitKind::EvolutionaryLeap
                | TraitKind::FeralRage
                | TraitKind::GeneticMutation
                | TraitKind::MassFortification
                | TraitKind::PackBond
                | TraitKind::ParasiticInfection
                | TraitKind::Provoke
                | TraitKind::Rabies
                | TraitKind::ReflectiveScales
                | TraitKind::Regression
                | TraitKind::ReinforcedCarapace
                | TraitKind::SurvivalInstinct
                | TraitKind::TerritorialDisplay
        )
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
