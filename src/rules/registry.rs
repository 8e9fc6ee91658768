//! Card registry and play intents.
//!
//! The `CardRegistry` stores every playable card of a match, creature cards
//! and effect cards alike, and resolves a player's [`PlayIntent`] against
//! the rules in [`super::play`].

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{CreatureTemplate, Species};
use crate::core::{CreatureId, GameState, PlayError, PlayerId, SlotId};
use crate::effects::{EffectCard, GlobalEffectKind, TargetCount, TargetRule, TargetSide};
use crate::traits::TraitKind;

use super::era::Era;
use super::play;

/// Registry-assigned card id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// A playable card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Creature(CreatureTemplate),
    Effect(EffectCard),
}

impl Card {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Creature(t) => &t.name,
            Card::Effect(e) => &e.name,
        }
    }

    /// Momentum spent to play it.
    #[must_use]
    pub fn cost(&self) -> i32 {
        match self {
            Card::Creature(t) => t.cost(),
            Card::Effect(e) => e.cost,
        }
    }
}

/// What a player asks to do with one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayIntent {
    Creature { card: CardId, slot: SlotId },
    Effect { card: CardId, targets: Vec<CreatureId> },
}

/// Registry of the cards in a match.
///
/// ## Example
///
/// ```
/// use primal_arena::board::{CreatureTemplate, Species};
/// use primal_arena::rules::{Card, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(Card::Creature(CreatureTemplate::new(
///     "Grazer",
///     Species::Herbivore,
///     2,
///     1,
///     4,
/// )));
///
/// assert_eq!(registry.get(id).map(|c| c.name()), Some("Grazer"));
/// assert_eq!(registry.find_by_name("Grazer"), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    names: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card under a fresh id. A later card with the same name
    /// shadows the earlier one in name lookups.
    pub fn register(&mut self, card: Card) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        self.names.insert(card.name().to_owned(), id);
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardId> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        let mut ids: Vec<CardId> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.cards.get(&id).map(|c| (id, c)))
    }

    /// Cards matching a predicate, in id order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = (CardId, &Card)>
    where
        F: Fn(&Card) -> bool,
    {
        self.iter().filter(move |(_, c)| predicate(c))
    }

    /// Validate and apply an intent.
    ///
    /// Returns the creatures an effect was applied to (empty for creature cards).
    pub fn play(
        &self,
        state: &mut GameState,
        player: PlayerId,
        intent: &PlayIntent,
    ) -> Result<Vec<CreatureId>, PlayError> {
        match intent {
            PlayIntent::Creature { card, slot } => match self.get(*card) {
                Some(Card::Creature(t)) => play::play_creature(state, player, t, *slot).map(|()| Vec::new()),
                _ => Err(PlayError::UnknownCard),
            },
            PlayIntent::Effect { card, targets } => match self.get(*card) {
                Some(Card::Effect(e)) => play::play_effect(state, player, e, targets),
                _ => Err(PlayError::UnknownCard),
            },
        }
    }

    /// Non-mutating counterpart of [`CardRegistry::play`].
    pub fn can_play(&self, state: &GameState, player: PlayerId, intent: &PlayIntent) -> Result<(), PlayError> {
        match intent {
            PlayIntent::Creature { card, slot } => match self.get(*card) {
                Some(Card::Creature(t)) => play::can_play_creature(state, player, t, *slot),
                _ => Err(PlayError::UnknownCard),
            },
            PlayIntent::Effect { card, targets } => match self.get(*card) {
                Some(Card::Effect(e)) => play::can_play_effect(state, player, e, targets),
                _ => Err(PlayError::UnknownCard),
            },
        }
    }

    /// The standard card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for template in standard_creatures() {
            registry.register(Card::Creature(template));
        }
        for card in standard_effects() {
            registry.register(Card::Effect(card));
        }
        registry
    }
}

fn creature(name: &str, species: Species, body: i32, speed: i32, health: i32, tier: u8, traits: &[TraitKind]) -> CreatureTemplate {
    traits.iter().fold(
        CreatureTemplate::new(name, species, body, speed, health).with_tier(tier),
        |t, k| t.with_trait(*k),
    )
}

fn standard_creatures() -> Vec<CreatureTemplate> {
    use Species::{Avian, Carnivore, Herbivore};
    use TraitKind as T;

    vec![
        // Herbivores
        creature("Protoceratops", Herbivore, 1, 2, 3, 1, &[T::Burrow]),
        creature("Iguanodon", Herbivore, 2, 1, 4, 1, &[T::Herding]),
        creature("Parasaurolophus", Herbivore, 2, 2, 4, 1, &[T::HerdCaller]),
        creature("Stegosaurus", Herbivore, 3, 1, 5, 2, &[T::Thorns]),
        creature("Ankylosaurus", Herbivore, 3, 1, 6, 2, &[T::ArmoredCounter]),
        creature("Triceratops", Herbivore, 4, 2, 6, 3, &[T::ProtectorsFury, T::Retaliate]),
        creature("Brachiosaurus", Herbivore, 4, 1, 7, 3, &[T::LongNeck, T::ThickHide]),
        // Carnivores
        creature("Coelophysis", Carnivore, 1, 3, 3, 1, &[T::PackTactics]),
        creature("Dilophosaurus", Carnivore, 2, 2, 4, 1, &[T::ToxicBite]),
        creature("Velociraptor", Carnivore, 2, 4, 3, 2, &[T::Pack, T::Clever]),
        creature("Allosaurus", Carnivore, 3, 2, 5, 2, &[T::Ambush]),
        creature("Tyrannosaurus", Carnivore, 5, 2, 8, 3, &[T::ApexPredator, T::Bloodthirsty]),
        // Avians
        creature("Archaeopteryx", Avian, 1, 3, 2, 1, &[T::Scavenge]),
        creature("Dimorphodon", Avian, 1, 4, 2, 1, &[T::DisruptingPeck]),
        creature("Pteranodon", Avian, 2, 4, 3, 2, &[T::Swoop]),
        creature("Quetzalcoatlus", Avian, 3, 4, 5, 3, &[T::AerialPredator, T::SkyHunter]),
    ]
}

fn standard_effects() -> Vec<EffectCard> {
    use TargetCount::{AllValid, One, UpTo};
    use TargetSide::{Ally, Enemy};

    let ally = TargetRule::new(Ally, One);
    let enemy = TargetRule::new(Enemy, One);

    vec![
        EffectCard::new("Apex Ascension", 3)
            .with_min_era(Era::Cretaceous)
            .with_target(ally)
            .with_attachment(TraitKind::ApexAscension, 1),
        EffectCard::new("Cleansing Rain", 1)
            .with_target(TargetRule::new(Ally, AllValid))
            .with_attachment(TraitKind::CleansingRain, 1),
        EffectCard::new("Evolutionary Leap", 2)
            .with_min_era(Era::Jurassic)
            .with_target(ally)
            .with_attachment(TraitKind::EvolutionaryLeap, 1),
        EffectCard::new("Feral Rage", 1)
            .with_target(ally.species(Species::Carnivore))
            .with_attachment(TraitKind::FeralRage, 1),
        EffectCard::new("Genetic Mutation", 2)
            .with_min_era(Era::Jurassic)
            .with_target(ally)
            .with_attachment(TraitKind::GeneticMutation, 1),
        EffectCard::new("Mass Fortification", 3)
            .with_min_era(Era::Cretaceous)
            .with_target(TargetRule::new(Ally, AllValid))
            .with_attachment(TraitKind::MassFortification, 1),
        EffectCard::new("Pack Bond", 2)
            .with_target(TargetRule::new(Ally, UpTo(2)).species(Species::Carnivore))
            .with_attachment(TraitKind::PackBond, 1),
        EffectCard::new("Parasitic Infection", 2)
            .with_target(enemy)
            .with_attachment(TraitKind::ParasiticInfection, 1),
        EffectCard::new("Provoke", 1)
            .with_target(ally)
            .with_attachment(TraitKind::Provoke, 1),
        EffectCard::new("Rabies", 2)
            .with_target(enemy)
            .with_attachment(TraitKind::Rabies, 1),
        EffectCard::new("Reflective Scales", 2)
            .with_target(ally)
            .with_attachment(TraitKind::ReflectiveScales, 1),
        EffectCard::new("Regression", 2)
            .with_min_era(Era::Jurassic)
            .with_target(enemy)
            .with_attachment(TraitKind::Regression, 1),
        EffectCard::new("Reinforced Carapace", 1)
            .with_target(ally.species(Species::Herbivore))
            .with_attachment(TraitKind::ReinforcedCarapace, 1),
        EffectCard::new("Survival Instinct", 2)
            .with_target(ally)
            .with_attachment(TraitKind::SurvivalInstinct, 1),
        EffectCard::new("Territorial Display", 1)
            .with_target(TargetRule::new(Enemy, UpTo(2)))
            .with_attachment(TraitKind::TerritorialDisplay, 1),
        EffectCard::new("Adaptive Camouflage", 2)
            .with_target(ally.species(Species::Herbivore))
            .with_attachment(TraitKind::AdaptiveCamouflage, 1),
        EffectCard::new("Primal Instinct", 2)
            .with_target(ally)
            .with_attachment(TraitKind::PrimalInstinct, 1),
        EffectCard::new("Titan's Might", 3)
            .with_min_era(Era::Cretaceous)
            .with_target(ally)
            .with_attachment(TraitKind::TitansMight, 1),
        EffectCard::new("Carapace Plating", 1)
            .with_target(ally)
            .with_attachment(TraitKind::LingeringCarapace, 2),
        EffectCard::new("Parasite", 2)
            .with_target(enemy)
            .with_attachment(TraitKind::LingeringParasite, 2),
        EffectCard::new("Frenzy", 2)
            .with_target(ally.species(Species::Carnivore))
            .with_attachment(TraitKind::LingeringRage, 1),
        EffectCard::new("Nutrient Surge", 1)
            .clear_weather_only()
            .with_global(GlobalEffectKind::NutrientSurge, 1),
        EffectCard::new("Environmental Toxin", 2)
            .with_min_era(Era::Jurassic)
            .with_global(GlobalEffectKind::EnvironmentalToxin, 2),
        EffectCard::new("Solar Recovery", 2)
            .clear_weather_only()
            .with_global(GlobalEffectKind::SolarRecovery, 1),
        EffectCard::new("Sudden Death", 4)
            .with_min_era(Era::Cretaceous)
            .with_global(GlobalEffectKind::SuddenDeath, 1),
        EffectCard::new("Extinction Event", 5)
            .with_min_era(Era::Extinction)
            .with_global(GlobalEffectKind::ExtinctionEvent, 1),
    ]
}
