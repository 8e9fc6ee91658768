//! Card-play predicates and intents.
//!
//! `can_play_*` answer with the reason a play is rejected. `play_*` run the
//! same checks first and change nothing on failure; momentum is spent only
//! once every check has passed.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::board::CreatureTemplate;
use crate::core::{CreatureId, GameState, PlayError, PlayerId, SlotId};
use crate::effects::{EffectCard, Weather};
use crate::resolution::StepEvent;
use crate::traits::hooks;

use super::era::{tier_allowed, TurnPhase};

fn check_phase(state: &GameState) -> Result<(), PlayError> {
    if state.turn_phase == TurnPhase::Place {
        Ok(())
    } else {
        Err(PlayError::WrongPhase)
    }
}

fn check_momentum(state: &GameState, player: PlayerId, cost: i32) -> Result<(), PlayError> {
    let available = state.momentum[player];
    if available < cost {
        return Err(PlayError::NotEnoughMomentum {
            needed: cost,
            available,
        });
    }
    Ok(())
}

/// Can `player` put `template` face-down into `slot` right now?
pub fn can_play_creature(
    state: &GameState,
    player: PlayerId,
    template: &CreatureTemplate,
    slot: SlotId,
) -> Result<(), PlayError> {
    check_phase(state)?;
    if !tier_allowed(state.era, template.tier) {
        return Err(PlayError::TierLocked {
            tier: template.tier,
            era: state.era,
        });
    }
    match state.board.slot(slot) {
        Some(s) if s.owner != player => return Err(PlayError::SlotNotOwned(slot)),
        Some(s) if s.is_empty() => {}
        _ => return Err(PlayError::SlotUnavailable(slot)),
    }
    check_momentum(state, player, template.cost())
}

/// Place a creature card. It is revealed when the round resolves.
pub fn play_creature(
    state: &mut GameState,
    player: PlayerId,
    template: &CreatureTemplate,
    slot: SlotId,
) -> Result<(), PlayError> {
    can_play_creature(state, player, template, slot)?;
    if !state.board.set_pending(slot, template.clone()) {
        return Err(PlayError::SlotUnavailable(slot));
    }
    state.momentum[player] -= template.cost();
    debug!(%player, card = %template.name, %slot, "creature played");
    state.emit(StepEvent::CardPlayed {
        player,
        card: template.name.clone(),
    });
    Ok(())
}

/// Can `player` play `card` on `targets` right now?
pub fn can_play_effect(
    state: &GameState,
    player: PlayerId,
    card: &EffectCard,
    targets: &[CreatureId],
) -> Result<(), PlayError> {
    check_phase(state)?;
    if state.era < card.min_era {
        return Err(PlayError::EraLocked {
            required: card.min_era,
        });
    }
    if card.requires_clear_weather && state.weather.current() != Weather::Clear {
        return Err(PlayError::RequiresClearWeather);
    }
    if card.needs_targets() {
        if targets.is_empty() {
            return Err(PlayError::MissingTarget);
        }
        let max = card.target.max_targets();
        if targets.len() > max {
            return Err(PlayError::TooManyTargets { max });
        }
        if let Some(bad) = targets.iter().find(|t| !card.target.accepts(state, player, **t)) {
            return Err(PlayError::InvalidTarget(*bad));
        }
    }
    check_momentum(state, player, card.cost)
}

/// Play an effect card: attach its traits to the targets and queue its
/// global effect. Returns the creatures it was applied to.
///
/// Cards that hit every valid creature ignore `targets`.
pub fn play_effect(
    state: &mut GameState,
    player: PlayerId,
    card: &EffectCard,
    targets: &[CreatureId],
) -> Result<Vec<CreatureId>, PlayError> {
    can_play_effect(state, player, card, targets)?;

    let affected: Vec<CreatureId> = if card.attachments.is_empty() {
        Vec::new()
    } else if card.auto_targets() {
        card.target.valid_targets(state, player)
    } else {
        let mut seen = FxHashSet::default();
        targets.iter().copied().filter(|id| seen.insert(*id)).collect()
    };

    state.momentum[player] -= card.cost;
    debug!(%player, card = %card.name, targets = affected.len(), "effect played");
    state.emit(StepEvent::CardPlayed {
        player,
        card: card.name.clone(),
    });

    for id in &affected {
        for attachment in &card.attachments {
            let rounds = (!attachment.kind.is_one_shot()).then_some(attachment.rounds.max(1));
            hooks::attach_effect_trait(state, *id, attachment.kind, rounds);
        }
    }
    if let Some((kind, rounds)) = card.global {
        state.globals.queue(kind, rounds);
    }
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Species;
    use crate::core::MatchConfig;
    use crate::effects::{GlobalEffectKind, TargetCount, TargetRule, TargetSide};
    use crate::rules::Era;
    use crate::status::StatusTag;
    use crate::traits::TraitKind;

    fn placing() -> GameState {
        let mut s = GameState::new(MatchConfig::new(2));
        s.turn_phase = TurnPhase::Place;
        s.momentum.fill(2);
        s
    }

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_creature_gating_order() {
        let mut s = placing();
        let big = CreatureTemplate::new("Titan", Species::Herbivore, 5, 1, 8).with_tier(3);

        s.turn_phase = TurnPhase::Draw;
        assert_eq!(can_play_creature(&s, p0(), &big, SlotId(0)), Err(PlayError::WrongPhase));

        s.turn_phase = TurnPhase::Place;
        assert_eq!(
            can_play_creature(&s, p0(), &big, SlotId(0)),
            Err(PlayError::TierLocked {
                tier: 3,
                era: Era::Triassic
            })
        );

        s.era = Era::Cretaceous;
        assert_eq!(
            can_play_creature(&s, p0(), &big, SlotId(0)),
            Err(PlayError::NotEnoughMomentum { needed: 3, available: 2 })
        );
    }

    #[test]
    fn test_play_creature_spends_momentum() {
        let mut s = placing();
        let t = CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 4);
        assert!(play_creature(&mut s, p0(), &t, SlotId(1)).is_ok());
        assert_eq!(s.momentum[p0()], 1);
        assert!(s.board.slot(SlotId(1)).unwrap().pending().is_some());

        assert_eq!(
            play_creature(&mut s, p0(), &t, SlotId(1)),
            Err(PlayError::SlotUnavailable(SlotId(1)))
        );
        assert_eq!(
            play_creature(&mut s, p0(), &t, SlotId(4)),
            Err(PlayError::SlotNotOwned(SlotId(4)))
        );
        assert_eq!(s.momentum[p0()], 1);
    }

    #[test]
    fn test_effect_gating() {
        let mut s = placing();
        let card = EffectCard::new("Titan's Might", 1)
            .with_min_era(Era::Jurassic)
            .with_target(TargetRule::new(TargetSide::Ally, TargetCount::One))
            .with_attachment(TraitKind::TitansMight, 1);
        assert_eq!(
            can_play_effect(&s, p0(), &card, &[]),
            Err(PlayError::EraLocked { required: Era::Jurassic })
        );

        s.era = Era::Jurassic;
        assert_eq!(can_play_effect(&s, p0(), &card, &[]), Err(PlayError::MissingTarget));

        let surge = EffectCard::new("Nutrient Surge", 1)
            .clear_weather_only()
            .with_global(GlobalEffectKind::NutrientSurge, 1);
        s.weather.set(Weather::Storm);
        assert_eq!(
            can_play_effect(&s, p0(), &surge, &[]),
            Err(PlayError::RequiresClearWeather)
        );
    }

    #[test]
    fn test_effect_targets_are_checked() {
        let mut s = placing();
        let ally = s
            .board
            .place(SlotId(0), &CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 4))
            .unwrap();
        let enemy = s
            .board
            .place(SlotId(3), &CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 4))
            .unwrap();
        let provoke = EffectCard::new("Provoke", 1)
            .with_target(TargetRule::new(TargetSide::Ally, TargetCount::One))
            .with_attachment(TraitKind::Provoke, 1);

        assert_eq!(
            play_effect(&mut s, p0(), &provoke, &[enemy]),
            Err(PlayError::InvalidTarget(enemy))
        );
        assert_eq!(
            play_effect(&mut s, p0(), &provoke, &[ally, enemy]),
            Err(PlayError::TooManyTargets { max: 1 })
        );
        assert_eq!(s.momentum[p0()], 2);

        assert_eq!(play_effect(&mut s, p0(), &provoke, &[ally]), Ok(vec![ally]));
        assert!(s.has_status(ally, StatusTag::Taunt));
        assert_eq!(s.momentum[p0()], 1);
    }

    #[test]
    fn test_mass_effect_hits_every_ally() {
        let mut s = placing();
        let t = CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 4);
        let a = s.board.place(SlotId(0), &t).unwrap();
        let b = s.board.place(SlotId(2), &t).unwrap();
        let e = s.board.place(SlotId(3), &t).unwrap();
        let card = EffectCard::new("Mass Fortification", 2)
            .with_target(TargetRule::new(TargetSide::Ally, TargetCount::AllValid))
            .with_attachment(TraitKind::MassFortification, 1);

        assert_eq!(play_effect(&mut s, p0(), &card, &[]), Ok(vec![a, b]));
        assert!(s.has_status(a, StatusTag::Shielded));
        assert!(!s.has_status(e, StatusTag::Shielded));
        assert_eq!(s.momentum[p0()], 0);
    }

    #[test]
    fn test_repeated_targets_apply_once() {
        let mut s = placing();
        let t = CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 4);
        let a = s.board.place(SlotId(0), &t).unwrap();
        let b = s.board.place(SlotId(1), &t).unwrap();
        let card = EffectCard::new("Titan's Might", 1)
            .with_target(TargetRule::new(TargetSide::Ally, TargetCount::UpTo(3)))
            .with_attachment(TraitKind::TitansMight, 1);

        assert_eq!(play_effect(&mut s, p0(), &card, &[a, b, a]), Ok(vec![a, b]));
        let attached = s
            .creature(a)
            .map_or(0, |c| c.traits.kinds().into_iter().filter(|k| *k == TraitKind::TitansMight).count());
        assert_eq!(attached, 1);
        assert_eq!(s.status(a, StatusTag::BodyUp), 2);
    }

    #[test]
    fn test_global_card_is_queued() {
        let mut s = placing();
        let card = EffectCard::new("Nutrient Surge", 1).with_global(GlobalEffectKind::NutrientSurge, 1);
        assert!(play_effect(&mut s, p0(), &card, &[]).is_ok());
        assert_eq!(s.globals.queued(), vec![GlobalEffectKind::NutrientSurge]);
        assert_eq!(s.food.count(), 0);
    }
}
