//! Main-phase actions.
//!
//! `legal_actions` lists what a player may do right now; `apply_action`
//! validates one action and applies it. Every check runs before the first
//! mutation, so a refused action leaves the state exactly as it was.

use tracing::debug;

use crate::cards::{CardCategory, CardKind};
use crate::core::{Action, EngineError, EntityId, GameState, PlayerId};
use crate::effects::{eligible_targets, equipment, technology, EffectResolver, Target, TargetRequirement};
use crate::triggers::{check_trigger, EventSink, GameEvent, TriggerPayload};
use crate::zones::Zone;

use super::decision::{pick_target, DecisionProvider};

fn check_turn(state: &GameState, player: PlayerId) -> Result<(), EngineError> {
    if state.active == player && state.phase.is_main() {
        Ok(())
    } else {
        Err(EngineError::NotYourPhase {
            player,
            phase: state.phase,
        })
    }
}

fn can_play(state: &GameState, player: PlayerId, card: EntityId) -> bool {
    let Some(instance) = state.get_card(card) else {
        return false;
    };
    if !state.player(player).pool.can_afford(&instance.definition.cost) {
        return false;
    }
    match instance.category() {
        CardCategory::Resource => !state.player(player).resource_played,
        CardCategory::Equipment => state.creatures(player).next().is_some(),
        _ => true,
    }
}

/// Every action `player` may take now. Always ends with `EndPhase`.
#[must_use]
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    let mut actions = Vec::new();
    if check_turn(state, player).is_err() {
        actions.push(Action::EndPhase);
        return actions;
    }

    for &card in state.hand(player) {
        if can_play(state, player, card) {
            actions.push(Action::PlayCard { card });
        }
    }

    for card in state.cards_in(player, Zone::Battlefield) {
        match &card.definition.kind {
            CardKind::Equipment { attach_cost, .. } if state.player(player).pool.can_afford(attach_cost) => {
                for creature in state.creatures(player) {
                    if card.attached_to != Some(creature.entity_id) {
                        actions.push(Action::AttachEquipment {
                            equipment: card.entity_id,
                            creature: creature.entity_id,
                        });
                    }
                }
            }
            CardKind::Technology { .. } if technology::check_activation(state, player, card.entity_id).is_ok() => {
                actions.push(Action::ActivateTechnology {
                    technology: card.entity_id,
                });
            }
            _ => {}
        }
    }

    actions.push(Action::EndPhase);
    actions
}

/// Validate and apply one action for `player`, recording it in the history.
pub fn apply_action(
    state: &mut GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    player: PlayerId,
    action: Action,
) -> Result<(), EngineError> {
    check_turn(state, player)?;
    match action {
        Action::PlayCard { card } => play_card(state, decisions, events, player, card)?,
        Action::AttachEquipment { equipment, creature } => {
            equipment::validate_attach(state, player, equipment, creature)?;
            let CardKind::Equipment { attach_cost, .. } = &state.card(equipment)?.definition.kind else {
                return Err(EngineError::invariant(format!("{equipment} validated as equipment")));
            };
            let attach_cost = attach_cost.clone();
            state.pay(player, &attach_cost)?;
            equipment::attach(state, events, player, equipment, creature)?;
        }
        Action::ActivateTechnology { technology: tech } => {
            technology::activate(state, decisions, events, player, tech)?;
            let payload = TriggerPayload::TechnologyActivated {
                player,
                technology: tech,
            };
            check_trigger(state, decisions, events, &payload)?;
        }
        Action::EndPhase => {}
    }
    debug!(%player, %action, "action applied");
    state.record(player, action);
    Ok(())
}

fn play_card(
    state: &mut GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    player: PlayerId,
    card: EntityId,
) -> Result<(), EngineError> {
    state.zones().expect_in(player, card, Zone::Hand)?;
    let definition = state.card(card)?.definition.clone();
    let cost = &definition.cost;

    if !state.player(player).pool.can_afford(cost) {
        return Err(EngineError::InsufficientResources {
            player,
            cost: cost.clone(),
        });
    }

    match &definition.kind {
        CardKind::Resource { kind, amount } => {
            if state.player(player).resource_played {
                return Err(EngineError::ResourceAlreadyPlayed { player });
            }
            state.pay(player, cost)?;
            enter(state, events, player, card, Zone::Battlefield)?;
            let owner = state.player_mut(player);
            owner.resource_played = true;
            let total = owner.pool.gain(*kind, *amount);
            events.emit(GameEvent::ResourceGained {
                player,
                kind: *kind,
                amount: *amount,
                total,
            });
        }
        CardKind::Creature { .. } => {
            state.pay(player, cost)?;
            enter(state, events, player, card, Zone::Battlefield)?;
            let payload = TriggerPayload::CreaturePlayed {
                player,
                creature: card,
            };
            check_trigger(state, decisions, events, &payload)?;
        }
        CardKind::Equipment { .. } => {
            let requirement = TargetRequirement::FriendlyCreature;
            let eligible = eligible_targets(state, player, requirement);
            let target = pick_target(state, decisions, events, player, card, requirement, &eligible)
                .ok_or(EngineError::NoLegalTarget { card })?;
            let Target::Card(creature) = target else {
                return Err(EngineError::IneligibleTarget {
                    source_card: card,
                    target,
                });
            };
            state.pay(player, cost)?;
            enter(state, events, player, card, Zone::Battlefield)?;
            equipment::attach(state, events, player, card, creature)?;
        }
        CardKind::Technology { .. } => {
            state.pay(player, cost)?;
            enter(state, events, player, card, Zone::Battlefield)?;
        }
        CardKind::Trap { .. } => {
            state.pay(player, cost)?;
            enter(state, events, player, card, Zone::TrapRow)?;
        }
    }
    EffectResolver::destroy_lethal(state, events)
}

fn enter(
    state: &mut GameState,
    events: &mut dyn EventSink,
    player: PlayerId,
    card: EntityId,
    zone: Zone,
) -> Result<(), EngineError> {
    state.play(player, card, zone)?;
    events.emit(GameEvent::CardPlayed { player, card, zone });
    Ok(())
}
