//! Trap checks.
//!
//! After each triggering action the engine calls `check_trigger` with a
//! payload. Every trap in the responding player's trap row whose condition
//! matches is offered to its owner; a trap that fires resolves its effect
//! and goes to the graveyard, so it can never fire twice.

use tracing::{debug, warn};

use super::condition::{TrapCondition, TriggerPayload};
use super::event::GameEvent;
use super::sink::EventSink;
use crate::cards::CardKind;
use crate::core::{EngineError, EntityId, GameState, PlayerId};
use crate::effects::{eligible_targets, EffectResolver, EffectSpec};
use crate::rules::{pick_target, DecisionProvider};
use crate::zones::Zone;

fn armed(state: &GameState, player: PlayerId, payload: &TriggerPayload) -> Vec<(EntityId, TrapCondition, EffectSpec)> {
    state
        .cards_in(player, Zone::TrapRow)
        .filter_map(|card| match &card.definition.kind {
            CardKind::Trap { condition, effect } if condition.matches(payload) => {
                Some((card.entity_id, *condition, *effect))
            }
            _ => None,
        })
        .collect()
}

/// Offer every matching trap of the non-acting player a chance to fire.
///
/// Returns the traps that fired, in trap row order.
pub fn check_trigger(
    state: &mut GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    payload: &TriggerPayload,
) -> Result<Vec<EntityId>, EngineError> {
    let owner = payload.acting_player().opponent();
    let mut fired = Vec::new();

    for (trap, condition, effect) in armed(state, owner, payload) {
        // An earlier trap may have changed the board.
        if !state.zones().is_in(trap, owner, Zone::TrapRow) {
            continue;
        }

        let requirement = effect.requirement();
        let eligible = eligible_targets(state, owner, requirement);
        if requirement.needs_target() && eligible.is_empty() {
            debug!(%trap, %condition, "no legal target, trap held");
            continue;
        }
        if !decisions.confirm_trap_fire(state, owner, trap, payload) {
            debug!(%trap, %condition, "trap held");
            continue;
        }
        let target = if requirement.needs_target() {
            let Some(chosen) = pick_target(state, decisions, events, owner, trap, requirement, &eligible) else {
                warn!(%trap, "no acceptable trap target, trap held");
                continue;
            };
            Some(chosen)
        } else {
            None
        };

        debug!(player = %owner, %trap, %condition, "trap fires");
        events.emit(GameEvent::TrapFired {
            player: owner,
            trap,
            condition,
        });
        state.move_to_graveyard(owner, trap)?;
        EffectResolver::resolve(state, events, trap, owner, &effect, target)?;
        fired.push(trap);
    }

    Ok(fired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId};
    use crate::core::MatchConfig;
    use crate::rules::{AutoPilot, ScriptedProvider};
    use crate::triggers::EventLog;

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::SECOND;

    fn set_trap(state: &mut GameState, player: PlayerId, condition: TrapCondition, effect: EffectSpec) -> EntityId {
        let def = CardDefinition::new(CardId::new(7), "Snare", CardKind::trap(condition, effect));
        let id = state.add_to_library(player, def).unwrap();
        state.draw(player).unwrap();
        state.move_card(player, id, Zone::Hand, Zone::TrapRow).unwrap();
        id
    }

    fn damaged(attacker: PlayerId) -> TriggerPayload {
        TriggerPayload::PlayerDamaged { attacker, amount: 5 }
    }

    #[test]
    fn test_trap_fires_once() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let snare = set_trap(&mut state, P1, TrapCondition::PlayerDamaged, EffectSpec::damage_enemy(4));

        let fired = check_trigger(&mut state, &mut AutoPilot, &mut log, &damaged(P0)).unwrap();
        assert_eq!(fired, vec![snare]);
        assert_eq!(state.player(P0).life, 36);
        assert_eq!(state.card(snare).unwrap().zone, Zone::Graveyard);

        let fired = check_trigger(&mut state, &mut AutoPilot, &mut log, &damaged(P0)).unwrap();
        assert!(fired.is_empty());
        assert_eq!(state.player(P0).life, 36);
        assert_eq!(log.count(|e| matches!(e, GameEvent::TrapFired { .. })), 1);
    }

    #[test]
    fn test_only_opponent_traps_respond() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        set_trap(&mut state, P0, TrapCondition::PlayerDamaged, EffectSpec::damage_enemy(4));

        let fired = check_trigger(&mut state, &mut AutoPilot, &mut log, &damaged(P0)).unwrap();

        assert!(fired.is_empty());
        assert_eq!(state.player(P1).life, 40);
    }

    #[test]
    fn test_condition_must_match() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let snare = set_trap(&mut state, P1, TrapCondition::CreaturePlayed, EffectSpec::damage_enemy(4));

        check_trigger(&mut state, &mut AutoPilot, &mut log, &damaged(P0)).unwrap();

        assert_eq!(state.card(snare).unwrap().zone, Zone::TrapRow);
    }

    #[test]
    fn test_declined_trap_stays_armed() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let snare = set_trap(&mut state, P1, TrapCondition::PlayerDamaged, EffectSpec::reduce_damage(2));
        let mut decisions = ScriptedProvider::new().with_trap_answers([false]);

        check_trigger(&mut state, &mut decisions, &mut log, &damaged(P0)).unwrap();
        assert_eq!(state.card(snare).unwrap().zone, Zone::TrapRow);

        check_trigger(&mut state, &mut decisions, &mut log, &damaged(P0)).unwrap();
        assert_eq!(state.card(snare).unwrap().zone, Zone::Graveyard);
        assert_eq!(state.player(P1).damage_reduction, 2);
    }

    #[test]
    fn test_ineligible_trap_target_is_reported_and_asked_again() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let snare = set_trap(&mut state, P1, TrapCondition::PlayerDamaged, EffectSpec::deal_damage(3));
        let mut decisions = ScriptedProvider::new().with_targets([
            crate::effects::Target::Card(EntityId(999)),
            crate::effects::Target::Player(P0),
        ]);

        let fired = check_trigger(&mut state, &mut decisions, &mut log, &damaged(P0)).unwrap();

        assert_eq!(fired, vec![snare]);
        assert_eq!(state.player(P0).life, 37);
        assert_eq!(decisions.rejections().len(), 1);
        assert_eq!(log.count(|e| matches!(e, GameEvent::ActionRejected { .. })), 1);
    }

    #[test]
    fn test_trap_without_target_is_held() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let snare = set_trap(&mut state, P1, TrapCondition::PlayerDamaged, EffectSpec::apply_debuff(3));

        let fired = check_trigger(&mut state, &mut AutoPilot, &mut log, &damaged(P0)).unwrap();

        assert!(fired.is_empty());
        assert_eq!(state.card(snare).unwrap().zone, Zone::TrapRow);
    }
}
