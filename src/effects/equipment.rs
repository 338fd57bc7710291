//! Equipment attachment.
//!
//! Attaching applies the equipment's stat deltas to the creature as
//! permanent modifiers and records the `attached_to` edge on the equipment.
//! Detaching always clears the edge; the bonus is only taken back when the
//! match config asks for it.

use tracing::debug;

use crate::cards::{CardCategory, CardKind, StatDeltas};
use crate::core::{EngineError, EntityId, GameState, PlayerId};
use crate::effects::Target;
use crate::triggers::{EventSink, GameEvent};
use crate::zones::Zone;

fn deltas_of(state: &GameState, equipment: EntityId) -> Result<StatDeltas, EngineError> {
    let card = state.card(equipment)?;
    match &card.definition.kind {
        CardKind::Equipment { deltas, .. } => Ok(deltas.clone()),
        _ => Err(EngineError::WrongCategory {
            card: equipment,
            expected: CardCategory::Equipment,
            found: card.category(),
        }),
    }
}

/// Check that `equipment` could be attached to `creature` right now.
///
/// Re-attaching to the creature the equipment already sits on is refused.
pub fn validate_attach(
    state: &GameState,
    player: PlayerId,
    equipment: EntityId,
    creature: EntityId,
) -> Result<(), EngineError> {
    state.zones().expect_in(player, equipment, Zone::Battlefield)?;
    deltas_of(state, equipment)?;
    let target_ok = state
        .get_card(creature)
        .is_some_and(|c| c.is_creature() && c.owner == player && c.zone == Zone::Battlefield);
    if !target_ok || state.card(equipment)?.attached_to == Some(creature) {
        return Err(EngineError::IneligibleTarget {
            source_card: equipment,
            target: Target::Card(creature),
        });
    }
    Ok(())
}

/// Attach `equipment` to `creature`, both on `player`'s battlefield.
///
/// Moving equipment that is already attached detaches it from its old
/// creature first.
pub fn attach(
    state: &mut GameState,
    events: &mut dyn EventSink,
    player: PlayerId,
    equipment: EntityId,
    creature: EntityId,
) -> Result<(), EngineError> {
    validate_attach(state, player, equipment, creature)?;
    if state.card(equipment)?.attached_to.is_some() {
        detach(state, events, equipment)?;
    }

    let deltas = deltas_of(state, equipment)?;
    let target = state.card_mut(creature)?;
    for (key, delta) in &deltas {
        target.modify(key, *delta);
    }
    state.card_mut(equipment)?.attached_to = Some(creature);

    debug!(%equipment, %creature, "equipment attached");
    events.emit(GameEvent::EquipmentAttached {
        equipment,
        creature,
    });
    Ok(())
}

/// Detach `equipment` from whatever it is attached to. Returns the former
/// creature, if any.
pub fn detach(
    state: &mut GameState,
    events: &mut dyn EventSink,
    equipment: EntityId,
) -> Result<Option<EntityId>, EngineError> {
    let Some(creature) = state.card_mut(equipment)?.attached_to.take() else {
        return Ok(None);
    };
    if state.config.revert_equipment_on_detach {
        revert_bonus(state, equipment, creature)?;
    }
    events.emit(GameEvent::EquipmentDetached {
        equipment,
        creature,
    });
    Ok(Some(creature))
}

/// Take `equipment`'s deltas back off `creature`, if the creature is
/// still in play.
pub fn revert_bonus(state: &mut GameState, equipment: EntityId, creature: EntityId) -> Result<(), EngineError> {
    let deltas = deltas_of(state, equipment)?;
    let target = state.card_mut(creature)?;
    if target.zone != Zone::Battlefield {
        return Ok(());
    }
    for (key, delta) in &deltas {
        target.modify(key, -delta);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, ATTACK, DEFENSE};
    use crate::core::MatchConfig;
    use crate::resources::Cost;
    use crate::triggers::EventLog;

    const P0: PlayerId = PlayerId::FIRST;

    fn onto_battlefield(state: &mut GameState, player: PlayerId, def: CardDefinition) -> EntityId {
        let id = state.add_to_library(player, def).unwrap();
        state.draw(player).unwrap();
        state.move_card(player, id, Zone::Hand, Zone::Battlefield).unwrap();
        id
    }

    fn golem(state: &mut GameState, player: PlayerId) -> EntityId {
        let def = CardDefinition::new(CardId::new(1), "Golem", CardKind::creature(4)).with_attr(ATTACK, 2);
        onto_battlefield(state, player, def)
    }

    fn sword(state: &mut GameState) -> EntityId {
        let def = CardDefinition::new(
            CardId::new(2),
            "Sword",
            CardKind::equipment([(ATTACK, 3), (DEFENSE, 1)], Cost::free()),
        );
        onto_battlefield(state, P0, def)
    }

    #[test]
    fn test_attach_applies_deltas() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let creature = golem(&mut state, P0);
        let blade = sword(&mut state);

        attach(&mut state, &mut log, P0, blade, creature).unwrap();

        let card = state.card(creature).unwrap();
        assert_eq!(card.attack(), 5);
        assert_eq!(card.stat(DEFENSE), 1);
        assert_eq!(state.card(blade).unwrap().attached_to, Some(creature));
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_attach_to_enemy_creature_is_rejected() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let enemy = golem(&mut state, PlayerId::SECOND);
        let blade = sword(&mut state);

        let err = attach(&mut state, &mut log, P0, blade, enemy).unwrap_err();

        assert!(matches!(err, EngineError::IneligibleTarget { .. }));
        assert_eq!(state.card(enemy).unwrap().attack(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_reattach_to_same_creature_is_rejected() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let creature = golem(&mut state, P0);
        let blade = sword(&mut state);
        attach(&mut state, &mut log, P0, blade, creature).unwrap();

        for _ in 0..3 {
            let err = attach(&mut state, &mut log, P0, blade, creature).unwrap_err();
            assert!(matches!(err, EngineError::IneligibleTarget { .. }));
        }

        assert_eq!(state.card(creature).unwrap().attack(), 5);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_detach_keeps_bonus_by_default() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let creature = golem(&mut state, P0);
        let blade = sword(&mut state);
        attach(&mut state, &mut log, P0, blade, creature).unwrap();

        assert_eq!(detach(&mut state, &mut log, blade).unwrap(), Some(creature));

        assert_eq!(state.card(blade).unwrap().attached_to, None);
        assert_eq!(state.card(creature).unwrap().attack(), 5);
        assert_eq!(detach(&mut state, &mut log, blade).unwrap(), None);
    }

    #[test]
    fn test_detach_reverts_when_configured() {
        let mut state = GameState::new(MatchConfig::default().reverting_equipment(), 1);
        let mut log = EventLog::new();
        let first = golem(&mut state, P0);
        let second = golem(&mut state, P0);
        let blade = sword(&mut state);
        attach(&mut state, &mut log, P0, blade, first).unwrap();

        attach(&mut state, &mut log, P0, blade, second).unwrap();

        assert_eq!(state.card(first).unwrap().attack(), 2);
        assert_eq!(state.card(second).unwrap().attack(), 5);
        assert_eq!(log.count(|e| matches!(e, GameEvent::EquipmentDetached { .. })), 1);
    }
}
