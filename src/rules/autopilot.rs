//! Deterministic greedy decision provider.
//!
//! `AutoPilot` plays like a simple bot: resources first, then the strongest
//! creature it can pay for, then equipment, traps and technology; it attacks
//! with everything, targets opponents first, always springs traps and
//! discards its oldest card. Same state in, same answer out.

use crate::cards::CardCategory;
use crate::core::{Action, EntityId, GameState, PlayerId};
use crate::effects::{Target, TargetRequirement};
use crate::triggers::TriggerPayload;

use super::decision::DecisionProvider;

/// Greedy provider with no hidden state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPilot;

impl AutoPilot {
    /// Lower ranks are played first; `None` means never choose.
    fn rank(state: &GameState, action: &Action) -> Option<(u8, i64)> {
        match *action {
            Action::PlayCard { card } => {
                let card = state.get_card(card)?;
                let order = match card.category() {
                    CardCategory::Resource => 0,
                    CardCategory::Creature => 1,
                    CardCategory::Equipment => 2,
                    CardCategory::Trap => 3,
                    CardCategory::Technology => 4,
                };
                Some((order, -card.definition.base_attack()))
            }
            Action::ActivateTechnology { .. } => Some((5, 0)),
            Action::AttachEquipment { equipment, .. } => {
                // Only equip loose equipment; shuffling it around never ends.
                let loose = state.get_card(equipment)?.attached_to.is_none();
                loose.then_some((6, 0))
            }
            Action::EndPhase => None,
        }
    }
}

impl DecisionProvider for AutoPilot {
    fn choose_action(&mut self, state: &GameState, _player: PlayerId, legal: &[Action]) -> Action {
        legal
            .iter()
            .filter_map(|a| Self::rank(state, a).map(|r| (r, *a)))
            .min_by_key(|(r, _)| *r)
            .map_or(Action::EndPhase, |(_, a)| a)
    }

    fn choose_attackers(&mut self, _state: &GameState, _player: PlayerId, eligible: &[EntityId]) -> Vec<EntityId> {
        eligible.to_vec()
    }

    fn choose_target(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _source: EntityId,
        _requirement: TargetRequirement,
        eligible: &[Target],
    ) -> Target {
        // Eligible lists are never empty and put the opponent first.
        eligible[0]
    }

    fn choose_discard(&mut self, _state: &GameState, _player: PlayerId, hand: &[EntityId]) -> EntityId {
        hand[0]
    }

    fn confirm_trap_fire(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _trap: EntityId,
        _payload: &TriggerPayload,
    ) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardKind, ATTACK};
    use crate::core::MatchConfig;
    use crate::resources::ResourceKind;

    #[test]
    fn test_prefers_resource_then_biggest_creature() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        let p0 = PlayerId::FIRST;
        let small = state
            .add_to_library(p0, CardDefinition::new(CardId::new(1), "Imp", CardKind::creature(1)).with_attr(ATTACK, 1))
            .unwrap();
        let big = state
            .add_to_library(p0, CardDefinition::new(CardId::new(2), "Ogre", CardKind::creature(5)).with_attr(ATTACK, 4))
            .unwrap();
        let ore = state
            .add_to_library(p0, CardDefinition::new(CardId::new(3), "Ore", CardKind::resource(ResourceKind::Iron, 1)))
            .unwrap();

        let mut legal = vec![
            Action::PlayCard { card: small },
            Action::PlayCard { card: big },
            Action::PlayCard { card: ore },
            Action::EndPhase,
        ];
        assert_eq!(AutoPilot.choose_action(&state, p0, &legal), Action::PlayCard { card: ore });

        legal.remove(2);
        assert_eq!(AutoPilot.choose_action(&state, p0, &legal), Action::PlayCard { card: big });
        assert_eq!(AutoPilot.choose_action(&state, p0, &[Action::EndPhase]), Action::EndPhase);
    }
}
