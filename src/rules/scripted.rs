//! Scripted decision provider for replays and tests.
//!
//! Answers are queued per question kind and consumed in order. When a queue
//! runs dry the provider falls back to a passive answer: end the phase, no
//! attack, first eligible target, oldest card in hand, fire the trap.

use std::collections::VecDeque;

use crate::core::{Action, Choice, EngineError, EntityId, GameState, PlayerId};
use crate::effects::{Target, TargetRequirement};
use crate::triggers::TriggerPayload;

use super::decision::DecisionProvider;

#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    actions: VecDeque<Action>,
    attacks: VecDeque<Vec<EntityId>>,
    targets: VecDeque<Target>,
    discards: VecDeque<EntityId>,
    trap_answers: VecDeque<bool>,
    rejections: Vec<(PlayerId, Choice, String)>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue main-phase actions (builder pattern).
    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Queue attacker declarations, one per combat (builder pattern).
    #[must_use]
    pub fn with_attacks(mut self, attacks: impl IntoIterator<Item = Vec<EntityId>>) -> Self {
        self.attacks.extend(attacks);
        self
    }

    /// Queue target choices (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets.extend(targets);
        self
    }

    /// Queue discard choices (builder pattern).
    #[must_use]
    pub fn with_discards(mut self, discards: impl IntoIterator<Item = EntityId>) -> Self {
        self.discards.extend(discards);
        self
    }

    /// Queue trap confirmations (builder pattern).
    #[must_use]
    pub fn with_trap_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.trap_answers.extend(answers);
        self
    }

    pub fn push_action(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Answers the engine refused, with the reason.
    #[must_use]
    pub fn rejections(&self) -> &[(PlayerId, Choice, String)] {
        &self.rejections
    }

    /// Are all queues consumed?
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.actions.is_empty()
            && self.attacks.is_empty()
            && self.targets.is_empty()
            && self.discards.is_empty()
            && self.trap_answers.is_empty()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn choose_action(&mut self, _state: &GameState, _player: PlayerId, _legal: &[Action]) -> Action {
        self.actions.pop_front().unwrap_or(Action::EndPhase)
    }

    fn choose_attackers(&mut self, _state: &GameState, _player: PlayerId, _eligible: &[EntityId]) -> Vec<EntityId> {
        self.attacks.pop_front().unwrap_or_default()
    }

    fn choose_target(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _source: EntityId,
        _requirement: TargetRequirement,
        eligible: &[Target],
    ) -> Target {
        self.targets.pop_front().unwrap_or_else(|| eligible[0])
    }

    fn choose_discard(&mut self, _state: &GameState, _player: PlayerId, hand: &[EntityId]) -> EntityId {
        self.discards.pop_front().unwrap_or_else(|| hand[0])
    }

    fn confirm_trap_fire(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _trap: EntityId,
        _payload: &TriggerPayload,
    ) -> bool {
        self.trap_answers.pop_front().unwrap_or(true)
    }

    fn on_illegal_action(&mut self, _state: &GameState, player: PlayerId, choice: &Choice, error: &EngineError) {
        self.rejections.push((player, choice.clone(), error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    #[test]
    fn test_queues_then_fallbacks() {
        let state = GameState::new(MatchConfig::default(), 1);
        let p0 = PlayerId::FIRST;
        let mut provider = ScriptedProvider::new()
            .with_actions([Action::PlayCard { card: EntityId(3) }])
            .with_trap_answers([false]);

        assert_eq!(provider.choose_action(&state, p0, &[]), Action::PlayCard { card: EntityId(3) });
        assert_eq!(provider.choose_action(&state, p0, &[]), Action::EndPhase);
        assert!(!provider.confirm_trap_fire(&state, p0, EntityId(1), &TriggerPayload::PlayerDamaged { attacker: p0, amount: 1 }));
        assert!(provider.choose_attackers(&state, p0, &[EntityId(2)]).is_empty());
        assert_eq!(provider.choose_discard(&state, p0, &[EntityId(8), EntityId(9)]), EntityId(8));
        assert!(provider.is_exhausted());
    }
}
