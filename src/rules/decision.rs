//! Decision providers.
//!
//! The engine never collects input itself. Whenever a player has to choose
//! something it asks the match's `DecisionProvider` and validates the answer;
//! an answer the rules refuse is reported back through `on_illegal_action`
//! and the question is asked again.
//!
//! Providers see the state read-only. Any provider is acceptable as long as
//! it eventually answers `Action::EndPhase` in main phases. Every other
//! question is retried at most `max_illegal_retries` times.

use tracing::debug;

use crate::core::{Action, Choice, EngineError, EntityId, GameState, PlayerId};
use crate::effects::{Target, TargetRequirement};
use crate::triggers::{EventSink, GameEvent, TriggerPayload};

/// Source of every player choice in a match.
pub trait DecisionProvider {
    /// Pick the next main-phase action. `legal` always ends with
    /// `Action::EndPhase`.
    fn choose_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action;

    /// Pick attackers among `eligible`. An empty answer means no attack.
    fn choose_attackers(&mut self, state: &GameState, player: PlayerId, eligible: &[EntityId]) -> Vec<EntityId>;

    /// Pick a target meeting `requirement` for `source` among `eligible`
    /// (never empty).
    fn choose_target(
        &mut self,
        state: &GameState,
        player: PlayerId,
        source: EntityId,
        requirement: TargetRequirement,
        eligible: &[Target],
    ) -> Target;

    /// Pick a card from `hand` to discard.
    fn choose_discard(&mut self, state: &GameState, player: PlayerId, hand: &[EntityId]) -> EntityId;

    /// Should `player`'s `trap` fire in response to `payload`?
    fn confirm_trap_fire(
        &mut self,
        state: &GameState,
        player: PlayerId,
        trap: EntityId,
        payload: &TriggerPayload,
    ) -> bool;

    /// Called when an answer was refused, before the question is asked
    /// again. The default ignores it.
    fn on_illegal_action(&mut self, _state: &GameState, _player: PlayerId, _choice: &Choice, _error: &EngineError) {}
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for &mut D {
    fn choose_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action {
        (**self).choose_action(state, player, legal)
    }

    fn choose_attackers(&mut self, state: &GameState, player: PlayerId, eligible: &[EntityId]) -> Vec<EntityId> {
        (**self).choose_attackers(state, player, eligible)
    }

    fn choose_target(
        &mut self,
        state: &GameState,
        player: PlayerId,
        source: EntityId,
        requirement: TargetRequirement,
        eligible: &[Target],
    ) -> Target {
        (**self).choose_target(state, player, source, requirement, eligible)
    }

    fn choose_discard(&mut self, state: &GameState, player: PlayerId, hand: &[EntityId]) -> EntityId {
        (**self).choose_discard(state, player, hand)
    }

    fn confirm_trap_fire(
        &mut self,
        state: &GameState,
        player: PlayerId,
        trap: EntityId,
        payload: &TriggerPayload,
    ) -> bool {
        (**self).confirm_trap_fire(state, player, trap, payload)
    }

    fn on_illegal_action(&mut self, state: &GameState, player: PlayerId, choice: &Choice, error: &EngineError) {
        (**self).on_illegal_action(state, player, choice, error);
    }
}

/// Tell the provider and the event sink that `choice` was refused.
pub fn report_refusal(
    state: &GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    player: PlayerId,
    choice: Choice,
    error: &EngineError,
) {
    debug!(%player, %choice, %error, "choice refused");
    decisions.on_illegal_action(state, player, &choice, error);
    events.emit(GameEvent::ActionRejected {
        player,
        choice,
        reason: error.to_string(),
    });
}

/// Ask for a target among `eligible` until the answer is one of them.
///
/// Each refused answer is reported. Returns `None` when `eligible` is empty
/// or the provider used up its retries.
pub fn pick_target(
    state: &GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    player: PlayerId,
    source: EntityId,
    requirement: TargetRequirement,
    eligible: &[Target],
) -> Option<Target> {
    if eligible.is_empty() {
        return None;
    }
    for _ in 0..state.config.max_illegal_retries {
        let target = decisions.choose_target(state, player, source, requirement, eligible);
        if eligible.contains(&target) {
            return Some(target);
        }
        let error = EngineError::IneligibleTarget {
            source_card: source,
            target,
        };
        report_refusal(state, decisions, events, player, Choice::Target { source, target }, &error);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;
    use crate::rules::ScriptedProvider;
    use crate::triggers::EventLog;

    const P0: PlayerId = PlayerId::FIRST;

    #[test]
    fn test_pick_target_retries_until_eligible() {
        let state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let mut provider = ScriptedProvider::new().with_targets([Target::Card(EntityId(999)), Target::Player(P0)]);
        let eligible = [Target::Player(P0), Target::Player(P0.opponent())];

        let target = pick_target(&state, &mut provider, &mut log, P0, EntityId(1), TargetRequirement::AnyCharacter, &eligible);

        assert_eq!(target, Some(Target::Player(P0)));
        assert_eq!(provider.rejections().len(), 1);
        assert!(matches!(provider.rejections()[0].1, Choice::Target { .. }));
        assert_eq!(log.count(|e| matches!(e, GameEvent::ActionRejected { .. })), 1);
    }

    #[test]
    fn test_pick_target_gives_up() {
        let state = GameState::new(MatchConfig::default(), 1);
        let mut log = EventLog::new();
        let limit = state.config.max_illegal_retries as usize;
        let mut provider = ScriptedProvider::new().with_targets(vec![Target::Card(EntityId(999)); limit]);
        let eligible = [Target::Player(P0)];

        let target = pick_target(&state, &mut provider, &mut log, P0, EntityId(1), TargetRequirement::AnyCharacter, &eligible);

        assert_eq!(target, None);
        assert_eq!(provider.rejections().len(), limit);
        assert!(provider.is_exhausted());
    }
}
