//! The turn engine.
//!
//! `TurnEngine` owns one match: its `GameState`, the `DecisionProvider` that
//! answers for both players and the `EventSink` that hears about everything.
//! It drives the fixed phase cycle
//!
//! ```text
//! Untap -> Upkeep -> Draw -> Main1 -> Combat -> Main2 -> End -> (next player) Untap
//! ```
//!
//! and never skips a phase. The only fatal errors are invariant violations;
//! every refused choice is reported and the engine moves on.
//!
//! ## Win check
//!
//! After every full turn: a forfeit loses immediately; otherwise a player at
//! or below zero life loses, and both at or below zero is a draw. A match
//! still undecided after `turn_limit` turns is also a draw.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cards::CardKind;
use crate::combat::{Attackers, CombatResolver};
use crate::core::{Choice, EngineError, EntityId, GameState, Phase, PlayerId, UpkeepFailure};
use crate::effects::{eligible_targets, EffectResolver, EffectSpec, Target};
use crate::triggers::{check_trigger, EventSink, GameEvent, TriggerPayload};
use crate::zones::Zone;

use super::actions::{apply_action, legal_actions};
use super::decision::{pick_target, report_refusal, DecisionProvider};
use super::forfeit::ForfeitSignal;

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players reached zero life in the same turn, or `run_match`
    /// hit the configured turn limit with both players still alive.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Draw => f.write_str("draw"),
        }
    }
}

/// Decide the match from the current state, if it is decided.
#[must_use]
pub fn check_winner(state: &GameState) -> Option<GameResult> {
    if let Some(quitter) = state.forfeited {
        return Some(GameResult::Winner(quitter.opponent()));
    }
    let alive = |p: PlayerId| state.player(p).is_alive();
    match (alive(PlayerId::FIRST), alive(PlayerId::SECOND)) {
        (true, true) => None,
        (true, false) => Some(GameResult::Winner(PlayerId::FIRST)),
        (false, true) => Some(GameResult::Winner(PlayerId::SECOND)),
        (false, false) => Some(GameResult::Draw),
    }
}

/// Drives one match through its phases.
pub struct TurnEngine<D, S> {
    state: GameState,
    decisions: D,
    events: S,
    forfeit: ForfeitSignal,
}

impl<D: DecisionProvider, S: EventSink> TurnEngine<D, S> {
    #[must_use]
    pub fn new(state: GameState, decisions: D, events: S) -> Self {
        Self {
            state,
            decisions,
            events,
            forfeit: ForfeitSignal::new(),
        }
    }

    /// Share an externally owned forfeit signal (builder pattern).
    #[must_use]
    pub fn with_forfeit_signal(mut self, signal: ForfeitSignal) -> Self {
        self.forfeit = signal;
        self
    }

    /// A handle other threads can raise.
    #[must_use]
    pub fn forfeit_signal(&self) -> ForfeitSignal {
        self.forfeit.clone()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn decisions(&self) -> &D {
        &self.decisions
    }

    #[must_use]
    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn into_parts(self) -> (GameState, D, S) {
        (self.state, self.decisions, self.events)
    }

    // === Clock ===

    /// Step to the next phase and announce it.
    pub fn advance_phase(&mut self) -> Phase {
        let phase = self.state.advance_phase();
        self.announce_phase();
        phase
    }

    fn announce_phase(&mut self) {
        let (player, turn, phase) = (self.state.active, self.state.turn, self.state.phase);
        debug!(%player, turn, %phase, "phase");
        self.events.emit(GameEvent::PhaseChanged { player, turn, phase });
    }

    /// Run the current phase's procedure without advancing.
    pub fn run_phase(&mut self) -> Result<(), EngineError> {
        match self.state.phase {
            Phase::Untap => self.untap(),
            Phase::Upkeep => self.upkeep(),
            Phase::Draw => self.draw(),
            Phase::Main1 | Phase::Main2 => self.main_phase(),
            Phase::Combat => self.combat(),
            Phase::End => self.end(),
        }
    }

    /// Run the rest of the active player's turn, ending on the next
    /// player's Untap. Returns the result once the match is decided.
    pub fn play_turn(&mut self) -> Result<Option<GameResult>, EngineError> {
        if let Some(result) = &self.state.result {
            return Ok(Some(result.clone()));
        }
        info!(player = %self.state.active, turn = self.state.turn, "turn begins");
        loop {
            self.run_phase()?;
            if self.poll_forfeit() {
                return Ok(self.decide());
            }
            let wrapped = self.state.phase.wraps();
            self.advance_phase();
            if wrapped {
                break;
            }
        }
        self.state.check_invariants()?;
        Ok(self.decide())
    }

    /// Play turns until the match is decided or the turn limit is hit.
    pub fn run_match(&mut self) -> Result<GameResult, EngineError> {
        if let Some(result) = &self.state.result {
            return Ok(result.clone());
        }
        self.announce_phase();
        loop {
            match self.play_turn() {
                Ok(Some(result)) => return Ok(result),
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, turn = self.state.turn, "match aborted");
                    return Err(e);
                }
            }
            if self.state.turn > self.state.config.turn_limit {
                warn!(limit = self.state.config.turn_limit, "turn limit reached");
                self.finish(GameResult::Draw);
                return Ok(GameResult::Draw);
            }
        }
    }

    fn poll_forfeit(&mut self) -> bool {
        match self.forfeit.raised() {
            Some(player) => {
                if self.state.forfeited.is_none() {
                    warn!(%player, "forfeit");
                    self.state.forfeited = Some(player);
                }
                true
            }
            None => self.state.forfeited.is_some(),
        }
    }

    fn decide(&mut self) -> Option<GameResult> {
        let result = check_winner(&self.state)?;
        self.finish(result.clone());
        Some(result)
    }

    fn finish(&mut self, result: GameResult) {
        info!(%result, turn = self.state.turn, "match over");
        self.state.result = Some(result.clone());
        self.events.emit(GameEvent::MatchWon { result });
    }

    // === Phases ===

    fn untap(&mut self) -> Result<(), EngineError> {
        let player = self.state.active;
        let me = self.state.player_mut(player);
        me.turns_started += 1;
        me.resource_played = false;
        let turns_started = me.turns_started;

        let battlefield = self.state.battlefield(player).to_vec();
        for id in battlefield {
            let card = self.state.card_mut(id)?;
            card.untap();
            if let CardKind::Resource { kind, .. } = &card.definition.kind {
                let kind = *kind;
                let total = self.state.player_mut(player).pool.untap_resource(kind);
                self.events.emit(GameEvent::ResourceGained {
                    player,
                    kind,
                    amount: 1,
                    total,
                });
            }
        }

        if self.state.config.mana_growth.grows_on(turns_started) {
            let mana = self.state.player_mut(player).pool.grow_mana();
            self.events.emit(GameEvent::ManaGrown { player, mana });
        }
        Ok(())
    }

    fn upkeep(&mut self) -> Result<(), EngineError> {
        let player = self.state.active;
        let battlefield = self.state.battlefield(player).to_vec();
        for id in battlefield {
            if !self.state.zones().is_in(id, player, Zone::Battlefield) {
                continue;
            }
            let Some(upkeep) = self.state.card(id)?.definition.upkeep.clone() else {
                continue;
            };
            match self.state.pay(player, &upkeep.cost) {
                Ok(()) => {
                    self.events.emit(GameEvent::UpkeepPaid { player, card: id });
                    if let Some(effect) = upkeep.effect {
                        self.resolve_card_effect(player, id, &effect)?;
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => {
                    let sacrificed = match self.state.config.upkeep_failure {
                        UpkeepFailure::Sacrifice => {
                            let detached = self.state.move_to_graveyard(player, id)?;
                            self.events.emit(GameEvent::CardDied { player, card: id });
                            EffectResolver::settle_detached(&mut self.state, &mut self.events, detached)?;
                            true
                        }
                        UpkeepFailure::Tap => {
                            self.state.card_mut(id)?.tap();
                            false
                        }
                    };
                    debug!(%player, card = %id, sacrificed, "upkeep missed");
                    self.events.emit(GameEvent::UpkeepFailed {
                        player,
                        card: id,
                        sacrificed,
                    });
                }
            }
        }
        Ok(())
    }

    fn resolve_card_effect(&mut self, player: PlayerId, source: EntityId, effect: &EffectSpec) -> Result<(), EngineError> {
        let requirement = effect.requirement();
        let target = if requirement.needs_target() {
            let eligible = eligible_targets(&self.state, player, requirement);
            let picked = pick_target(
                &self.state,
                &mut self.decisions,
                &mut self.events,
                player,
                source,
                requirement,
                &eligible,
            );
            let Some(target) = picked else {
                debug!(%source, %effect, "no legal target, effect skipped");
                return Ok(());
            };
            Some(target)
        } else {
            None
        };
        match EffectResolver::resolve(&mut self.state, &mut self.events, source, player, effect, target) {
            Err(e) if !e.is_fatal() => {
                warn!(%source, %effect, error = %e, "effect refused");
                Ok(())
            }
            other => other,
        }
    }

    fn draw(&mut self) -> Result<(), EngineError> {
        let player = self.state.active;
        let wanted = if self.state.player(player).turns_started == 1 {
            self.state
                .config
                .initial_hand_size
                .saturating_sub(self.state.hand(player).len())
        } else {
            1
        };
        for _ in 0..wanted {
            match self.state.draw(player) {
                Ok(card) => self.events.emit(GameEvent::CardDrawn { player, card }),
                Err(EngineError::EmptyLibrary { .. }) => {
                    debug!(%player, "library empty");
                    self.events.emit(GameEvent::LibraryEmpty { player });
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn main_phase(&mut self) -> Result<(), EngineError> {
        let player = self.state.active;
        let limit = self.state.config.max_illegal_retries;
        let mut rejections = 0;
        loop {
            if self.poll_forfeit() {
                return Ok(());
            }
            let legal = legal_actions(&self.state, player);
            let action = self.decisions.choose_action(&self.state, player, &legal);
            match apply_action(&mut self.state, &mut self.decisions, &mut self.events, player, action) {
                Ok(()) if action.is_end_phase() => return Ok(()),
                Ok(()) => rejections = 0,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    report_refusal(
                        &self.state,
                        &mut self.decisions,
                        &mut self.events,
                        player,
                        Choice::Action(action),
                        &e,
                    );
                    rejections += 1;
                    if rejections >= limit {
                        warn!(%player, rejections, "too many illegal actions, phase ends");
                        return Ok(());
                    }
                }
            }
        }
    }

    fn combat(&mut self) -> Result<(), EngineError> {
        let attacker = self.state.active;
        let defender = attacker.opponent();
        let eligible = CombatResolver::eligible_attackers(&self.state, attacker);
        if eligible.is_empty() {
            debug!(player = %attacker, "{}", EngineError::NoEligibleAttackers { player: attacker });
            self.events.emit(GameEvent::NoEligibleAttackers { player: attacker });
            return Ok(());
        }

        let limit = self.state.config.max_illegal_retries;
        let mut rejections = 0;
        let declared = loop {
            let chosen = self.decisions.choose_attackers(&self.state, attacker, &eligible);
            match CombatResolver::declare_attackers(&mut self.state, attacker, &chosen) {
                Ok(declared) => break declared,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(player = %attacker, error = %e, "attack declaration refused");
                    report_refusal(
                        &self.state,
                        &mut self.decisions,
                        &mut self.events,
                        attacker,
                        Choice::Attackers(chosen),
                        &e,
                    );
                    rejections += 1;
                    if rejections >= limit {
                        break Attackers::new();
                    }
                }
            }
        };
        if declared.is_empty() {
            return Ok(());
        }

        self.events.emit(GameEvent::AttackersDeclared {
            player: attacker,
            attackers: declared.to_vec(),
        });
        let payload = TriggerPayload::AttackDeclared {
            attacker,
            attackers: declared.clone(),
        };
        check_trigger(&mut self.state, &mut self.decisions, &mut self.events, &payload)?;

        let total = CombatResolver::resolve_unblocked_attack(&self.state, attacker, &declared);
        // Damage-triggered traps answer the pending hit first, then the hit
        // that landed.
        if total > 0 {
            let payload = TriggerPayload::PlayerDamaged { attacker, amount: total };
            check_trigger(&mut self.state, &mut self.decisions, &mut self.events, &payload)?;
        }
        let dealt = CombatResolver::apply_damage(&mut self.state, defender, total);
        info!(%attacker, %defender, total, dealt, "combat resolved");
        self.events.emit(GameEvent::DamageDealt {
            source: None,
            target: Target::Player(defender),
            amount: dealt,
        });
        if dealt > 0 {
            let payload = TriggerPayload::PlayerDamaged {
                attacker,
                amount: dealt,
            };
            check_trigger(&mut self.state, &mut self.decisions, &mut self.events, &payload)?;
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), EngineError> {
        let player = self.state.active;
        let max_hand = self.state.config.max_hand_size;
        let limit = self.state.config.max_illegal_retries;
        let mut rejections = 0;
        while self.state.hand(player).len() > max_hand {
            let hand = self.state.hand(player).to_vec();
            let mut choice = self.decisions.choose_discard(&self.state, player, &hand);
            if let Err(e) = self.state.zones().expect_in(player, choice, Zone::Hand) {
                warn!(%player, card = %choice, "discard choice not in hand");
                report_refusal(
                    &self.state,
                    &mut self.decisions,
                    &mut self.events,
                    player,
                    Choice::Discard(choice),
                    &e,
                );
                rejections += 1;
                if rejections < limit {
                    continue;
                }
                let Some(&last) = hand.last() else { break };
                choice = last;
            }
            self.state.discard(player, choice)?;
            self.events.emit(GameEvent::CardDiscarded { player, card: choice });
        }
        self.state.end_of_turn_cleanup();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, ATTACK};
    use crate::core::{Action, ManaGrowth, MatchConfig};
    use crate::resources::Cost;
    use crate::rules::{AutoPilot, ScriptedProvider};
    use crate::triggers::{EventLog, TrapCondition};

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::SECOND;

    fn filler(id: u32) -> CardDefinition {
        CardDefinition::new(CardId::new(id), "Filler", CardKind::creature(1)).with_cost(Cost::common(99))
    }

    fn stocked(config: MatchConfig, per_player: u32) -> GameState {
        let mut state = GameState::new(config, 7);
        for player in PlayerId::both() {
            for i in 0..per_player {
                state.add_to_library(player, filler(i)).unwrap();
            }
        }
        state
    }

    fn engine(state: GameState) -> TurnEngine<ScriptedProvider, EventLog> {
        TurnEngine::new(state, ScriptedProvider::new(), EventLog::new())
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(P1);
        assert!(!result.is_winner(P0));
        assert!(result.is_winner(P1));
        assert!(!GameResult::Draw.is_winner(P0));
        assert_eq!(result.to_string(), "Player 1 wins");
    }

    #[test]
    fn test_check_winner() {
        let mut state = GameState::new(MatchConfig::default(), 1);
        assert_eq!(check_winner(&state), None);

        state.player_mut(P1).life = 0;
        assert_eq!(check_winner(&state), Some(GameResult::Winner(P0)));

        state.player_mut(P0).life = -3;
        assert_eq!(check_winner(&state), Some(GameResult::Draw));

        state.forfeited = Some(P0);
        assert_eq!(check_winner(&state), Some(GameResult::Winner(P1)));
    }

    #[test]
    fn test_play_turn_visits_every_phase_once() {
        let mut engine = engine(stocked(MatchConfig::default(), 10));

        assert_eq!(engine.play_turn().unwrap(), None);

        let phases: Vec<Phase> = engine
            .events()
            .filter(|e| matches!(e, GameEvent::PhaseChanged { .. }))
            .map(|e| match e {
                GameEvent::PhaseChanged { phase, .. } => *phase,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(&phases[..6], &Phase::ALL[1..]);
        assert_eq!(phases[6], Phase::Untap);
        assert_eq!(engine.state().turn, 2);
        assert_eq!(engine.state().active, P1);
    }

    #[test]
    fn test_first_turn_tops_hand_up_then_draws_one() {
        let mut engine = engine(stocked(MatchConfig::default(), 12));

        engine.play_turn().unwrap();
        assert_eq!(engine.state().hand(P0).len(), 7);
        engine.play_turn().unwrap();
        engine.play_turn().unwrap();

        // 8 drawn, 1 discarded at End, then 1 more drawn and 1 discarded.
        assert_eq!(engine.state().hand(P0).len(), 7);
        assert_eq!(engine.state().zone(P0, Zone::Library).len(), 3);
        assert_eq!(engine.state().zone(P0, Zone::Graveyard).len(), 2);
    }

    #[test]
    fn test_empty_library_is_not_fatal() {
        let mut engine = engine(stocked(MatchConfig::default(), 2));

        engine.play_turn().unwrap();

        assert_eq!(engine.state().hand(P0).len(), 2);
        assert_eq!(engine.events().count(|e| matches!(e, GameEvent::LibraryEmpty { .. })), 1);
        assert_eq!(engine.events().count(|e| matches!(e, GameEvent::NoEligibleAttackers { .. })), 1);
    }

    #[test]
    fn test_mana_grows_every_other_turn() {
        let mut engine = engine(stocked(MatchConfig::default(), 0));
        for _ in 0..6 {
            engine.play_turn().unwrap();
        }
        // Player 0 started turns 1, 3 and 5: growth on their 1st and 3rd.
        assert_eq!(engine.state().player(P0).pool.mana(), 2);

        let mut every = engine_with(MatchConfig::default().with_mana_growth(ManaGrowth::EveryTurn));
        for _ in 0..6 {
            every.play_turn().unwrap();
        }
        assert_eq!(every.state().player(P0).pool.mana(), 3);
    }

    fn engine_with(config: MatchConfig) -> TurnEngine<ScriptedProvider, EventLog> {
        engine(stocked(config, 0))
    }

    fn onto_battlefield(state: &mut GameState, player: PlayerId, def: CardDefinition) -> EntityId {
        let id = state.add_to_library(player, def).unwrap();
        state.draw(player).unwrap();
        state.play(player, id, Zone::Battlefield).unwrap();
        id
    }

    fn brute(attack: i64) -> CardDefinition {
        CardDefinition::new(CardId::new(60), "Brute", CardKind::creature(4)).with_attr(ATTACK, attack)
    }

    #[test]
    fn test_failed_upkeep_sacrifices() {
        let mut state = stocked(MatchConfig::default(), 0);
        let def = CardDefinition::new(CardId::new(50), "Hungry Golem", CardKind::creature(3))
            .with_upkeep(Cost::common(5), None);
        let golem = state.add_to_library(P0, def).unwrap();
        state.draw(P0).unwrap();
        state.move_card(P0, golem, Zone::Hand, Zone::Battlefield).unwrap();
        let mut engine = engine(state);

        engine.play_turn().unwrap();

        assert_eq!(engine.state().card(golem).unwrap().zone, Zone::Graveyard);
        assert!(engine.events().events().contains(&GameEvent::UpkeepFailed {
            player: P0,
            card: golem,
            sacrificed: true,
        }));
        assert!(engine.events().events().contains(&GameEvent::CardDied { player: P0, card: golem }));
    }

    #[test]
    fn test_upkeep_effect_target_is_asked_again() {
        let mut state = stocked(MatchConfig::default().with_starting_mana(2), 0);
        let def = CardDefinition::new(CardId::new(51), "Leech", CardKind::creature(3))
            .with_upkeep(Cost::common(1), Some(EffectSpec::deal_damage(4)));
        onto_battlefield(&mut state, P0, def);
        let decisions = ScriptedProvider::new().with_targets([Target::Card(EntityId(999)), Target::Player(P1)]);
        let mut engine = TurnEngine::new(state, decisions, EventLog::new());

        engine.play_turn().unwrap();

        assert_eq!(engine.state().player(P0).pool.mana(), 2);
        assert_eq!(engine.state().player(P1).life, 36);
        let rejections = engine.decisions().rejections();
        assert_eq!(rejections.len(), 1);
        assert!(matches!(rejections[0].1, Choice::Target { .. }));
        assert_eq!(engine.events().count(|e| matches!(e, GameEvent::ActionRejected { .. })), 1);
    }

    #[test]
    fn test_illegal_actions_are_reported_and_bounded() {
        let mut state = stocked(MatchConfig::default(), 0);
        state.phase = Phase::Main1;
        let bogus = Action::PlayCard { card: EntityId(999) };
        let mut engine = TurnEngine::new(
            state,
            ScriptedProvider::new().with_actions(std::iter::repeat(bogus).take(40)),
            EventLog::new(),
        );

        engine.run_phase().unwrap();

        let limit = engine.state().config.max_illegal_retries as usize;
        assert_eq!(engine.decisions().rejections().len(), limit);
        assert_eq!(
            engine.events().count(|e| matches!(e, GameEvent::ActionRejected { .. })),
            limit
        );
    }

    #[test]
    fn test_combat_damage_through_engine() {
        let mut state = stocked(MatchConfig::default(), 0);
        let def = CardDefinition::new(CardId::new(60), "Brute", CardKind::creature(4)).with_attr(ATTACK, 6);
        let brute = state.add_to_library(P0, def).unwrap();
        state.draw(P0).unwrap();
        state.move_card(P0, brute, Zone::Hand, Zone::Battlefield).unwrap();
        let mut engine = TurnEngine::new(state, AutoPilot, EventLog::new());

        engine.play_turn().unwrap();

        assert_eq!(engine.state().player(P1).life, 34);
        assert!(engine.state().card(brute).unwrap().tapped);
    }

    #[test]
    fn test_damage_trap_answers_the_pending_hit() {
        let mut state = stocked(MatchConfig::default(), 0);
        onto_battlefield(&mut state, P0, brute(5));
        let def = CardDefinition::new(
            CardId::new(70),
            "Bulwark",
            CardKind::trap(TrapCondition::PlayerDamaged, EffectSpec::reduce_damage(3)),
        );
        let trap = state.add_to_library(P1, def).unwrap();
        state.draw(P1).unwrap();
        state.play(P1, trap, Zone::TrapRow).unwrap();
        let mut engine = TurnEngine::new(state, AutoPilot, EventLog::new());

        engine.play_turn().unwrap();

        assert_eq!(engine.state().player(P1).life, 38);
        assert_eq!(engine.state().player(P1).damage_reduction, 0);
        assert_eq!(engine.state().card(trap).unwrap().zone, Zone::Graveyard);
        assert_eq!(engine.events().count(|e| matches!(e, GameEvent::TrapFired { .. })), 1);
    }

    #[test]
    fn test_refused_attack_is_reported_and_asked_again() {
        let mut state = stocked(MatchConfig::default(), 0);
        let mine = onto_battlefield(&mut state, P0, brute(5));
        let decisions = ScriptedProvider::new().with_attacks([vec![EntityId(999)], vec![mine]]);
        state.phase = Phase::Combat;
        let mut engine = TurnEngine::new(state, decisions, EventLog::new());

        engine.run_phase().unwrap();

        assert_eq!(engine.state().player(P1).life, 35);
        let rejections = engine.decisions().rejections();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].1, Choice::Attackers(vec![EntityId(999)]));
    }

    #[test]
    fn test_refused_attacks_are_bounded() {
        let mut state = stocked(MatchConfig::default(), 0);
        let mine = onto_battlefield(&mut state, P0, brute(5));
        let theirs = onto_battlefield(&mut state, P1, brute(2));
        let decisions = ScriptedProvider::new().with_attacks(std::iter::repeat(vec![theirs]).take(40));
        state.phase = Phase::Combat;
        let mut engine = TurnEngine::new(state, decisions, EventLog::new());

        engine.run_phase().unwrap();

        let limit = engine.state().config.max_illegal_retries as usize;
        assert_eq!(engine.decisions().rejections().len(), limit);
        assert_eq!(engine.events().count(|e| matches!(e, GameEvent::ActionRejected { .. })), limit);
        assert_eq!(engine.state().player(P1).life, 40);
        assert!(!engine.state().card(mine).unwrap().tapped);
        assert!(!engine.state().card(theirs).unwrap().tapped);
    }

    #[test]
    fn test_discard_outside_hand_is_reported() {
        let mut state = stocked(MatchConfig::default(), 9);
        for _ in 0..9 {
            state.draw(P0).unwrap();
        }
        let keep = state.hand(P0)[0];
        let drop = state.hand(P0)[1];
        state.phase = Phase::End;
        let decisions = ScriptedProvider::new().with_discards([EntityId(999), drop, keep]);
        let mut engine = TurnEngine::new(state, decisions, EventLog::new());

        engine.run_phase().unwrap();

        let state = engine.state();
        assert_eq!(state.hand(P0).len(), 7);
        assert_eq!(state.zone(P0, Zone::Graveyard), &[drop, keep]);
        let rejections = engine.decisions().rejections();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].1, Choice::Discard(EntityId(999)));
    }

    #[test]
    fn test_bad_discards_are_bounded() {
        let mut state = stocked(MatchConfig::default(), 8);
        for _ in 0..8 {
            state.draw(P0).unwrap();
        }
        let last = *state.hand(P0).last().unwrap();
        state.phase = Phase::End;
        let decisions = ScriptedProvider::new().with_discards(std::iter::repeat(EntityId(999)).take(40));
        let mut engine = TurnEngine::new(state, decisions, EventLog::new());

        engine.run_phase().unwrap();

        let limit = engine.state().config.max_illegal_retries as usize;
        assert_eq!(engine.decisions().rejections().len(), limit);
        assert_eq!(engine.state().hand(P0).len(), 7);
        assert_eq!(engine.state().zone(P0, Zone::Graveyard), &[last]);
    }

    #[test]
    fn test_forfeit_ends_match() {
        let mut engine = engine(stocked(MatchConfig::default(), 10));
        engine.forfeit_signal().raise(P1);

        let result = engine.run_match().unwrap();

        assert_eq!(result, GameResult::Winner(P0));
        assert_eq!(engine.state().result, Some(GameResult::Winner(P0)));
        assert_eq!(engine.state().turn, 1);
    }

    #[test]
    fn test_turn_limit_draws() {
        let mut engine = engine(stocked(MatchConfig::default().with_turn_limit(4), 0));

        assert_eq!(engine.run_match().unwrap(), GameResult::Draw);
        assert_eq!(engine.state().turn, 5);
    }
}
