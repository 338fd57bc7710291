//! Phase cycle tests.
//!
//! The clock walks the seven phases in a fixed order and the turn counter
//! moves exactly once per full cycle, on the End to Untap wrap.

use proptest::prelude::*;
use rust_duel::rules::{ScriptedProvider, TurnEngine};
use rust_duel::triggers::{EventLog, GameEvent};
use rust_duel::{GameState, MatchConfig, Phase, PlayerId};

proptest! {
    #[test]
    fn prop_phase_cycle(steps in 0usize..200) {
        let mut state = GameState::new(MatchConfig::default(), 3);
        let mut previous = state.phase;

        for _ in 0..steps {
            let next = state.advance_phase();
            prop_assert_eq!(next, previous.next());
            previous = next;
        }

        let cycles = steps / Phase::ALL.len();
        prop_assert_eq!(state.phase, Phase::ALL[steps % Phase::ALL.len()]);
        prop_assert_eq!(state.turn as usize, 1 + cycles);
        let expected_active = if cycles % 2 == 0 { PlayerId::FIRST } else { PlayerId::SECOND };
        prop_assert_eq!(state.active, expected_active);
    }
}

/// The canonical order of phase names.
#[test]
fn test_phase_names_in_order() {
    let names: Vec<&str> = Phase::ALL.iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        ["Untap", "Upkeep", "Draw", "Main1", "Combat", "Main2", "End"]
    );
}

/// A full match announces phases in cycle order and alternates players.
#[test]
fn test_engine_announces_every_phase() {
    let state = GameState::new(MatchConfig::default().with_turn_limit(6), 11);
    let mut engine = TurnEngine::new(state, ScriptedProvider::new(), EventLog::new());

    engine.run_match().unwrap();

    let announced: Vec<(PlayerId, u32, Phase)> = engine
        .events()
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::PhaseChanged { player, turn, phase } => Some((*player, *turn, *phase)),
            _ => None,
        })
        .collect();

    assert_eq!(announced.len(), 6 * 7 + 1);
    for (i, (player, turn, phase)) in announced.iter().enumerate() {
        assert_eq!(*phase, Phase::ALL[i % 7]);
        assert_eq!(*turn as usize, 1 + i / 7);
        let expected = if (i / 7) % 2 == 0 { PlayerId::FIRST } else { PlayerId::SECOND };
        assert_eq!(*player, expected);
    }
}
