//! Match bootstrap.
//!
//! `MatchBuilder` turns a card registry and two decks into a ready
//! `GameState`: libraries instantiated (and shuffled with the match seed,
//! unless asked not to), names set, invariants audited.

use tracing::info;

use crate::cards::{CardRegistry, Deck};
use crate::core::{EngineError, GameState, MatchConfig, PlayerId, PlayerMap};
use crate::zones::Zone;

/// Builder for a fresh match.
pub struct MatchBuilder<'r> {
    registry: &'r CardRegistry,
    config: MatchConfig,
    seed: u64,
    decks: PlayerMap<Deck>,
    names: PlayerMap<Option<String>>,
    shuffle: bool,
}

impl<'r> MatchBuilder<'r> {
    #[must_use]
    pub fn new(registry: &'r CardRegistry) -> Self {
        Self {
            registry,
            config: MatchConfig::default(),
            seed: 0,
            decks: PlayerMap::default(),
            names: PlayerMap::default(),
            shuffle: true,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, player: PlayerId, deck: Deck) -> Self {
        self.decks[player] = deck;
        self
    }

    #[must_use]
    pub fn with_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        self.names[player] = Some(name.into());
        self
    }

    /// Keep libraries in deck order; the last deck card is drawn first.
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Build the match state.
    pub fn build(self) -> Result<GameState, EngineError> {
        let mut state = GameState::new(self.config, self.seed);
        for player in PlayerId::both() {
            let deck = &self.decks[player];
            if deck.count() > state.config.max_deck_size {
                return Err(EngineError::DeckFull {
                    max: state.config.max_deck_size,
                });
            }
            deck.instantiate(self.registry, &mut state, player)?;
            if self.shuffle {
                state.shuffle_library(player);
            }
            if let Some(name) = &self.names[player] {
                state.player_mut(player).name = name.clone();
            }
        }
        state.check_invariants()?;
        info!(
            seed = self.seed,
            first = state.zone(PlayerId::FIRST, Zone::Library).len(),
            second = state.zone(PlayerId::SECOND, Zone::Library).len(),
            "match ready"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardKind};

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        for i in 0..5 {
            registry
                .register(CardDefinition::new(CardId::new(i), format!("Card {i}"), CardKind::creature(1)))
                .unwrap();
        }
        registry
    }

    fn deck() -> Deck {
        Deck::from_cards((0..5).map(CardId::new)).unwrap()
    }

    #[test]
    fn test_build_unshuffled_keeps_order() {
        let registry = registry();
        let state = MatchBuilder::new(&registry)
            .with_deck(PlayerId::FIRST, deck())
            .with_name(PlayerId::SECOND, "Rival")
            .unshuffled()
            .build()
            .unwrap();

        let top = state.zones().top_card(PlayerId::FIRST, Zone::Library).unwrap();
        assert_eq!(state.card(top).unwrap().card_id(), CardId::new(4));
        assert!(state.zone(PlayerId::SECOND, Zone::Library).is_empty());
        assert_eq!(state.player(PlayerId::SECOND).name, "Rival");
    }

    #[test]
    fn test_same_seed_same_library() {
        let registry = registry();
        let build = |seed| {
            let state = MatchBuilder::new(&registry)
                .with_seed(seed)
                .with_deck(PlayerId::FIRST, deck())
                .build()
                .unwrap();
            state
                .cards_in(PlayerId::FIRST, Zone::Library)
                .map(|c| c.card_id())
                .collect::<Vec<_>>()
        };

        assert_eq!(build(9), build(9));
    }

    #[test]
    fn test_oversized_deck_is_refused() {
        let registry = registry();
        let mut big = Deck::with_max_size(100);
        for _ in 0..61 {
            big.add(CardId::new(0)).unwrap();
        }

        let err = MatchBuilder::new(&registry)
            .with_deck(PlayerId::FIRST, big)
            .build()
            .unwrap_err();

        assert!(matches!(err, EngineError::DeckFull { max: 60 }));
    }
}
