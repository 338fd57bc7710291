//! Decks - ordered card lists a library is built from.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::registry::CardRegistry;
use crate::core::{EngineError, EntityId, GameRng, GameState, PlayerId};

/// Default deck size limit.
pub const MAX_DECK_SIZE: usize = 60;

/// An ordered list of card definitions, capped at `max_size`.
///
/// The last card is the top of the library once instantiated.
///
/// ```
/// use rust_duel::cards::{CardKind, CardRegistry, Deck};
///
/// let mut registry = CardRegistry::new();
/// let golem = registry.register_auto("Golem", CardKind::creature(3));
///
/// let mut deck = Deck::new();
/// deck.add(golem).unwrap();
/// deck.add(golem).unwrap();
/// deck.remove_by_name(&registry, "Golem").unwrap();
/// assert_eq!(deck.count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardId>,
    max_size: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::with_max_size(MAX_DECK_SIZE)
    }
}

impl Deck {
    /// Empty deck with the default 60-card limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty deck with a custom limit.
    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            cards: Vec::new(),
            max_size,
        }
    }

    /// Build a deck from ids, failing if the list exceeds the default limit.
    pub fn from_cards(cards: impl IntoIterator<Item = CardId>) -> Result<Self, EngineError> {
        let mut deck = Self::new();
        for card in cards {
            deck.add(card)?;
        }
        Ok(deck)
    }

    /// Put a card on top of the deck.
    pub fn add(&mut self, card: CardId) -> Result<(), EngineError> {
        if self.cards.len() >= self.max_size {
            return Err(EngineError::DeckFull { max: self.max_size });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Add a card by its registered name.
    pub fn add_by_name(&mut self, registry: &CardRegistry, name: &str) -> Result<CardId, EngineError> {
        let id = registry
            .find_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| EngineError::UnknownCardName(name.to_string()))?;
        self.add(id)?;
        Ok(id)
    }

    /// Remove the topmost copy of the card with this name.
    pub fn remove_by_name(&mut self, registry: &CardRegistry, name: &str) -> Result<CardId, EngineError> {
        let position = self
            .cards
            .iter()
            .rposition(|&id| registry.get(id).is_some_and(|c| c.name == name))
            .ok_or_else(|| EngineError::UnknownCardName(name.to_string()))?;
        Ok(self.cards.remove(position))
    }

    /// Number of cards.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Copies of one definition.
    #[must_use]
    pub fn count_of(&self, card: CardId) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Create one instance per card in `player`'s library, preserving order.
    ///
    /// Every id is resolved before any instance is created, so an unknown
    /// id leaves the state untouched.
    pub fn instantiate(
        &self,
        registry: &CardRegistry,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<EntityId>, EngineError> {
        let definitions = self
            .cards
            .iter()
            .map(|&id| registry.lookup(id).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        definitions
            .into_iter()
            .map(|def| state.add_to_library(player, def))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::zones::Zone;

    fn registry() -> (CardRegistry, CardId, CardId) {
        let mut registry = CardRegistry::new();
        let golem = registry.register_auto("Golem", CardKind::creature(3));
        let drake = registry.register_auto("Drake", CardKind::creature(4));
        (registry, golem, drake)
    }

    #[test]
    fn test_cap() {
        let mut deck = Deck::with_max_size(2);
        deck.add(CardId::new(0)).unwrap();
        deck.add(CardId::new(0)).unwrap();

        assert!(matches!(deck.add(CardId::new(0)), Err(EngineError::DeckFull { max: 2 })));
        assert_eq!(deck.count(), 2);
    }

    #[test]
    fn test_default_cap_is_sixty() {
        let result = Deck::from_cards(std::iter::repeat(CardId::new(1)).take(61));
        assert!(matches!(result, Err(EngineError::DeckFull { max: 60 })));
        assert!(Deck::from_cards(std::iter::repeat(CardId::new(1)).take(60)).is_ok());
    }

    #[test]
    fn test_name_editing() {
        let (registry, golem, drake) = registry();
        let mut deck = Deck::new();

        deck.add_by_name(&registry, "Golem").unwrap();
        deck.add_by_name(&registry, "Drake").unwrap();
        deck.add(golem).unwrap();

        assert_eq!(deck.remove_by_name(&registry, "Drake").unwrap(), drake);
        assert_eq!(deck.count_of(golem), 2);
        assert!(matches!(
            deck.remove_by_name(&registry, "Drake"),
            Err(EngineError::UnknownCardName(_))
        ));
        assert!(deck.add_by_name(&registry, "Dragon").is_err());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let ids: Vec<_> = (0..30).map(CardId::new).collect();
        let mut a = Deck::from_cards(ids.clone()).unwrap();
        let mut b = Deck::from_cards(ids).unwrap();

        a.shuffle(&mut GameRng::new(5));
        b.shuffle(&mut GameRng::new(5));

        assert_eq!(a, b);
    }

    #[test]
    fn test_instantiate_keeps_order() {
        let (registry, golem, drake) = registry();
        let deck = Deck::from_cards([golem, drake]).unwrap();
        let mut state = GameState::new(Default::default(), 1);

        let ids = deck.instantiate(&registry, &mut state, PlayerId::FIRST).unwrap();

        assert_eq!(state.zones().cards(PlayerId::FIRST, Zone::Library), ids.as_slice());
        assert_eq!(state.card(ids[1]).unwrap().name(), "Drake");
    }

    #[test]
    fn test_instantiate_unknown_id_is_atomic() {
        let (registry, golem, _) = registry();
        let deck = Deck::from_cards([golem, CardId::new(77)]).unwrap();
        let mut state = GameState::new(Default::default(), 1);

        assert!(deck.instantiate(&registry, &mut state, PlayerId::FIRST).is_err());
        assert_eq!(state.zones().size(PlayerId::FIRST, Zone::Library), 0);
    }
}
