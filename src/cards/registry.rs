//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the card catalog of a match. Decks reference
//! definitions by `CardId` (or by name when edited) and are instantiated
//! against the registry.

use rustc_hash::FxHashMap;

use super::definition::{CardCategory, CardDefinition, CardId, CardKind};
use crate::core::error::EngineError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), "Golem", CardKind::creature(5)))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Golem");
/// assert!(registry
///     .register(CardDefinition::new(CardId::new(1), "Other", CardKind::creature(1)))
///     .is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition. Ids must be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, EngineError> {
        let id = card.id;
        if self.cards.contains_key(&id) {
            return Err(EngineError::DuplicateDefinition(id));
        }
        self.next_id = self.next_id.max(id.raw() + 1);
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Register a card with the next free ID.
    pub fn register_auto(&mut self, name: impl Into<String>, kind: CardKind) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        self.cards.insert(id, CardDefinition::new(id, name, kind));
        id
    }

    /// Add a definition built by `build` from a fresh ID.
    pub fn register_with(&mut self, build: impl FnOnce(CardId) -> CardDefinition) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        let mut card = build(id);
        card.id = id;
        self.cards.insert(id, card);
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, reporting unknown ids.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition, EngineError> {
        self.get(id).ok_or(EngineError::UnknownDefinition(id))
    }

    /// First definition with this exact name, lowest id first.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards
            .values()
            .filter(|c| c.name == name)
            .min_by_key(|c| c.id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by category.
    pub fn find_by_category(
        &self,
        category: CardCategory,
    ) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.category() == category)
    }
}
