//! Entity identification for card instances.
//!
//! Every card instance in a match has a unique `EntityId`, allocated by
//! `GameState` when a deck is instantiated. Players are addressed through
//! `PlayerId` instead, so the two id spaces never overlap.
//!
//! ```
//! use rust_duel::core::EntityId;
//!
//! let card = EntityId::new(10);
//! assert_eq!(card.raw(), 10);
//! assert_eq!(card.next(), EntityId::new(11));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(EntityId(3) < EntityId(4));
        assert_eq!(EntityId(3).next(), EntityId(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
