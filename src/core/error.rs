//! Engine error type.
//!
//! Every fallible engine operation returns `Result<T, EngineError>`.
//! Errors fall into three classes (see `ErrorClass`):
//!
//! - **IllegalAction**: the request is refused and nothing changes. The turn
//!   engine reports it back to the decision provider and asks again.
//! - **EmptyResource**: a reported no-op (empty library, nobody to attack with).
//! - **InvariantViolation**: engine state is inconsistent. Fatal; the match is
//!   aborted with the diagnostic.

use thiserror::Error;

use super::entity::EntityId;
use super::phase::Phase;
use super::player::PlayerId;
use crate::cards::{CardCategory, CardId};
use crate::effects::Target;
use crate::resources::Cost;
use crate::zones::Zone;

/// Severity class of an `EngineError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Refused request, no state change, retry allowed.
    IllegalAction,
    /// Nothing to do, play continues.
    EmptyResource,
    /// Inconsistent state, match must abort.
    InvariantViolation,
}

/// Errors produced by the duel engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{player} cannot afford {cost}")]
    InsufficientResources { player: PlayerId, cost: Cost },

    #[error("{card} is not in {player}'s {expected} (found in {found:?})")]
    WrongZone {
        player: PlayerId,
        card: EntityId,
        expected: Zone,
        found: Option<Zone>,
    },

    #[error("{card} cannot move from {from} to {to}")]
    IllegalTransition { card: EntityId, from: Zone, to: Zone },

    #[error("{card} is a {found}, expected a {expected}")]
    WrongCategory {
        card: EntityId,
        expected: CardCategory,
        found: CardCategory,
    },

    #[error("{target} is not a legal target for {source_card}")]
    IneligibleTarget { source_card: EntityId, target: Target },

    #[error("{card} has no legal target")]
    NoLegalTarget { card: EntityId },

    #[error("{player} already played a resource this turn")]
    ResourceAlreadyPlayed { player: PlayerId },

    #[error("{card} is tapped")]
    CardTapped { card: EntityId },

    #[error("{player} cannot act during {phase}")]
    NotYourPhase { player: PlayerId, phase: Phase },

    #[error("deck already holds the maximum of {max} cards")]
    DeckFull { max: usize },

    #[error("no card named {0:?}")]
    UnknownCardName(String),

    #[error("card definition {0} is not registered")]
    UnknownDefinition(CardId),

    #[error("card definition {0} is already registered")]
    DuplicateDefinition(CardId),

    #[error("{player}'s library is empty")]
    EmptyLibrary { player: PlayerId },

    #[error("{player} has no creature able to attack")]
    NoEligibleAttackers { player: PlayerId },

    #[error("unknown card instance {0}")]
    UnknownCard(EntityId),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("snapshot failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            EngineError::EmptyLibrary { .. } | EngineError::NoEligibleAttackers { .. } => {
                ErrorClass::EmptyResource
            }
            EngineError::UnknownCard(_)
            | EngineError::InvariantViolation(_)
            | EngineError::Snapshot(_) => ErrorClass::InvariantViolation,
            _ => ErrorClass::IllegalAction,
        }
    }

    /// Must the match abort?
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::InvariantViolation
    }

    /// Shorthand for an invariant violation with a formatted message.
    pub fn invariant(message: impl Into<String>) -> Self {
        EngineError::InvariantViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        let illegal = EngineError::ResourceAlreadyPlayed { player: PlayerId::FIRST };
        assert_eq!(illegal.class(), ErrorClass::IllegalAction);
        assert!(!illegal.is_fatal());

        let empty = EngineError::EmptyLibrary { player: PlayerId::SECOND };
        assert_eq!(empty.class(), ErrorClass::EmptyResource);

        let broken = EngineError::invariant("dangling attachment");
        assert!(broken.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::WrongZone {
            player: PlayerId::FIRST,
            card: EntityId(12),
            expected: Zone::Hand,
            found: Some(Zone::Graveyard),
        };
        assert_eq!(
            err.to_string(),
            "Entity(12) is not in Player 0's Hand (found in Some(Graveyard))"
        );
    }
}
