//! Main-phase actions.
//!
//! During Main1 and Main2 the active player repeatedly picks one `Action`
//! from the legal set until they choose `EndPhase`. Every applied action is
//! appended to the match history as an `ActionRecord`.
//!
//! Outside the main phases players answer narrower questions (attackers,
//! targets, discards). Any answer the rules refuse is described by a
//! `Choice` when it is reported back.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::phase::Phase;
use super::player::PlayerId;
use crate::effects::Target;

/// A decision a player can take in a main phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand: creature, resource, equipment (with a target
    /// chosen on resolution), technology or trap.
    PlayCard { card: EntityId },

    /// Move equipment already on the battlefield onto another creature,
    /// paying its attach cost.
    AttachEquipment {
        equipment: EntityId,
        creature: EntityId,
    },

    /// Activate a technology on the battlefield.
    ActivateTechnology { technology: EntityId },

    /// Finish the current main phase.
    EndPhase,
}

impl Action {
    /// The card this action is about, if any.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match *self {
            Action::PlayCard { card } => Some(card),
            Action::AttachEquipment { equipment, .. } => Some(equipment),
            Action::ActivateTechnology { technology } => Some(technology),
            Action::EndPhase => None,
        }
    }

    #[must_use]
    pub fn is_end_phase(&self) -> bool {
        matches!(self, Action::EndPhase)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayCard { card } => write!(f, "play {card}"),
            Action::AttachEquipment { equipment, creature } => {
                write!(f, "attach {equipment} to {creature}")
            }
            Action::ActivateTechnology { technology } => write!(f, "activate {technology}"),
            Action::EndPhase => f.write_str("end phase"),
        }
    }
}

/// An applied action with its timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub turn: u32,
    pub phase: Phase,
}

/// A provider answer, as reported when the rules refuse it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Action(Action),
    Attackers(Vec<EntityId>),
    Target { source: EntityId, target: Target },
    Discard(EntityId),
}

impl From<Action> for Choice {
    fn from(action: Action) -> Self {
        Choice::Action(action)
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Action(action) => write!(f, "{action}"),
            Choice::Attackers(attackers) => write!(f, "attack with {attackers:?}"),
            Choice::Target { source, target } => write!(f, "target {target} with {source}"),
            Choice::Discard(card) => write!(f, "discard {card}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_accessor() {
        assert_eq!(Action::PlayCard { card: EntityId(3) }.card(), Some(EntityId(3)));
        assert_eq!(
            Action::AttachEquipment { equipment: EntityId(4), creature: EntityId(5) }.card(),
            Some(EntityId(4))
        );
        assert_eq!(Action::EndPhase.card(), None);
        assert!(Action::EndPhase.is_end_phase());
    }

    #[test]
    fn test_display() {
        let action = Action::AttachEquipment {
            equipment: EntityId(4),
            creature: EntityId(5),
        };
        assert_eq!(action.to_string(), "attach Entity(4) to Entity(5)");
        assert_eq!(Choice::from(action).to_string(), "attach Entity(4) to Entity(5)");
        assert_eq!(Choice::Discard(EntityId(2)).to_string(), "discard Entity(2)");
    }
}
