//! Trap trigger conditions.
//!
//! A trap sits in its owner's trap row until the *other* player does
//! something that matches its `TrapCondition`. The engine describes what just
//! happened with a `TriggerPayload`; `TrapCondition::matches` decides whether
//! a trap cares.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};

/// The situations a trap can lie in wait for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapCondition {
    /// The opponent declared attackers.
    AttackDeclared,
    /// The trap's owner took combat damage.
    PlayerDamaged,
    /// The opponent put a creature onto the battlefield.
    CreaturePlayed,
    /// The opponent activated a technology.
    TechnologyActivated,
}

impl std::fmt::Display for TrapCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrapCondition::AttackDeclared => "attack_declared",
            TrapCondition::PlayerDamaged => "player_damaged",
            TrapCondition::CreaturePlayed => "creature_played",
            TrapCondition::TechnologyActivated => "technology_activated",
        };
        f.write_str(name)
    }
}

/// What just happened, as seen by the trap check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerPayload {
    AttackDeclared {
        attacker: PlayerId,
        attackers: SmallVec<[EntityId; 8]>,
    },
    PlayerDamaged {
        attacker: PlayerId,
        amount: i64,
    },
    CreaturePlayed {
        player: PlayerId,
        creature: EntityId,
    },
    TechnologyActivated {
        player: PlayerId,
        technology: EntityId,
    },
}

impl TriggerPayload {
    /// The condition this payload satisfies.
    #[must_use]
    pub fn condition(&self) -> TrapCondition {
        match self {
            TriggerPayload::AttackDeclared { .. } => TrapCondition::AttackDeclared,
            TriggerPayload::PlayerDamaged { .. } => TrapCondition::PlayerDamaged,
            TriggerPayload::CreaturePlayed { .. } => TrapCondition::CreaturePlayed,
            TriggerPayload::TechnologyActivated { .. } => TrapCondition::TechnologyActivated,
        }
    }

    /// The player whose action caused the payload. Traps of the other
    /// player are eligible to respond.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        match self {
            TriggerPayload::AttackDeclared { attacker, .. }
            | TriggerPayload::PlayerDamaged { attacker, .. } => *attacker,
            TriggerPayload::CreaturePlayed { player, .. }
            | TriggerPayload::TechnologyActivated { player, .. } => *player,
        }
    }

    /// Cards the payload is about, in payload order.
    #[must_use]
    pub fn subjects(&self) -> SmallVec<[EntityId; 8]> {
        match self {
            TriggerPayload::AttackDeclared { attackers, .. } => attackers.clone(),
            TriggerPayload::PlayerDamaged { .. } => SmallVec::new(),
            TriggerPayload::CreaturePlayed { creature, .. } => smallvec::smallvec![*creature],
            TriggerPayload::TechnologyActivated { technology, .. } => {
                smallvec::smallvec![*technology]
            }
        }
    }
}

impl TrapCondition {
    /// Does this condition respond to `payload`?
    #[must_use]
    pub fn matches(self, payload: &TriggerPayload) -> bool {
        self == payload.condition()
    }
}
