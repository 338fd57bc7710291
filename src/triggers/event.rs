//! Game events.
//!
//! Every observable thing the engine does is reported as a `GameEvent`
//! through an `EventSink`. Events carry player ids, card ids and numeric
//! deltas; presentation is up to the sink.

use serde::{Deserialize, Serialize};

use crate::core::{Choice, EntityId, Phase, PlayerId};
use crate::effects::{EffectKind, Target};
use crate::resources::ResourceKind;
use crate::rules::GameResult;
use crate::zones::Zone;

use super::condition::TrapCondition;

/// A thing that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        player: PlayerId,
        turn: u32,
        phase: Phase,
    },
    CardDrawn {
        player: PlayerId,
        card: EntityId,
    },
    /// A draw was requested from an empty library.
    LibraryEmpty {
        player: PlayerId,
    },
    CardPlayed {
        player: PlayerId,
        card: EntityId,
        zone: Zone,
    },
    ResourceGained {
        player: PlayerId,
        kind: ResourceKind,
        amount: u32,
        total: u32,
    },
    ManaGrown {
        player: PlayerId,
        mana: u32,
    },
    ManaDrained {
        player: PlayerId,
        amount: u32,
    },
    UpkeepPaid {
        player: PlayerId,
        card: EntityId,
    },
    UpkeepFailed {
        player: PlayerId,
        card: EntityId,
        sacrificed: bool,
    },
    AttackersDeclared {
        player: PlayerId,
        attackers: Vec<EntityId>,
    },
    /// Combat came with nothing able to attack.
    NoEligibleAttackers {
        player: PlayerId,
    },
    /// Damage to a player or creature. `amount` is what actually landed.
    DamageDealt {
        source: Option<EntityId>,
        target: Target,
        amount: i64,
    },
    Healed {
        target: Target,
        amount: i64,
    },
    StatModified {
        card: EntityId,
        effect: EffectKind,
        delta: i64,
    },
    DamageReductionRaised {
        player: PlayerId,
        total: i64,
    },
    CardDied {
        player: PlayerId,
        card: EntityId,
    },
    CardRevived {
        player: PlayerId,
        card: EntityId,
    },
    CardDiscarded {
        player: PlayerId,
        card: EntityId,
    },
    EquipmentAttached {
        equipment: EntityId,
        creature: EntityId,
    },
    EquipmentDetached {
        equipment: EntityId,
        creature: EntityId,
    },
    TechnologyActivated {
        player: PlayerId,
        card: EntityId,
    },
    TrapFired {
        player: PlayerId,
        trap: EntityId,
        condition: TrapCondition,
    },
    /// The decision provider gave an answer the rules refused.
    ActionRejected {
        player: PlayerId,
        choice: Choice,
        reason: String,
    },
    MatchWon {
        result: GameResult,
    },
}

impl GameEvent {
    /// The player the event is mainly about, if one can be named.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PhaseChanged { player, .. }
            | GameEvent::CardDrawn { player, .. }
            | GameEvent::LibraryEmpty { player }
            | GameEvent::CardPlayed { player, .. }
            | GameEvent::ResourceGained { player, .. }
            | GameEvent::ManaGrown { player, .. }
            | GameEvent::ManaDrained { player, .. }
            | GameEvent::UpkeepPaid { player, .. }
            | GameEvent::UpkeepFailed { player, .. }
            | GameEvent::AttackersDeclared { player, .. }
            | GameEvent::NoEligibleAttackers { player }
            | GameEvent::DamageReductionRaised { player, .. }
            | GameEvent::CardDied { player, .. }
            | GameEvent::CardRevived { player, .. }
            | GameEvent::CardDiscarded { player, .. }
            | GameEvent::TechnologyActivated { player, .. }
            | GameEvent::TrapFired { player, .. }
            | GameEvent::ActionRejected { player, .. } => Some(*player),
            GameEvent::DamageDealt { target, .. } | GameEvent::Healed { target, .. } => {
                target.player()
            }
            GameEvent::StatModified { .. }
            | GameEvent::EquipmentAttached { .. }
            | GameEvent::EquipmentDetached { .. }
            | GameEvent::MatchWon { .. } => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PhaseChanged { player, turn, phase } => {
                write!(f, "turn {turn}: {player} enters {phase}")
            }
            GameEvent::CardDrawn { player, card } => write!(f, "{player} draws {card}"),
            GameEvent::LibraryEmpty { player } => write!(f, "{player}'s library is empty"),
            GameEvent::CardPlayed { player, card, zone } => {
                write!(f, "{player} plays {card} to {zone}")
            }
            GameEvent::ResourceGained { player, kind, amount, total } => {
                write!(f, "{player} gains {amount} {kind} ({total})")
            }
            GameEvent::ManaGrown { player, mana } => write!(f, "{player}'s mana grows to {mana}"),
            GameEvent::ManaDrained { player, amount } => write!(f, "{player} loses {amount} mana"),
            GameEvent::UpkeepPaid { player, card } => write!(f, "{player} pays upkeep for {card}"),
            GameEvent::UpkeepFailed { player, card, sacrificed } => {
                let outcome = if *sacrificed { "sacrificed" } else { "tapped" };
                write!(f, "{player} misses upkeep for {card} ({outcome})")
            }
            GameEvent::AttackersDeclared { player, attackers } => {
                write!(f, "{player} attacks with {} creature(s)", attackers.len())
            }
            GameEvent::NoEligibleAttackers { player } => write!(f, "{player} has no attackers"),
            GameEvent::DamageDealt { source, target, amount } => match source {
                Some(source) => write!(f, "{source} deals {amount} to {target}"),
                None => write!(f, "{target} takes {amount}"),
            },
            GameEvent::Healed { target, amount } => write!(f, "{target} heals {amount}"),
            GameEvent::StatModified { card, effect, delta } => {
                write!(f, "{effect} shifts {card} by {delta}")
            }
            GameEvent::DamageReductionRaised { player, total } => {
                write!(f, "{player}'s damage reduction is {total}")
            }
            GameEvent::CardDied { player, card } => write!(f, "{player}'s {card} dies"),
            GameEvent::CardRevived { player, card } => write!(f, "{player}'s {card} returns"),
            GameEvent::CardDiscarded { player, card } => write!(f, "{player} discards {card}"),
            GameEvent::EquipmentAttached { equipment, creature } => {
                write!(f, "{equipment} attached to {creature}")
            }
            GameEvent::EquipmentDetached { equipment, creature } => {
                write!(f, "{equipment} detached from {creature}")
            }
            GameEvent::TechnologyActivated { player, card } => {
                write!(f, "{player} activates {card}")
            }
            GameEvent::TrapFired { player, trap, condition } => {
                write!(f, "{player}'s {trap} fires on {condition}")
            }
            GameEvent::ActionRejected { player, choice, reason } => {
                write!(f, "{player} cannot {choice}: {reason}")
            }
            GameEvent::MatchWon { result } => write!(f, "match over: {result}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_of_event() {
        let drawn = GameEvent::CardDrawn {
            player: PlayerId::SECOND,
            card: EntityId(3),
        };
        let hit = GameEvent::DamageDealt {
            source: None,
            target: Target::Player(PlayerId::FIRST),
            amount: 4,
        };
        let attached = GameEvent::EquipmentAttached {
            equipment: EntityId(1),
            creature: EntityId(2),
        };

        assert_eq!(drawn.player(), Some(PlayerId::SECOND));
        assert_eq!(hit.player(), Some(PlayerId::FIRST));
        assert_eq!(attached.player(), None);
    }

    #[test]
    fn test_display() {
        let event = GameEvent::DamageDealt {
            source: Some(EntityId(7)),
            target: Target::Player(PlayerId::SECOND),
            amount: 9,
        };
        assert_eq!(event.to_string(), "Entity(7) deals 9 to Player 1");
    }
}
