//! Effect targeting.
//!
//! Turns a `TargetRequirement` into the concrete set of legal targets for
//! a controller, and validates a chosen target against it. Legal target
//! lists are deterministic: players before creatures, opponents before the
//! controller, creatures in battlefield order.

use serde::{Deserialize, Serialize};

use super::effect::TargetRequirement;
use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Zone;

/// What an effect is pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Card(EntityId),
}

impl Target {
    /// The targeted player, if this targets a player.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(*p),
            Target::Card(_) => None,
        }
    }

    /// The targeted card, if this targets a card.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match self {
            Target::Card(c) => Some(*c),
            Target::Player(_) => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player(p) => write!(f, "{p}"),
            Target::Card(c) => write!(f, "{c}"),
        }
    }
}

fn creatures_in(state: &GameState, player: PlayerId, zone: Zone) -> impl Iterator<Item = Target> + '_ {
    state
        .cards_in(player, zone)
        .filter(|c| c.is_creature())
        .map(|c| Target::Card(c.entity_id))
}

/// Every legal target for `requirement` from `controller`'s point of view.
#[must_use]
pub fn eligible_targets(
    state: &GameState,
    controller: PlayerId,
    requirement: TargetRequirement,
) -> Vec<Target> {
    let enemy = controller.opponent();
    match requirement {
        TargetRequirement::None => Vec::new(),
        TargetRequirement::AnyCharacter => [Target::Player(enemy), Target::Player(controller)]
            .into_iter()
            .chain(creatures_in(state, enemy, Zone::Battlefield))
            .chain(creatures_in(state, controller, Zone::Battlefield))
            .collect(),
        TargetRequirement::FriendlyCharacter => std::iter::once(Target::Player(controller))
            .chain(creatures_in(state, controller, Zone::Battlefield))
            .collect(),
        TargetRequirement::EnemyPlayer => vec![Target::Player(enemy)],
        TargetRequirement::EnemyCreature => creatures_in(state, enemy, Zone::Battlefield).collect(),
        TargetRequirement::FriendlyCreature => {
            creatures_in(state, controller, Zone::Battlefield).collect()
        }
        TargetRequirement::FriendlyGraveyardCreature => {
            creatures_in(state, controller, Zone::Graveyard).collect()
        }
    }
}

/// Is `target` legal for `requirement` from `controller`'s point of view?
#[must_use]
pub fn is_eligible(
    state: &GameState,
    controller: PlayerId,
    requirement: TargetRequirement,
    target: Target,
) -> bool {
    let enemy = controller.opponent();
    let creature_at = |owner: PlayerId, zone: Zone| match target {
        Target::Card(id) => state
            .get_card(id)
            .is_some_and(|c| c.is_creature() && c.owner == owner && c.zone == zone),
        Target::Player(_) => false,
    };
    match requirement {
        TargetRequirement::None => false,
        TargetRequirement::AnyCharacter => {
            target.player().is_some()
                || creature_at(enemy, Zone::Battlefield)
                || creature_at(controller, Zone::Battlefield)
        }
        TargetRequirement::FriendlyCharacter => {
            target == Target::Player(controller) || creature_at(controller, Zone::Battlefield)
        }
        TargetRequirement::EnemyPlayer => target == Target::Player(enemy),
        TargetRequirement::EnemyCreature => creature_at(enemy, Zone::Battlefield),
        TargetRequirement::FriendlyCreature => creature_at(controller, Zone::Battlefield),
        TargetRequirement::FriendlyGraveyardCreature => creature_at(controller, Zone::Graveyard),
    }
}
