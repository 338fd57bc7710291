//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` is the only place card locations change. It keeps an
//! ordered list per (player, zone) plus a reverse index from entity to
//! location, and refuses any move that is not in the transition table:
//!
//! | From | To |
//! |---|---|
//! | Library | Hand |
//! | Hand | Battlefield, TrapRow, Graveyard |
//! | Battlefield | TrapRow, Graveyard |
//! | TrapRow | Graveyard |
//! | Graveyard | Battlefield |
//!
//! Lists are ordered bottom to top; the last library entry is drawn first.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::error::EngineError;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;

/// A location a card can occupy. Every player has one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    TrapRow,
}

impl Zone {
    /// All zones.
    pub const ALL: [Zone; 5] = [
        Zone::Library,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::TrapRow,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    /// Is moving a card from `self` to `to` a legal transition?
    #[must_use]
    pub const fn can_move_to(self, to: Zone) -> bool {
        matches!(
            (self, to),
            (Zone::Library, Zone::Hand)
                | (Zone::Hand, Zone::Battlefield)
                | (Zone::Hand, Zone::TrapRow)
                | (Zone::Hand, Zone::Graveyard)
                | (Zone::Battlefield, Zone::TrapRow)
                | (Zone::Battlefield, Zone::Graveyard)
                | (Zone::TrapRow, Zone::Graveyard)
                | (Zone::Graveyard, Zone::Battlefield)
        )
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of library).
    Top,
    /// Add to bottom of zone.
    Bottom,
}

type ZoneLists = [Vec<EntityId>; 5];

/// Manages card locations for both players.
///
/// ## Usage
///
/// ```
/// use rust_duel::core::{EntityId, PlayerId};
/// use rust_duel::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new();
/// zones.add_to_zone(EntityId(1), PlayerId::FIRST, Zone::Library, ZonePosition::Top).unwrap();
///
/// let drawn = zones.draw(PlayerId::FIRST).unwrap();
/// assert_eq!(zones.zone_of(drawn), Some((PlayerId::FIRST, Zone::Hand)));
/// assert!(zones.draw(PlayerId::FIRST).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// Card locations: entity_id -> (player, zone)
    locations: FxHashMap<EntityId, (PlayerId, Zone)>,

    /// Ordered card lists, one per zone per player.
    lists: PlayerMap<ZoneLists>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card that is not tracked yet.
    ///
    /// Adding an entity twice is an invariant violation.
    pub fn add_to_zone(
        &mut self,
        entity: EntityId,
        player: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> Result<(), EngineError> {
        if let Some((owner, at)) = self.zone_of(entity) {
            return Err(EngineError::invariant(format!(
                "{entity} is already in {owner}'s {at}"
            )));
        }
        self.insert(entity, player, zone, position);
        Ok(())
    }

    fn insert(&mut self, entity: EntityId, player: PlayerId, zone: Zone, position: ZonePosition) {
        self.locations.insert(entity, (player, zone));
        let list = &mut self.lists[player][zone.slot()];
        match position {
            ZonePosition::Top => list.push(entity),
            ZonePosition::Bottom => list.insert(0, entity),
        }
    }

    /// Move `entity` from `player`'s `from` zone to their `to` zone.
    ///
    /// Fails without changing anything if the card is elsewhere or the
    /// transition is not in the table.
    pub fn move_card(
        &mut self,
        player: PlayerId,
        entity: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<(), EngineError> {
        self.expect_in(player, entity, from)?;
        if !from.can_move_to(to) {
            return Err(EngineError::IllegalTransition {
                card: entity,
                from,
                to,
            });
        }
        self.lists[player][from.slot()].retain(|&e| e != entity);
        self.insert(entity, player, to, ZonePosition::Top);
        Ok(())
    }

    /// Check that `entity` sits in `player`'s `zone`.
    pub fn expect_in(&self, player: PlayerId, entity: EntityId, zone: Zone) -> Result<(), EngineError> {
        match self.zone_of(entity) {
            Some(location) if location == (player, zone) => Ok(()),
            found => Err(EngineError::WrongZone {
                player,
                card: entity,
                expected: zone,
                found: found.filter(|(owner, _)| *owner == player).map(|(_, z)| z),
            }),
        }
    }

    /// Move the top library card into the hand.
    pub fn draw(&mut self, player: PlayerId) -> Result<EntityId, EngineError> {
        let top = self
            .top_card(player, Zone::Library)
            .ok_or(EngineError::EmptyLibrary { player })?;
        self.move_card(player, top, Zone::Library, Zone::Hand)?;
        Ok(top)
    }

    /// Move a card from hand to `destination`.
    pub fn play(&mut self, player: PlayerId, entity: EntityId, destination: Zone) -> Result<(), EngineError> {
        self.move_card(player, entity, Zone::Hand, destination)
    }

    /// Move a card from hand to graveyard.
    pub fn discard(&mut self, player: PlayerId, entity: EntityId) -> Result<(), EngineError> {
        self.move_card(player, entity, Zone::Hand, Zone::Graveyard)
    }

    /// Move a card from wherever `player` holds it to their graveyard.
    ///
    /// Returns the zone it left.
    pub fn move_to_graveyard(&mut self, player: PlayerId, entity: EntityId) -> Result<Zone, EngineError> {
        let from = match self.zone_of(entity) {
            Some((owner, zone)) if owner == player => zone,
            _ => {
                return Err(EngineError::WrongZone {
                    player,
                    card: entity,
                    expected: Zone::Battlefield,
                    found: None,
                })
            }
        };
        self.move_card(player, entity, from, Zone::Graveyard)?;
        Ok(from)
    }

    /// Return a card from the graveyard to the battlefield.
    pub fn revive(&mut self, player: PlayerId, entity: EntityId) -> Result<(), EngineError> {
        self.move_card(player, entity, Zone::Graveyard, Zone::Battlefield)
    }

    /// Location of a card.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<(PlayerId, Zone)> {
        self.locations.get(&entity).copied()
    }

    /// Check if a card is in a specific zone of a specific player.
    #[must_use]
    pub fn is_in(&self, entity: EntityId, player: PlayerId, zone: Zone) -> bool {
        self.zone_of(entity) == Some((player, zone))
    }

    /// Cards in a zone, bottom to top.
    #[must_use]
    pub fn cards(&self, player: PlayerId, zone: Zone) -> &[EntityId] {
        &self.lists[player][zone.slot()]
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn size(&self, player: PlayerId, zone: Zone) -> usize {
        self.cards(player, zone).len()
    }

    /// Top card of a zone (last in the list).
    #[must_use]
    pub fn top_card(&self, player: PlayerId, zone: Zone) -> Option<EntityId> {
        self.cards(player, zone).last().copied()
    }

    /// Shuffle one zone.
    pub fn shuffle(&mut self, player: PlayerId, zone: Zone, rng: &mut GameRng) {
        rng.shuffle(&mut self.lists[player][zone.slot()]);
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Iterate over every tracked card and its location.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, PlayerId, Zone)> + '_ {
        self.locations.iter().map(|(&e, &(p, z))| (e, p, z))
    }

    /// Verify the reverse index and the lists agree.
    pub fn check_consistency(&self) -> Result<(), EngineError> {
        let mut listed = 0;
        for player in PlayerId::both() {
            for zone in Zone::ALL {
                for &entity in self.cards(player, zone) {
                    listed += 1;
                    if self.zone_of(entity) != Some((player, zone)) {
                        return Err(EngineError::invariant(format!(
                            "{entity} is listed in {player}'s {zone} but indexed at {:?}",
                            self.zone_of(entity)
                        )));
                    }
                }
            }
        }
        if listed != self.locations.len() {
            return Err(EngineError::invariant(format!(
                "{} cards indexed but {listed} listed",
                self.locations.len()
            )));
        }
        Ok(())
    }
}
