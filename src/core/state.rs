//! Match state.
//!
//! `GameState` is everything a duel needs to continue: both players, the
//! phase clock, every card instance, the zone manager, the RNG and the
//! action history. It is plain data; the turn engine and resolvers mutate
//! it through the methods below so card instances and zones never drift
//! apart.
//!
//! ## Clock
//!
//! `turn` starts at 1 and only advances when `advance_phase` wraps from
//! End to Untap, which also hands the turn to the other player.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::action::{Action, ActionRecord};
use super::config::MatchConfig;
use super::entity::EntityId;
use super::error::EngineError;
use super::phase::Phase;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardCategory, CardDefinition, CardInstance};
use crate::resources::Cost;
use crate::rules::GameResult;
use crate::zones::{Zone, ZoneManager, ZonePosition};

/// Equipment whose attachment edge was cleared by a zone change.
pub type Detached = SmallVec<[(EntityId, EntityId); 2]>;

/// Full match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Rules of this match.
    pub config: MatchConfig,

    /// Both players.
    pub players: PlayerMap<Player>,

    /// Whose turn it is.
    pub active: PlayerId,

    /// Current phase.
    pub phase: Phase,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Zone manager for card locations. Only mutated through the zone
    /// transitions below.
    zones: ZoneManager,

    /// Card instances by entity ID.
    cards: FxHashMap<EntityId, CardInstance>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Next entity ID to allocate.
    next_entity_id: u32,

    /// Every applied main-phase action.
    pub history: Vector<ActionRecord>,

    /// Player who conceded or was disconnected.
    pub forfeited: Option<PlayerId>,

    /// Set once the match is decided.
    pub result: Option<GameResult>,
}

impl GameState {
    /// Create a fresh match at turn 1, Untap, first player active.
    #[must_use]
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        let players = PlayerMap::new(|id| {
            let mut player = Player::new(id, id.to_string(), config.starting_life, config.max_mana);
            player.pool = player.pool.with_mana(config.starting_mana);
            player
        });
        Self {
            config,
            players,
            active: PlayerId::FIRST,
            phase: Phase::Untap,
            turn: 1,
            zones: ZoneManager::new(),
            cards: FxHashMap::default(),
            rng: GameRng::new(seed),
            next_entity_id: 0,
            history: Vector::new(),
            forfeited: None,
            result: None,
        }
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.active.opponent()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    // === Entity Management ===

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Track a card instance in the zone it claims.
    pub fn add_card(&mut self, card: CardInstance) -> Result<EntityId, EngineError> {
        let id = card.entity_id;
        self.zones
            .add_to_zone(id, card.owner, card.zone, ZonePosition::Top)?;
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Create an instance on top of `player`'s library.
    pub fn add_to_library(
        &mut self,
        player: PlayerId,
        definition: CardDefinition,
    ) -> Result<EntityId, EngineError> {
        let id = self.alloc_entity();
        self.add_card(CardInstance::new(id, definition, player, Zone::Library))
    }

    /// Get a card instance.
    #[must_use]
    pub fn get_card(&self, id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Get a card instance, reporting unknown ids.
    pub fn card(&self, id: EntityId) -> Result<&CardInstance, EngineError> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Get a mutable card instance, reporting unknown ids.
    pub fn card_mut(&mut self, id: EntityId) -> Result<&mut CardInstance, EngineError> {
        self.cards.get_mut(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Iterate over every card instance.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }

    /// Read access to card locations.
    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Card ids in a zone, bottom to top.
    #[must_use]
    pub fn zone(&self, player: PlayerId, zone: Zone) -> &[EntityId] {
        self.zones.cards(player, zone)
    }

    /// Card instances in a zone, bottom to top.
    pub fn cards_in(&self, player: PlayerId, zone: Zone) -> impl Iterator<Item = &CardInstance> {
        self.zones
            .cards(player, zone)
            .iter()
            .filter_map(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[EntityId] {
        self.zone(player, Zone::Hand)
    }

    #[must_use]
    pub fn battlefield(&self, player: PlayerId) -> &[EntityId] {
        self.zone(player, Zone::Battlefield)
    }

    /// Creatures on a player's battlefield.
    pub fn creatures(&self, player: PlayerId) -> impl Iterator<Item = &CardInstance> {
        self.cards_in(player, Zone::Battlefield)
            .filter(|c| c.is_creature())
    }

    // === Zone transitions ===

    /// Move a card through the zone manager and mirror the result on the
    /// instance.
    ///
    /// A card leaving the battlefield loses its tapped flag, damage,
    /// modifiers and attachment; equipment attached to it is detached.
    /// Returns the `(equipment, creature)` edges that were cleared.
    pub fn move_card(
        &mut self,
        player: PlayerId,
        id: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<Detached, EngineError> {
        self.card(id)?;
        self.zones.move_card(player, id, from, to)?;
        trace!(card = %id, %player, %from, %to, "moved");
        self.after_move(id, from, to)
    }

    /// Move a card to its owner's graveyard from wherever it is.
    pub fn move_to_graveyard(&mut self, player: PlayerId, id: EntityId) -> Result<Detached, EngineError> {
        self.card(id)?;
        let from = self.zones.move_to_graveyard(player, id)?;
        trace!(card = %id, %player, %from, "to graveyard");
        self.after_move(id, from, Zone::Graveyard)
    }

    /// Play a card from `player`'s hand into `destination`.
    pub fn play(&mut self, player: PlayerId, id: EntityId, destination: Zone) -> Result<Detached, EngineError> {
        self.card(id)?;
        self.zones.play(player, id, destination)?;
        trace!(card = %id, %player, to = %destination, "played");
        self.after_move(id, Zone::Hand, destination)
    }

    /// Discard a card from `player`'s hand.
    pub fn discard(&mut self, player: PlayerId, id: EntityId) -> Result<(), EngineError> {
        self.card(id)?;
        self.zones.discard(player, id)?;
        trace!(card = %id, %player, "discarded");
        self.after_move(id, Zone::Hand, Zone::Graveyard)?;
        Ok(())
    }

    /// Return a card from `player`'s graveyard to their battlefield.
    pub fn revive(&mut self, player: PlayerId, id: EntityId) -> Result<(), EngineError> {
        self.card(id)?;
        self.zones.revive(player, id)?;
        trace!(card = %id, %player, "revived");
        self.after_move(id, Zone::Graveyard, Zone::Battlefield)?;
        Ok(())
    }

    /// Shuffle `player`'s library with the match RNG.
    pub fn shuffle_library(&mut self, player: PlayerId) {
        self.zones.shuffle(player, Zone::Library, &mut self.rng);
    }

    /// Draw the top card of `player`'s library.
    pub fn draw(&mut self, player: PlayerId) -> Result<EntityId, EngineError> {
        let id = self.zones.draw(player)?;
        self.card_mut(id)?.zone = Zone::Hand;
        Ok(id)
    }

    fn after_move(&mut self, id: EntityId, from: Zone, to: Zone) -> Result<Detached, EngineError> {
        let mut detached = Detached::new();
        let card = self.card_mut(id)?;
        card.zone = to;
        if from == Zone::Battlefield {
            if let Some(creature) = card.attached_to {
                detached.push((id, creature));
            }
            card.reset_battlefield_state();
            detached.extend(self.clear_attachments_to(id));
        }
        Ok(detached)
    }

    fn clear_attachments_to(&mut self, creature: EntityId) -> Detached {
        let mut cleared = Detached::new();
        for card in self.cards.values_mut() {
            if card.attached_to == Some(creature) {
                card.attached_to = None;
                cleared.push((card.entity_id, creature));
            }
        }
        cleared.sort_unstable();
        cleared
    }

    // === Resources ===

    /// Pay a cost from `player`'s pool, all or nothing.
    pub fn pay(&mut self, player: PlayerId, cost: &Cost) -> Result<(), EngineError> {
        self.players[player]
            .pool
            .pay(cost)
            .map_err(|shortfall| {
                debug!(%player, %cost, %shortfall, "payment refused");
                EngineError::InsufficientResources {
                    player,
                    cost: cost.clone(),
                }
            })?;
        debug!(%player, %cost, "paid");
        Ok(())
    }

    // === Clock ===

    /// Step to the next phase. Wrapping from End starts the other player's
    /// turn and bumps the turn counter. Returns the new phase.
    pub fn advance_phase(&mut self) -> Phase {
        if self.phase.wraps() {
            self.turn += 1;
            self.active = self.active.opponent();
        }
        self.phase = self.phase.next();
        self.phase
    }

    /// Append an applied action to the history.
    pub fn record(&mut self, player: PlayerId, action: Action) {
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn,
            phase: self.phase,
        });
    }

    /// Clear marked damage and until-end-of-turn modifiers on both
    /// battlefields, and drop the defending player's damage reduction.
    pub fn end_of_turn_cleanup(&mut self) {
        for player in PlayerId::both() {
            for &id in self.zones.cards(player, Zone::Battlefield) {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.end_of_turn_cleanup();
                }
            }
        }
        let defender = self.opponent();
        self.players[defender].damage_reduction = 0;
    }

    /// Is the match decided?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    // === Invariants ===

    /// Audit the state. Any failure is an invariant violation.
    ///
    /// Checks that zones and instances agree on every card's location and
    /// that every attachment edge points from equipment on a battlefield to
    /// a creature on the same battlefield.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        self.zones.check_consistency()?;
        if self.zones.total_cards() != self.cards.len() {
            return Err(EngineError::invariant(format!(
                "{} instances but {} tracked locations",
                self.cards.len(),
                self.zones.total_cards()
            )));
        }
        for card in self.cards.values() {
            let id = card.entity_id;
            if self.zones.zone_of(id) != Some((card.owner, card.zone)) {
                return Err(EngineError::invariant(format!(
                    "{id} claims {}'s {} but is tracked at {:?}",
                    card.owner,
                    card.zone,
                    self.zones.zone_of(id)
                )));
            }
            if let Some(target) = card.attached_to {
                self.check_attachment(card, target)?;
            }
        }
        Ok(())
    }

    fn check_attachment(&self, equipment: &CardInstance, target: EntityId) -> Result<(), EngineError> {
        let id = equipment.entity_id;
        if equipment.category() != CardCategory::Equipment {
            return Err(EngineError::invariant(format!("{id} is attached but is not equipment")));
        }
        if equipment.zone != Zone::Battlefield {
            return Err(EngineError::invariant(format!(
                "{id} is attached while in {}",
                equipment.zone
            )));
        }
        let creature = self
            .get_card(target)
            .ok_or_else(|| EngineError::invariant(format!("{id} is attached to unknown {target}")))?;
        let same_battlefield = creature.zone == Zone::Battlefield && creature.owner == equipment.owner;
        if !creature.is_creature() || !same_battlefield {
            return Err(EngineError::invariant(format!(
                "{id} is attached to {target}, which is not a creature on {}'s battlefield",
                equipment.owner
            )));
        }
        Ok(())
    }
}
