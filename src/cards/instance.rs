//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card in a match. It carries a copy
//! of its definition plus the mutable state the engine changes: tapped flag,
//! damage, stat modifiers, zone and equipment attachment.
//!
//! ## Modifiers
//!
//! - `modifiers`: permanent stat shifts (equipment bonuses)
//! - `temp_modifiers`: shifts that last until the end of the current turn
//!   (debuffs, damage increases)
//!
//! Both are keyed by attribute; `stat()` folds them over the base value.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, StatDeltas, ATTACK};
use super::definition::{CardCategory, CardDefinition, CardId};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// The card this instance was created from.
    pub definition: CardDefinition,

    /// Player whose zones hold this card.
    pub owner: PlayerId,

    /// Current zone. Kept in step with `ZoneManager`.
    pub zone: Zone,

    /// Tapped cards cannot attack or be activated.
    pub tapped: bool,

    /// Damage marked this turn.
    pub damage: i64,

    /// Permanent stat shifts.
    #[serde(default)]
    pub modifiers: StatDeltas,

    /// Stat shifts cleared at end of turn.
    #[serde(default)]
    pub temp_modifiers: StatDeltas,

    /// For equipment: the creature it is attached to.
    pub attached_to: Option<EntityId>,
}

impl CardInstance {
    /// Create an untapped, undamaged instance.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: CardDefinition, owner: PlayerId, zone: Zone) -> Self {
        Self {
            entity_id,
            definition,
            owner,
            zone,
            tapped: false,
            damage: 0,
            modifiers: StatDeltas::default(),
            temp_modifiers: StatDeltas::default(),
            attached_to: None,
        }
    }

    /// Definition id.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Category of the underlying definition.
    #[must_use]
    pub fn category(&self) -> CardCategory {
        self.definition.category()
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.category() == CardCategory::Creature
    }

    /// Current value of an integer stat: base plus both modifier layers.
    #[must_use]
    pub fn stat(&self, key: &str) -> i64 {
        let key = AttributeKey::new(key);
        let base = self
            .definition
            .attributes
            .get(&key)
            .and_then(|v| v.as_int())
            .unwrap_or(0);
        base + self.modifiers.get(&key).copied().unwrap_or(0)
            + self.temp_modifiers.get(&key).copied().unwrap_or(0)
    }

    /// Current attack, never below zero.
    #[must_use]
    pub fn attack(&self) -> i64 {
        self.stat(ATTACK).max(0)
    }

    /// Hit points left, or `None` for non-creatures.
    #[must_use]
    pub fn remaining_hit_points(&self) -> Option<i64> {
        self.definition.hit_points().map(|hp| hp - self.damage)
    }

    /// Has this creature taken lethal damage?
    #[must_use]
    pub fn is_lethally_damaged(&self) -> bool {
        self.remaining_hit_points().is_some_and(|hp| hp <= 0)
    }

    /// Shift a permanent stat.
    pub fn modify(&mut self, key: &AttributeKey, delta: i64) {
        *self.modifiers.entry(key.clone()).or_insert(0) += delta;
    }

    /// Shift a stat until end of turn.
    pub fn modify_until_end_of_turn(&mut self, key: &AttributeKey, delta: i64) {
        *self.temp_modifiers.entry(key.clone()).or_insert(0) += delta;
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Clear per-turn state: marked damage and until-end-of-turn shifts.
    pub fn end_of_turn_cleanup(&mut self) {
        self.damage = 0;
        self.temp_modifiers.clear();
    }

    /// Reset everything a card loses when it leaves play.
    pub fn reset_battlefield_state(&mut self) {
        self.tapped = false;
        self.damage = 0;
        self.temp_modifiers.clear();
        self.modifiers.clear();
        self.attached_to = None;
    }
}
