//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its name,
//! play cost, base attributes, optional upkeep and a category payload.
//! "Ember Drake" costs 3 common mana, has 6 attack and 4 hit points -
//! these are part of the definition.
//!
//! The category is not stored separately; it is derived from the
//! `CardKind` payload, so a card can never claim to be a Trap while
//! carrying creature fields.
//!
//! Instance-specific data (damage taken, tapped, zone, attachment) is
//! stored separately in `CardInstance`.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, AttributeValue, Attributes, StatDeltas, ATTACK};
use crate::effects::EffectSpec;
use crate::resources::{Cost, ResourceKind};
use crate::triggers::TrapCondition;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Ember Drake"),
/// not a specific instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The five card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Creature,
    Resource,
    Trap,
    Equipment,
    Technology,
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Category-specific payload of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// A combatant. Dies when damage reaches `hit_points`.
    Creature {
        hit_points: i64,
        abilities: Vec<String>,
    },
    /// Grants `amount` of `kind` when played; produces one `kind` every Untap.
    Resource { kind: ResourceKind, amount: u32 },
    /// Set face down in the trap row; fires `effect` when `condition` is met.
    Trap {
        condition: TrapCondition,
        effect: EffectSpec,
    },
    /// Attaches to a friendly creature and shifts its stats by `deltas`.
    Equipment {
        deltas: StatDeltas,
        attach_cost: Cost,
    },
    /// Resolves `effects` when activated from the battlefield.
    Technology {
        effects: Vec<EffectSpec>,
        single_use: bool,
    },
}

impl CardKind {
    /// A creature payload without abilities.
    #[must_use]
    pub fn creature(hit_points: i64) -> Self {
        CardKind::Creature {
            hit_points,
            abilities: Vec::new(),
        }
    }

    /// A resource payload.
    #[must_use]
    pub fn resource(kind: ResourceKind, amount: u32) -> Self {
        CardKind::Resource { kind, amount }
    }

    /// A trap payload.
    #[must_use]
    pub fn trap(condition: TrapCondition, effect: EffectSpec) -> Self {
        CardKind::Trap { condition, effect }
    }

    /// An equipment payload from `(attribute, delta)` pairs.
    #[must_use]
    pub fn equipment<'a>(
        deltas: impl IntoIterator<Item = (&'a str, i64)>,
        attach_cost: Cost,
    ) -> Self {
        CardKind::Equipment {
            deltas: deltas
                .into_iter()
                .map(|(k, v)| (AttributeKey::new(k), v))
                .collect(),
            attach_cost,
        }
    }

    /// A technology payload.
    #[must_use]
    pub fn technology(effects: impl IntoIterator<Item = EffectSpec>, single_use: bool) -> Self {
        CardKind::Technology {
            effects: effects.into_iter().collect(),
            single_use,
        }
    }

    /// The category tag of this payload.
    #[must_use]
    pub fn category(&self) -> CardCategory {
        match self {
            CardKind::Creature { .. } => CardCategory::Creature,
            CardKind::Resource { .. } => CardCategory::Resource,
            CardKind::Trap { .. } => CardCategory::Trap,
            CardKind::Equipment { .. } => CardCategory::Equipment,
            CardKind::Technology { .. } => CardCategory::Technology,
        }
    }
}

/// Recurring cost paid during its controller's Upkeep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upkeep {
    pub cost: Cost,
    /// Resolved after a successful payment.
    pub effect: Option<EffectSpec>,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardCategory, CardDefinition, CardId, CardKind};
/// use rust_duel::resources::Cost;
///
/// let drake = CardDefinition::new(CardId::new(1), "Ember Drake", CardKind::creature(4))
///     .with_cost(Cost::common(3))
///     .with_attr("attack", 6i32);
///
/// assert_eq!(drake.category(), CardCategory::Creature);
/// assert_eq!(drake.base_attack(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name. Deck editing looks cards up by name.
    pub name: String,

    /// Category payload.
    pub kind: CardKind,

    /// Base attributes (`attack`, `defense`, descriptive values).
    pub attributes: Attributes,

    /// Cost to play from hand.
    pub cost: Cost,

    /// Optional recurring cost.
    pub upkeep: Option<Upkeep>,
}

impl CardDefinition {
    /// Create a new card definition with a free play cost.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            attributes: Attributes::default(),
            cost: Cost::free(),
            upkeep: None,
        }
    }

    /// Set the play cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set an upkeep cost (builder pattern).
    #[must_use]
    pub fn with_upkeep(mut self, cost: Cost, effect: Option<EffectSpec>) -> Self {
        self.upkeep = Some(Upkeep { cost, effect });
        self
    }

    /// Category derived from the payload.
    #[must_use]
    pub fn category(&self) -> CardCategory {
        self.kind.category()
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(&AttributeKey::new(key))
    }

    /// Get an integer attribute with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get_attr(key)
            .and_then(|v| v.as_int())
            .unwrap_or(default)
    }

    /// Get a text attribute.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get_attr(key).and_then(|v| v.as_text())
    }

    /// Printed attack, 0 when absent.
    #[must_use]
    pub fn base_attack(&self) -> i64 {
        self.get_int(ATTACK, 0)
    }

    /// Hit points for creatures, `None` otherwise.
    #[must_use]
    pub fn hit_points(&self) -> Option<i64> {
        match self.kind {
            CardKind::Creature { hit_points, .. } => Some(hit_points),
            _ => None,
        }
    }

    /// Does this card carry a non-empty upkeep cost?
    #[must_use]
    pub fn has_upkeep(&self) -> bool {
        self.upkeep.as_ref().is_some_and(|u| !u.cost.is_free())
    }
}
