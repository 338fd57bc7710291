//! Card system: definitions, instances, registry and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`: Category payload (creature, resource, trap, equipment, technology)
//! - `CardDefinition`: Static card data
//! - `CardInstance`: Runtime card state (zone, tapped, damage, attachment)
//! - `CardRegistry`: Card definition lookup
//! - `Deck`: Ordered, size-capped card list that becomes a library

pub mod attributes;
pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{AttributeKey, AttributeValue, Attributes, StatDeltas, ATTACK, DEFENSE};
pub use deck::{Deck, MAX_DECK_SIZE};
pub use definition::{CardCategory, CardDefinition, CardId, CardKind, Upkeep};
pub use instance::CardInstance;
pub use registry::CardRegistry;
