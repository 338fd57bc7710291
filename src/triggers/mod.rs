//! Events and traps.
//!
//! Everything observable the engine does is emitted as a [`GameEvent`]
//! into an [`EventSink`]. Traps are the only cards that react to what the
//! other player does: [`check_trigger`] walks the responding player's trap
//! row for a [`TriggerPayload`] and fires matching traps.
//!
//! ## Key Components
//!
//! - [`TrapCondition`]: the situations a trap waits for
//! - [`TriggerPayload`]: what just happened
//! - [`GameEvent`]: structured event record
//! - [`EventSink`], [`EventLog`], [`TracingSink`], [`NullSink`]: event consumers
//!
//! ## Example Usage
//!
//! ```
//! use rust_duel::core::{EntityId, PlayerId};
//! use rust_duel::triggers::{EventLog, EventSink, GameEvent, TrapCondition, TriggerPayload};
//!
//! let payload = TriggerPayload::CreaturePlayed {
//!     player: PlayerId::FIRST,
//!     creature: EntityId(4),
//! };
//! assert!(TrapCondition::CreaturePlayed.matches(&payload));
//! assert_eq!(payload.acting_player().opponent(), PlayerId::SECOND);
//!
//! let mut log = EventLog::new();
//! log.emit(GameEvent::LibraryEmpty { player: PlayerId::SECOND });
//! assert_eq!(log.len(), 1);
//! ```

mod condition;
mod event;
mod sink;
mod trap;

pub use condition::{TrapCondition, TriggerPayload};
pub use event::GameEvent;
pub use sink::{EventLog, EventSink, NullSink, TracingSink};
pub use trap::check_trigger;
