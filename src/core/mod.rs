//! Core engine types: ids, players, phases, state, actions, RNG,
//! configuration and errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
mod snapshot;
pub mod state;

pub use action::{Action, ActionRecord, Choice};
pub use config::{ManaGrowth, MatchConfig, UpkeepFailure};
pub use entity::EntityId;
pub use error::{EngineError, ErrorClass};
pub use phase::Phase;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{Detached, GameState};
