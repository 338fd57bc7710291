//! Turn engine and match rules.
//!
//! - `TurnEngine`: the phase machine that runs a match
//! - `legal_actions` / `apply_action`: main-phase action legality
//! - `DecisionProvider`: where player choices come from
//! - `AutoPilot`, `ScriptedProvider`: shipped providers
//! - `MatchBuilder`: registry + decks into a ready `GameState`
//! - `ForfeitSignal`: cross-thread concession flag

pub mod actions;
mod autopilot;
mod builder;
mod decision;
pub mod engine;
mod forfeit;
mod scripted;

pub use actions::{apply_action, legal_actions};
pub use autopilot::AutoPilot;
pub use builder::MatchBuilder;
pub use decision::{pick_target, report_refusal, DecisionProvider};
pub use engine::{check_winner, GameResult, TurnEngine};
pub use forfeit::ForfeitSignal;
pub use scripted::ScriptedProvider;
