//! Effect system for card abilities.
//!
//! Effects are the building blocks of traps, technology and upkeep:
//! - `EffectSpec`: an effect kind plus its numeric amount
//! - `Target`: a player or a card an effect is pointed at
//! - `EffectResolver`: executes effects on game state
//!
//! ## Targeting
//!
//! Each `EffectKind` declares a `TargetRequirement`. Targeted effects only
//! resolve against a target from `eligible_targets`; untargeted ones pick
//! their subject from the controller (e.g. `damage_enemy` always hits the
//! controller's opponent).
//!
//! Equipment attachment and technology activation live here too, since
//! both are "apply a card's payload to the board" operations.

mod effect;
pub mod equipment;
mod resolver;
pub mod technology;
mod targeting;

pub use effect::{EffectKind, EffectSpec, TargetRequirement};
pub use resolver::EffectResolver;
pub use targeting::{eligible_targets, is_eligible, Target};
