//! Combat.
//!
//! Attacks are unblocked: the active player declares untapped creatures,
//! they tap, and the sum of their attack goes straight at the defending
//! player, less the defender's damage reduction.

mod resolver;

pub use resolver::{Attackers, CombatResolver};
