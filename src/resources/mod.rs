//! Resource ledger: mana and typed resource pools.
//!
//! ## Key Types
//!
//! - `ResourceKind`: `Common` (paid from mana) plus four typed kinds
//! - `Cost`: required amount per kind
//! - `ResourcePool`: a player's mana counter and typed counters
//!
//! Payment is all-or-nothing: `ResourcePool::pay` checks affordability and
//! deducts in one step, so a partial payment is never observable.

mod ledger;

pub use ledger::{Cost, ResourceKind, ResourcePool, Shortfall};
