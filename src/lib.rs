//! # rust-duel
//!
//! Turn/phase engine for a two-player collectible card duel.
//!
//! Players spend resources to deploy creatures, equipment, technology and
//! face-down traps; unblocked combat and triggered effects wear down each
//! other's life until one of them reaches zero.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: all randomness comes from the seeded `GameRng` and
//!    all input from a `DecisionProvider`, so a seed plus a decision script
//!    replays a match exactly.
//!
//! 2. **Refuse, don't corrupt**: every action is validated before the first
//!    mutation. Illegal choices are reported and retried; only invariant
//!    violations abort a match.
//!
//! 3. **Closed vocabularies**: card categories, zones, phases and effects are
//!    enums, and every match over them is exhaustive.
//!
//! ## Modules
//!
//! - `core`: ids, players, phases, state, actions, RNG, configuration, errors
//! - `resources`: mana counter and typed resource pools
//! - `zones`: the five zones and their legal transitions
//! - `cards`: definitions, instances, registry, decks
//! - `effects`: effect vocabulary, targeting, equipment, technology
//! - `triggers`: events, sinks and traps
//! - `combat`: attacker declaration and unblocked damage
//! - `rules`: the turn engine, decision providers and match bootstrap
//!
//! ## Example
//!
//! ```
//! use rust_duel::cards::{CardDefinition, CardKind, CardRegistry, Deck, ATTACK};
//! use rust_duel::rules::{AutoPilot, MatchBuilder, TurnEngine};
//! use rust_duel::triggers::NullSink;
//! use rust_duel::PlayerId;
//!
//! let mut registry = CardRegistry::new();
//! let brute = registry.register_with(|id| {
//!     CardDefinition::new(id, "Brute", CardKind::creature(4)).with_attr(ATTACK, 5)
//! });
//!
//! let mut deck = Deck::new();
//! for _ in 0..20 {
//!     deck.add(brute).unwrap();
//! }
//!
//! let state = MatchBuilder::new(&registry)
//!     .with_seed(7)
//!     .with_deck(PlayerId::FIRST, deck.clone())
//!     .with_deck(PlayerId::SECOND, deck)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = TurnEngine::new(state, AutoPilot, NullSink);
//! let result = engine.run_match().unwrap();
//! assert!(engine.state().is_over());
//! # let _ = result;
//! ```

pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod resources;
pub mod rules;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Choice, EngineError, EntityId, ErrorClass, GameRng, GameState, ManaGrowth,
    MatchConfig, Phase, PlayerId, PlayerMap, UpkeepFailure,
};

pub use crate::zones::{Zone, ZoneManager};

pub use crate::cards::{CardCategory, CardDefinition, CardId, CardInstance, CardKind, CardRegistry, Deck};

pub use crate::resources::{Cost, ResourceKind, ResourcePool};

pub use crate::effects::{EffectKind, EffectSpec, Target};

pub use crate::triggers::{EventLog, EventSink, GameEvent, TrapCondition};

pub use crate::combat::CombatResolver;

pub use crate::rules::{
    AutoPilot, DecisionProvider, ForfeitSignal, GameResult, MatchBuilder, ScriptedProvider, TurnEngine,
};
