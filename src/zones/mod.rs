//! Zone system for card locations.
//!
//! Every player owns five zones: library, hand, battlefield, graveyard and
//! trap row. `ZoneManager` owns all of them and is the only component that
//! moves cards; everything else requests a transition.

pub mod manager;

pub use manager::{Zone, ZoneManager, ZonePosition};
