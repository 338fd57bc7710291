//! Player identification, per-player storage and player state.
//!
//! ## PlayerId
//!
//! A duel always has exactly two seats, `PlayerId::FIRST` and
//! `PlayerId::SECOND`. `opponent()` flips between them.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Life, resource pool and the per-turn flags the turn engine resets.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::resources::ResourcePool;

/// Player seat in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID. Only 0 and 1 are valid seats.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage, one slot per seat.
///
/// ```
/// use rust_duel::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i64> = PlayerMap::new(|_| 40);
/// life[PlayerId::SECOND] -= 6;
/// assert_eq!(life[PlayerId::FIRST], 40);
/// assert_eq!(life[PlayerId::SECOND], 34);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Mutable per-player match state.
///
/// Zones are not stored here; `ZoneManager` owns card locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat of this player.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Current life total. May go negative; the win check treats `<= 0` as dead.
    pub life: i64,

    /// Mana counter and typed resource counters.
    pub pool: ResourcePool,

    /// A resource card was already played this turn.
    pub resource_played: bool,

    /// Amount subtracted from each incoming attack total.
    pub damage_reduction: i64,

    /// Number of turns this player has started.
    pub turns_started: u32,
}

impl Player {
    /// Create a player with a starting life total and an empty pool.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, life: i64, max_mana: u32) -> Self {
        Self {
            id,
            name: name.into(),
            life,
            pool: ResourcePool::new(max_mana),
            resource_played: false,
            damage_reduction: 0,
            turns_started: 0,
        }
    }

    /// Check if this player is still above zero life.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Lose life. Returns the new total.
    pub fn lose_life(&mut self, amount: i64) -> i64 {
        self.life -= amount.max(0);
        self.life
    }

    /// Gain life. Returns the new total.
    pub fn gain_life(&mut self, amount: i64) -> i64 {
        self.life += amount.max(0);
        self.life
    }
}
