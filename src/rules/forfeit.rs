//! External forfeit signal.
//!
//! A host that loses a player (disconnect, concession from another thread)
//! raises the signal; the turn engine polls it at every phase boundary.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::core::PlayerId;

const NONE: u8 = 0;

/// Cloneable handle to a shared forfeit flag.
#[derive(Clone, Debug, Default)]
pub struct ForfeitSignal {
    flag: Arc<AtomicU8>,
}

impl ForfeitSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `player` as forfeiting. The first raise wins.
    pub fn raise(&self, player: PlayerId) {
        let encoded = player.index() as u8 + 1;
        let _ = self
            .flag
            .compare_exchange(NONE, encoded, Ordering::AcqRel, Ordering::Acquire);
    }

    /// The forfeiting player, if any.
    #[must_use]
    pub fn raised(&self) -> Option<PlayerId> {
        match self.flag.load(Ordering::Acquire) {
            NONE => None,
            n => Some(PlayerId::new(n - 1)),
        }
    }

    pub fn clear(&self) {
        self.flag.store(NONE, Ordering::Release);
    }
}
