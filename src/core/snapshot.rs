//! Save and resume.
//!
//! A snapshot is the bincode encoding of the whole `GameState`: players,
//! pools, zones, every card instance with its mutable fields and attachment
//! edges, the RNG position and the history. Restoring re-runs the invariant
//! audit so a tampered or truncated snapshot is rejected instead of played.

use tracing::{debug, error};

use super::error::EngineError;
use super::state::GameState;

impl GameState {
    /// Encode the match.
    pub fn save(&self) -> Result<Vec<u8>, EngineError> {
        let bytes = bincode::serialize(self)?;
        debug!(turn = self.turn, phase = %self.phase, bytes = bytes.len(), "match saved");
        Ok(bytes)
    }

    /// Decode a match saved with `save` and audit it.
    pub fn restore(bytes: &[u8]) -> Result<Self, EngineError> {
        let state: GameState = bincode::deserialize(bytes)?;
        if let Err(err) = state.check_invariants() {
            error!(%err, "rejected snapshot");
            return Err(err);
        }
        debug!(turn = state.turn, phase = %state.phase, "match restored");
        Ok(state)
    }
}
