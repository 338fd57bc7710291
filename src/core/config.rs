//! Match configuration.
//!
//! `MatchConfig` collects the rule constants of a duel. Defaults follow the
//! house rules: 40 life, a 10-mana cap, an 8-card opening hand, a 7-card
//! maximum hand and 60-card decks.
//!
//! Rules the house never settled are exposed as explicit choices:
//! - `ManaGrowth`: how often the mana counter grows
//! - `UpkeepFailure`: what happens to a card whose upkeep cannot be paid
//! - `revert_equipment_on_detach`: whether equipment bonuses leave with it

use serde::{Deserialize, Serialize};

/// Cadence of `grow_mana` calls during Untap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManaGrowth {
    /// Grow on every turn the player starts.
    EveryTurn,
    /// Grow on the player's 1st, 3rd, 5th... turn.
    #[default]
    EveryOtherTurn,
}

impl ManaGrowth {
    /// Does a player grow mana on their `turn_index`-th turn (1-based)?
    #[must_use]
    pub fn grows_on(self, turn_index: u32) -> bool {
        match self {
            ManaGrowth::EveryTurn => true,
            ManaGrowth::EveryOtherTurn => turn_index % 2 == 1,
        }
    }
}

/// Consequence of failing to pay an upkeep cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpkeepFailure {
    /// The card is put into its owner's graveyard.
    #[default]
    Sacrifice,
    /// The card stays but is tapped for the turn.
    Tap,
}

/// Complete rule configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Life each player starts with.
    pub starting_life: i64,

    /// Mana each player starts with.
    pub starting_mana: u32,

    /// Upper bound of the mana counter.
    pub max_mana: u32,

    /// Hand size drawn up to on a player's first turn.
    pub initial_hand_size: usize,

    /// Hand size enforced during End.
    pub max_hand_size: usize,

    /// Largest legal deck.
    pub max_deck_size: usize,

    /// Mana growth cadence.
    pub mana_growth: ManaGrowth,

    /// Consequence of an unpaid upkeep.
    pub upkeep_failure: UpkeepFailure,

    /// Remove equipment stat bonuses when the equipment is detached.
    pub revert_equipment_on_detach: bool,

    /// Consecutive rejected actions before a main phase is ended for the player.
    pub max_illegal_retries: u32,

    /// Turn after which `run_match` stops and reports a draw.
    pub turn_limit: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: 40,
            starting_mana: 0,
            max_mana: 10,
            initial_hand_size: 8,
            max_hand_size: 7,
            max_deck_size: 60,
            mana_growth: ManaGrowth::default(),
            upkeep_failure: UpkeepFailure::default(),
            revert_equipment_on_detach: false,
            max_illegal_retries: 16,
            turn_limit: 500,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the starting mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: u32) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set the mana cap.
    #[must_use]
    pub fn with_max_mana(mut self, max: u32) -> Self {
        self.max_mana = max;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the mana growth cadence.
    #[must_use]
    pub fn with_mana_growth(mut self, growth: ManaGrowth) -> Self {
        self.mana_growth = growth;
        self
    }

    /// Set the unpaid-upkeep consequence.
    #[must_use]
    pub fn with_upkeep_failure(mut self, failure: UpkeepFailure) -> Self {
        self.upkeep_failure = failure;
        self
    }

    /// Revert equipment bonuses on detach.
    #[must_use]
    pub fn reverting_equipment(mut self) -> Self {
        self.revert_equipment_on_detach = true;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();

        assert_eq!(config.starting_life, 40);
        assert_eq!(config.max_mana, 10);
        assert_eq!(config.initial_hand_size, 8);
        assert_eq!(config.max_hand_size, 7);
        assert_eq!(config.max_deck_size, 60);
        assert_eq!(config.mana_growth, ManaGrowth::EveryOtherTurn);
        assert_eq!(config.upkeep_failure, UpkeepFailure::Sacrifice);
        assert!(!config.revert_equipment_on_detach);
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new()
            .with_starting_life(20)
            .with_starting_mana(3)
            .with_mana_growth(ManaGrowth::EveryTurn)
            .with_upkeep_failure(UpkeepFailure::Tap)
            .reverting_equipment()
            .with_turn_limit(10);

        assert_eq!(config.starting_life, 20);
        assert_eq!(config.starting_mana, 3);
        assert_eq!(config.mana_growth, ManaGrowth::EveryTurn);
        assert_eq!(config.upkeep_failure, UpkeepFailure::Tap);
        assert!(config.revert_equipment_on_detach);
        assert_eq!(config.turn_limit, 10);
    }

    #[test]
    fn test_mana_growth_cadence() {
        let grown: Vec<_> = (1..=6).filter(|&t| ManaGrowth::EveryOtherTurn.grows_on(t)).collect();
        assert_eq!(grown, vec![1, 3, 5]);
        assert!((1..=6).all(|t| ManaGrowth::EveryTurn.grows_on(t)));
    }

    #[test]
    fn test_config_serialization() {
        let config = MatchConfig::new().with_starting_life(25);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
