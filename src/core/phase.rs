//! The seven turn phases.

use serde::{Deserialize, Serialize};

/// A segment of a turn. Phases always cycle in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Untap,
    Upkeep,
    Draw,
    Main1,
    Combat,
    Main2,
    End,
}

impl Phase {
    /// All phases in turn order.
    pub const ALL: [Phase; 7] = [
        Phase::Untap,
        Phase::Upkeep,
        Phase::Draw,
        Phase::Main1,
        Phase::Combat,
        Phase::Main2,
        Phase::End,
    ];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one. `End` wraps to `Untap`.
    #[must_use]
    pub const fn next(self) -> Phase {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Does advancing from this phase start a new turn?
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Phase::End)
    }

    /// Main phases accept player actions.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    /// Canonical phase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Untap => "Untap",
            Phase::Upkeep => "Upkeep",
            Phase::Draw => "Draw",
            Phase::Main1 => "Main1",
            Phase::Combat => "Combat",
            Phase::Main2 => "Main2",
            Phase::End => "End",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        let mut phase = Phase::Untap;
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(phase);
            phase = phase.next();
        }
        assert_eq!(seen, Phase::ALL.to_vec());
        assert_eq!(phase, Phase::Untap);
    }

    #[test]
    fn test_only_end_wraps() {
        let wrapping: Vec<_> = Phase::ALL.iter().filter(|p| p.wraps()).collect();
        assert_eq!(wrapping, vec![&Phase::End]);
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Phase::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["Untap", "Upkeep", "Draw", "Main1", "Combat", "Main2", "End"]);
        assert!(Phase::Main1.is_main());
        assert!(!Phase::Combat.is_main());
    }
}
