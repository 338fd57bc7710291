//! Effect definitions.
//!
//! The effect vocabulary is closed: every effect a card can carry is one of
//! the `EffectKind` variants, and each variant declares what it may target
//! through `TargetRequirement`. A card that names an effect the engine does
//! not know cannot be constructed.
//!
//! ## Vocabulary
//!
//! | Kind | Target | Result |
//! |---|---|---|
//! | `DealDamage` | any player or battlefield creature | life loss / creature damage |
//! | `Heal` | friendly player or creature | life gain / damage removed |
//! | `ReduceMana` | enemy player | mana drained (saturating) |
//! | `ApplyDebuff` | enemy creature | attack lowered until end of turn |
//! | `DamageEnemy` | none | controller's opponent loses life |
//! | `ReduceDamage` | none | controller's damage reduction grows |
//! | `Revival` | creature in controller's graveyard | returned to the battlefield |
//! | `DamageIncrease` | friendly creature | attack raised until end of turn |

use serde::{Deserialize, Serialize};

/// The kinds of effect a card can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    DealDamage,
    Heal,
    ReduceMana,
    ApplyDebuff,
    DamageEnemy,
    ReduceDamage,
    Revival,
    DamageIncrease,
}

impl EffectKind {
    /// Every effect kind.
    pub const ALL: [EffectKind; 8] = [
        EffectKind::DealDamage,
        EffectKind::Heal,
        EffectKind::ReduceMana,
        EffectKind::ApplyDebuff,
        EffectKind::DamageEnemy,
        EffectKind::ReduceDamage,
        EffectKind::Revival,
        EffectKind::DamageIncrease,
    ];

    /// What this kind of effect is allowed to target.
    #[must_use]
    pub const fn requirement(self) -> TargetRequirement {
        match self {
            EffectKind::DealDamage => TargetRequirement::AnyCharacter,
            EffectKind::Heal => TargetRequirement::FriendlyCharacter,
            EffectKind::ReduceMana => TargetRequirement::EnemyPlayer,
            EffectKind::ApplyDebuff => TargetRequirement::EnemyCreature,
            EffectKind::DamageEnemy | EffectKind::ReduceDamage => TargetRequirement::None,
            EffectKind::Revival => TargetRequirement::FriendlyGraveyardCreature,
            EffectKind::DamageIncrease => TargetRequirement::FriendlyCreature,
        }
    }

    /// Snake-case name used in card lists and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::DealDamage => "deal_damage",
            EffectKind::Heal => "heal",
            EffectKind::ReduceMana => "reduce_mana",
            EffectKind::ApplyDebuff => "apply_debuff",
            EffectKind::DamageEnemy => "damage_enemy",
            EffectKind::ReduceDamage => "reduce_damage",
            EffectKind::Revival => "revival",
            EffectKind::DamageIncrease => "damage_increase",
        }
    }

    /// Look a kind up by its snake-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What an effect may be pointed at, relative to the card's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRequirement {
    /// Resolves without a target.
    None,
    /// Either player, or a creature on either battlefield.
    AnyCharacter,
    /// The controller, or a creature on the controller's battlefield.
    FriendlyCharacter,
    /// The controller's opponent.
    EnemyPlayer,
    /// A creature on the opponent's battlefield.
    EnemyCreature,
    /// A creature on the controller's battlefield.
    FriendlyCreature,
    /// A creature in the controller's graveyard.
    FriendlyGraveyardCreature,
}

impl TargetRequirement {
    /// Does resolving need a chosen target?
    #[must_use]
    pub const fn needs_target(self) -> bool {
        !matches!(self, TargetRequirement::None)
    }
}

/// One effect with its magnitude.
///
/// `amount` is ignored by `Revival`.
///
/// ```
/// use rust_duel::effects::{EffectKind, EffectSpec};
///
/// let bolt = EffectSpec::deal_damage(3);
/// assert_eq!(bolt.kind, EffectKind::DealDamage);
/// assert!(bolt.requirement().needs_target());
/// assert!(!EffectSpec::damage_enemy(2).requirement().needs_target());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub amount: i64,
}

impl EffectSpec {
    /// Create an effect.
    #[must_use]
    pub const fn new(kind: EffectKind, amount: i64) -> Self {
        Self { kind, amount }
    }

    pub const fn deal_damage(amount: i64) -> Self {
        Self::new(EffectKind::DealDamage, amount)
    }

    pub const fn heal(amount: i64) -> Self {
        Self::new(EffectKind::Heal, amount)
    }

    pub const fn reduce_mana(amount: i64) -> Self {
        Self::new(EffectKind::ReduceMana, amount)
    }

    pub const fn apply_debuff(amount: i64) -> Self {
        Self::new(EffectKind::ApplyDebuff, amount)
    }

    pub const fn damage_enemy(amount: i64) -> Self {
        Self::new(EffectKind::DamageEnemy, amount)
    }

    pub const fn reduce_damage(amount: i64) -> Self {
        Self::new(EffectKind::ReduceDamage, amount)
    }

    pub const fn revival() -> Self {
        Self::new(EffectKind::Revival, 0)
    }

    pub const fn damage_increase(amount: i64) -> Self {
        Self::new(EffectKind::DamageIncrease, amount)
    }

    /// Target requirement of this effect's kind.
    #[must_use]
    pub const fn requirement(&self) -> TargetRequirement {
        self.kind.requirement()
    }
}

impl std::fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EffectKind::from_name("summon_dragon"), None);
    }

    #[test]
    fn test_untargeted_kinds() {
        let untargeted: Vec<_> = EffectKind::ALL
            .into_iter()
            .filter(|k| !k.requirement().needs_target())
            .collect();
        assert_eq!(untargeted, vec![EffectKind::DamageEnemy, EffectKind::ReduceDamage]);
    }

    #[test]
    fn test_display() {
        assert_eq!(EffectSpec::apply_debuff(2).to_string(), "apply_debuff(2)");
    }
}
