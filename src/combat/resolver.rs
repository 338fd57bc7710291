use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::cards::CardCategory;
use crate::core::{EngineError, EntityId, GameState, PlayerId};
use crate::zones::Zone;

/// Declared attackers, in declaration order.
pub type Attackers = SmallVec<[EntityId; 8]>;

/// Unblocked combat resolution.
pub struct CombatResolver;

impl CombatResolver {
    /// Untapped creatures on `player`'s battlefield.
    #[must_use]
    pub fn eligible_attackers(state: &GameState, player: PlayerId) -> Attackers {
        state
            .creatures(player)
            .filter(|c| !c.tapped)
            .map(|c| c.entity_id)
            .collect()
    }

    /// Validate a declaration and tap every attacker.
    ///
    /// Either every chosen card is an eligible attacker and all of them tap,
    /// or nothing changes. Repeated ids are declared once.
    pub fn declare_attackers(
        state: &mut GameState,
        player: PlayerId,
        chosen: &[EntityId],
    ) -> Result<Attackers, EngineError> {
        let mut seen = FxHashSet::default();
        let mut declared = Attackers::new();
        for &id in chosen {
            if !seen.insert(id) {
                continue;
            }
            state.zones().expect_in(player, id, Zone::Battlefield)?;
            let card = state.card(id)?;
            if !card.is_creature() {
                return Err(EngineError::WrongCategory {
                    card: id,
                    expected: CardCategory::Creature,
                    found: card.category(),
                });
            }
            if card.tapped {
                return Err(EngineError::CardTapped { card: id });
            }
            declared.push(id);
        }

        for &id in &declared {
            state.card_mut(id)?.tap();
        }
        debug!(%player, count = declared.len(), "attackers declared");
        Ok(declared)
    }

    /// Total attack of the declared creatures still on the battlefield.
    #[must_use]
    pub fn resolve_unblocked_attack(state: &GameState, player: PlayerId, attackers: &[EntityId]) -> i64 {
        attackers
            .iter()
            .filter(|&&id| state.zones().is_in(id, player, Zone::Battlefield))
            .filter_map(|&id| state.get_card(id))
            .map(|c| c.attack())
            .sum()
    }

    /// Deal `amount` combat damage to `defender`, reduced by their damage
    /// reduction and floored at zero. Returns the damage dealt.
    pub fn apply_damage(state: &mut GameState, defender: PlayerId, amount: i64) -> i64 {
        let player = state.player_mut(defender);
        let dealt = (amount - player.damage_reduction).max(0);
        player.lose_life(dealt);
        debug!(%defender, amount, dealt, life = player.life, "combat damage");
        dealt
    }
}
