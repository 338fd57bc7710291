//! Effect resolution - executing effects on game state.
//!
//! `EffectResolver` applies one `EffectSpec` from a source card to a target
//! after validating the target against the effect's requirement. Each
//! `EffectKind` has exactly one handler. Creature damage is followed by a
//! lethal-damage sweep that moves dead creatures to the graveyard.

use tracing::debug;

use super::effect::{EffectKind, EffectSpec};
use super::equipment;
use super::targeting::{is_eligible, Target};
use crate::cards::ATTACK;
use crate::core::{Detached, EngineError, EntityId, GameState, PlayerId};
use crate::triggers::{EventSink, GameEvent};
use crate::zones::Zone;

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Validate `target` for `effect` as controlled by `controller`.
    ///
    /// Untargeted effects accept no target; targeted effects need an
    /// eligible one.
    pub fn validate(
        state: &GameState,
        source: EntityId,
        controller: PlayerId,
        effect: &EffectSpec,
        target: Option<Target>,
    ) -> Result<(), EngineError> {
        let requirement = effect.requirement();
        match (requirement.needs_target(), target) {
            (false, _) => Ok(()),
            (true, None) => Err(EngineError::NoLegalTarget { card: source }),
            (true, Some(target)) if is_eligible(state, controller, requirement, target) => Ok(()),
            (true, Some(target)) => Err(EngineError::IneligibleTarget {
                source_card: source,
                target,
            }),
        }
    }

    /// Validate and apply one effect, then sweep lethally damaged creatures.
    pub fn resolve(
        state: &mut GameState,
        events: &mut dyn EventSink,
        source: EntityId,
        controller: PlayerId,
        effect: &EffectSpec,
        target: Option<Target>,
    ) -> Result<(), EngineError> {
        Self::validate(state, source, controller, effect, target)?;
        debug!(%source, %controller, %effect, ?target, "resolving effect");

        let amount = effect.amount.max(0);
        match (effect.kind, target) {
            (EffectKind::DealDamage, Some(target)) => {
                Self::damage(state, events, Some(source), target, amount)?;
            }
            (EffectKind::Heal, Some(target)) => Self::heal(state, events, target, amount)?,
            (EffectKind::ReduceMana, Some(Target::Player(player))) => {
                let drained = state.players[player]
                    .pool
                    .drain_mana(u32::try_from(amount).unwrap_or(u32::MAX));
                events.emit(GameEvent::ManaDrained {
                    player,
                    amount: drained,
                });
            }
            (EffectKind::ApplyDebuff, Some(Target::Card(card))) => {
                Self::shift_attack(state, events, card, effect.kind, -amount)?;
            }
            (EffectKind::DamageIncrease, Some(Target::Card(card))) => {
                Self::shift_attack(state, events, card, effect.kind, amount)?;
            }
            (EffectKind::DamageEnemy, _) => {
                Self::damage(state, events, Some(source), Target::Player(controller.opponent()), amount)?;
            }
            (EffectKind::ReduceDamage, _) => {
                let player = &mut state.players[controller];
                player.damage_reduction += amount;
                events.emit(GameEvent::DamageReductionRaised {
                    player: controller,
                    total: player.damage_reduction,
                });
            }
            (EffectKind::Revival, Some(Target::Card(card))) => {
                state.revive(controller, card)?;
                events.emit(GameEvent::CardRevived {
                    player: controller,
                    card,
                });
            }
            (kind, target) => {
                return Err(EngineError::invariant(format!(
                    "{kind} passed validation with target {target:?}"
                )));
            }
        }

        Self::destroy_lethal(state, events)
    }

    fn damage(
        state: &mut GameState,
        events: &mut dyn EventSink,
        source: Option<EntityId>,
        target: Target,
        amount: i64,
    ) -> Result<(), EngineError> {
        match target {
            Target::Player(player) => {
                state.players[player].lose_life(amount);
            }
            Target::Card(card) => state.card_mut(card)?.damage += amount,
        }
        events.emit(GameEvent::DamageDealt {
            source,
            target,
            amount,
        });
        Ok(())
    }

    fn heal(
        state: &mut GameState,
        events: &mut dyn EventSink,
        target: Target,
        amount: i64,
    ) -> Result<(), EngineError> {
        let healed = match target {
            Target::Player(player) => {
                state.players[player].gain_life(amount);
                amount
            }
            Target::Card(card) => {
                let card = state.card_mut(card)?;
                let healed = amount.min(card.damage);
                card.damage -= healed;
                healed
            }
        };
        events.emit(GameEvent::Healed {
            target,
            amount: healed,
        });
        Ok(())
    }

    fn shift_attack(
        state: &mut GameState,
        events: &mut dyn EventSink,
        card: EntityId,
        kind: EffectKind,
        delta: i64,
    ) -> Result<(), EngineError> {
        state
            .card_mut(card)?
            .modify_until_end_of_turn(&ATTACK.into(), delta);
        events.emit(GameEvent::StatModified {
            card,
            effect: kind,
            delta,
        });
        Ok(())
    }

    /// Move every creature whose damage reached its hit points to its
    /// owner's graveyard.
    pub fn destroy_lethal(state: &mut GameState, events: &mut dyn EventSink) -> Result<(), EngineError> {
        let dead: Vec<(PlayerId, EntityId)> = PlayerId::both()
            .flat_map(|player| {
                state
                    .creatures(player)
                    .filter(|c| c.is_lethally_damaged())
                    .map(move |c| (player, c.entity_id))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (player, card) in dead {
            let detached = state.move_to_graveyard(player, card)?;
            debug!(%player, %card, "creature died");
            events.emit(GameEvent::CardDied { player, card });
            Self::settle_detached(state, events, detached)?;
        }
        Ok(())
    }

    /// Report attachment edges cleared by a zone change, reverting bonuses
    /// when the match is configured to.
    pub fn settle_detached(
        state: &mut GameState,
        events: &mut dyn EventSink,
        detached: Detached,
    ) -> Result<(), EngineError> {
        for (equipment, creature) in detached {
            if state.config.revert_equipment_on_detach {
                equipment::revert_bonus(state, equipment, creature)?;
            }
            events.emit(GameEvent::EquipmentDetached {
                equipment,
                creature,
            });
        }
        Ok(())
    }
}
