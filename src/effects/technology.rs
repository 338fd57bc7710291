//! Technology activation.
//!
//! A technology on the battlefield resolves its effect list when activated.
//! All targets are chosen and validated before anything changes, so a
//! refused activation leaves the state untouched. Single-use technology is
//! discarded afterwards; reusable technology taps.

use smallvec::SmallVec;
use tracing::debug;

use super::effect::EffectSpec;
use super::resolver::EffectResolver;
use super::targeting::{eligible_targets, Target};
use crate::cards::{CardCategory, CardKind};
use crate::core::{EngineError, EntityId, GameState, PlayerId};
use crate::rules::{pick_target, DecisionProvider};
use crate::triggers::{EventSink, GameEvent};
use crate::zones::Zone;

fn program(state: &GameState, technology: EntityId) -> Result<(Vec<EffectSpec>, bool), EngineError> {
    let card = state.card(technology)?;
    match &card.definition.kind {
        CardKind::Technology { effects, single_use } => Ok((effects.clone(), *single_use)),
        _ => Err(EngineError::WrongCategory {
            card: technology,
            expected: CardCategory::Technology,
            found: card.category(),
        }),
    }
}

/// Could `player` activate `technology` right now?
pub fn check_activation(state: &GameState, player: PlayerId, technology: EntityId) -> Result<(), EngineError> {
    state.zones().expect_in(player, technology, Zone::Battlefield)?;
    let (effects, _) = program(state, technology)?;
    if state.card(technology)?.tapped {
        return Err(EngineError::CardTapped { card: technology });
    }
    let stranded = effects
        .iter()
        .any(|e| e.requirement().needs_target() && eligible_targets(state, player, e.requirement()).is_empty());
    if stranded {
        return Err(EngineError::NoLegalTarget { card: technology });
    }
    Ok(())
}

/// Activate `technology` for `player`.
pub fn activate(
    state: &mut GameState,
    decisions: &mut dyn DecisionProvider,
    events: &mut dyn EventSink,
    player: PlayerId,
    technology: EntityId,
) -> Result<(), EngineError> {
    check_activation(state, player, technology)?;
    let (effects, single_use) = program(state, technology)?;

    let mut targets: SmallVec<[Option<Target>; 4]> = SmallVec::new();
    for effect in &effects {
        let requirement = effect.requirement();
        let target = if requirement.needs_target() {
            let eligible = eligible_targets(state, player, requirement);
            let picked = pick_target(state, decisions, events, player, technology, requirement, &eligible);
            Some(picked.ok_or(EngineError::NoLegalTarget { card: technology })?)
        } else {
            None
        };
        EffectResolver::validate(state, technology, player, effect, target)?;
        targets.push(target);
    }

    debug!(%player, %technology, single_use, "technology activated");
    events.emit(GameEvent::TechnologyActivated {
        player,
        card: technology,
    });
    for (effect, target) in effects.iter().zip(targets) {
        // Earlier effects can remove a later target; such effects fizzle.
        match EffectResolver::resolve(state, events, technology, player, effect, target) {
            Ok(()) => {}
            Err(EngineError::IneligibleTarget { .. }) => {
                debug!(%technology, %effect, "target gone, effect fizzles");
            }
            Err(e) => return Err(e),
        }
    }

    if state.card(technology)?.zone == Zone::Battlefield {
        if single_use {
            let detached = state.move_to_graveyard(player, technology)?;
            EffectResolver::settle_detached(state, events, detached)?;
        } else {
            state.card_mut(technology)?.tap();
        }
    }
    Ok(())
}
