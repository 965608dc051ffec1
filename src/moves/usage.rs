use core::fmt::{Display, Formatter, Result as FmtResult};
use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::{
    message::BattleMessage,
    pokemon::{stat::Health, Combatant},
    random::BattleRandom,
    types::Effective,
};

use super::{crit, damage_range, Accuracy, DamageResult, Move};

/// Accuracy check. A roll in `[0, 100)` hits if it is under the accuracy.
pub fn throw_move(random: &mut (impl BattleRandom + ?Sized), accuracy: Option<Accuracy>) -> bool {
    accuracy
        .map(|accuracy| random.roll() < accuracy as f64)
        .unwrap_or(true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Damage(DamageResult<Health>),
    /// Effect text of a status move
    Status(String),
    Miss,
}

/// Everything that happened when a move was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub used: Move,
    pub result: MoveResult,
    /// Narration, in the order it should be shown
    pub messages: Vec<BattleMessage>,
}

impl MoveOutcome {
    pub fn hit(&self) -> bool {
        !matches!(self.result, MoveResult::Miss)
    }

    pub fn damage(&self) -> Health {
        match &self.result {
            MoveResult::Damage(result) => result.damage,
            _ => 0,
        }
    }

    pub fn crit(&self) -> bool {
        matches!(&self.result, MoveResult::Damage(result) if result.crit)
    }

    pub fn effective(&self) -> Option<Effective> {
        match &self.result {
            MoveResult::Damage(result) => Some(result.effective),
            _ => None,
        }
    }
}

/// Uses the move at `move_index` of `user` on `target`.
///
/// Draws, in order: the accuracy roll (moves that always hit skip it), then for
/// damaging moves the random damage factor and the critical roll.
pub fn resolve<R: BattleRandom + ?Sized>(
    random: &mut R,
    user: &Combatant,
    target: &Combatant,
    move_index: usize,
) -> Result<MoveOutcome, MoveError> {
    if user.fainted() {
        return Err(MoveError::Fainted(user.name.clone()));
    }

    let used = user
        .moves
        .get(move_index)
        .ok_or(MoveError::NoMoveSelected(move_index))?;

    let mut messages = vec![BattleMessage::UsedMove(user.name.clone(), used.name.clone())];

    if !throw_move(random, used.accuracy) {
        messages.push(BattleMessage::Miss);
        log::debug!("{} missed {} with {}", user.name, target.name, used.name);
        return Ok(MoveOutcome {
            used: used.clone(),
            result: MoveResult::Miss,
            messages,
        });
    }

    let result = match used.is_damaging() {
        false => {
            let effect = used.effect_text();
            messages.push(BattleMessage::Status(effect.clone()));
            MoveResult::Status(effect)
        }
        true => {
            let range = damage_range(random);
            let crit = crit(random);
            let result = user.move_power_damage(
                target,
                used.power(),
                used.category,
                used.pokemon_type,
                crit,
                range,
            );

            if result.crit {
                messages.push(BattleMessage::Critical);
            }
            messages.extend(BattleMessage::effective(result.effective, &target.name));
            if !matches!(result.effective, Effective::Ineffective) {
                messages.push(BattleMessage::Damage(target.name.clone(), result.damage));
            }

            log::debug!(
                "{} used {} on {}: {} damage ({}, crit: {}, range: {:.3})",
                user.name,
                used.name,
                target.name,
                result.damage,
                result.effective,
                result.crit,
                range
            );

            MoveResult::Damage(result)
        }
    };

    Ok(MoveOutcome {
        used: used.clone(),
        result,
        messages,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The index does not point at a known move
    NoMoveSelected(usize),
    Fainted(String),
}

impl Error for MoveError {}

impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NoMoveSelected(index) => write!(f, "No move at index {}", index),
            Self::Fainted(name) => write!(f, "{} has fainted and cannot move", name),
        }
    }
}
