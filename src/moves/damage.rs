use serde::{Deserialize, Serialize};

use crate::{
    pokemon::stat::{BaseStat, Health, Level},
    random::BattleRandom,
    types::{Effective, Effectiveness},
};

use super::Power;

/// Chance of a critical hit on any damaging move.
pub const CRIT_CHANCE: f64 = 1.0 / 24.0;
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Same type attack bonus.
pub const STAB_MULTIPLIER: f64 = 1.5;

pub const MIN_RANDOM_FACTOR: f64 = 0.85;
pub const MAX_RANDOM_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult<INT> {
    /// Inflicted damage
    pub damage: INT,
    /// Whether the attack was effective
    pub effective: Effective,
    /// If the attack was a critical hit
    pub crit: bool,
}

impl<INT: Default> Default for DamageResult<INT> {
    fn default() -> Self {
        Self {
            damage: Default::default(),
            effective: Effective::Ineffective,
            crit: false,
        }
    }
}

pub fn crit(random: &mut (impl BattleRandom + ?Sized)) -> bool {
    random.chance(CRIT_CHANCE)
}

pub fn damage_range(random: &mut (impl BattleRandom + ?Sized)) -> f64 {
    random.range(MIN_RANDOM_FACTOR, MAX_RANDOM_FACTOR)
}

pub fn stab(same_type: bool) -> f64 {
    match same_type {
        true => STAB_MULTIPLIER,
        false => 1.0,
    }
}

pub fn crit_multiplier(crit: bool) -> f64 {
    match crit {
        true => CRIT_MULTIPLIER,
        false => 1.0,
    }
}

/// Inputs of the damage formula after every random draw has been made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageParams {
    pub level: Level,
    pub power: Power,
    pub attack: BaseStat,
    pub defense: BaseStat,
    pub effectiveness: Effectiveness,
    pub same_type: bool,
    pub crit: bool,
    pub range: f64,
}

impl DamageParams {
    /// `floor(((2L/5 + 2) * power * atk / def / 50 + 2) * eff * stab * range * crit)`,
    /// at least 1 unless the target is immune.
    pub fn damage(&self) -> Health {
        if self.effectiveness.is_immune() {
            return 0;
        }

        let mut damage = 2.0 * self.level as f64 / 5.0 + 2.0;
        damage *= self.power as f64;
        damage *= self.attack as f64;
        damage /= self.defense.max(1) as f64;
        damage /= 50.0;
        damage += 2.0;

        damage *= self.effectiveness.multiplier() as f64;
        damage *= stab(self.same_type);
        damage *= self.range;
        damage *= crit_multiplier(self.crit);

        (damage.floor() as Health).max(1)
    }

    pub fn result(&self) -> DamageResult<Health> {
        DamageResult {
            damage: self.damage(),
            effective: self.effectiveness.effective(),
            crit: self.crit && !self.effectiveness.is_immune(),
        }
    }
}
