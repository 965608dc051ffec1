use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{pokemon::stat::StatType, types::PokemonType};

pub mod damage;
pub use damage::*;

pub mod usage;
pub use usage::*;

pub type Power = u8;
pub type Accuracy = u8;
pub type Percent = u8;

/// Power of a move whose record has none.
pub const DEFAULT_POWER: Power = 40;

/// Placeholder in effect text replaced with the effect chance.
pub const EFFECT_CHANCE: &str = "$effect_chance";

pub const NO_EFFECT: &str = "No effect description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// Attacking and defending stat for damaging categories.
    pub fn stats(&self) -> Option<(StatType, StatType)> {
        match self {
            Self::Physical => Some((StatType::Attack, StatType::Defense)),
            Self::Special => Some((StatType::SpAttack, StatType::SpDefense)),
            Self::Status => None,
        }
    }
}

impl Default for MoveCategory {
    fn default() -> Self {
        Self::Physical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,
    #[serde(default, alias = "damageClass")]
    pub category: MoveCategory,
    /// [`DEFAULT_POWER`] if absent
    #[serde(default)]
    pub power: Option<Power>,
    /// Always hits if absent
    #[serde(default)]
    pub accuracy: Option<Accuracy>,
    #[serde(default = "no_effect")]
    pub effect: String,
    #[serde(default)]
    pub effect_chance: Option<Percent>,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        pokemon_type: PokemonType,
        category: MoveCategory,
        power: Option<Power>,
        accuracy: Option<Accuracy>,
    ) -> Self {
        Self {
            name: name.into(),
            pokemon_type,
            category,
            power,
            accuracy,
            effect: no_effect(),
            effect_chance: None,
        }
    }

    pub fn with_effect(mut self, effect: impl Into<String>, chance: Option<Percent>) -> Self {
        self.effect = effect.into();
        self.effect_chance = chance;
        self
    }

    pub fn power(&self) -> Power {
        self.power.unwrap_or(DEFAULT_POWER)
    }

    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status)
    }

    /// Effect description with the effect chance filled in.
    pub fn effect_text(&self) -> String {
        self.effect
            .replace(EFFECT_CHANCE, &self.effect_chance.unwrap_or(0).to_string())
    }
}

fn no_effect() -> String {
    NO_EFFECT.to_owned()
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}
