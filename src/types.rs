//! Elemental types and the type matchup chart.

use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    iter::once,
    ops::Mul,
};

use enum_map::Enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Enum, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    /// Any type name the chart does not know about.
    #[serde(other)]
    Unknown,
}

/// Number of types with a row and column in the chart.
pub const CHARTED_TYPES: usize = 18;

/// Multiplier of a single attacking type against a single defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Effective {
    Ineffective,
    NotEffective,
    Effective,
    SuperEffective,
}

impl Effective {
    pub const fn multiplier(&self) -> f32 {
        match self {
            Self::Ineffective => 0.0,
            Self::NotEffective => 0.5,
            Self::Effective => 1.0,
            Self::SuperEffective => 2.0,
        }
    }
}

impl Default for Effective {
    fn default() -> Self {
        Self::Effective
    }
}

impl Display for Effective {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Ineffective => "immune",
            Self::NotEffective => "not very effective",
            Self::Effective => "neutral",
            Self::SuperEffective => "super effective",
        })
    }
}

/// Combined multiplier of an attacking type against every type of a defender.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Effectiveness(f32);

impl Effectiveness {
    pub const NEUTRAL: Self = Self(1.0);
    pub const IMMUNE: Self = Self(0.0);

    pub const fn multiplier(&self) -> f32 {
        self.0
    }

    pub fn is_immune(&self) -> bool {
        self.0 == 0.0
    }

    /// Bucket used for narration.
    pub fn effective(&self) -> Effective {
        if self.is_immune() {
            Effective::Ineffective
        } else if self.0 < 1.0 {
            Effective::NotEffective
        } else if self.0 > 1.0 {
            Effective::SuperEffective
        } else {
            Effective::Effective
        }
    }
}

impl Mul<Effective> for Effectiveness {
    type Output = Self;

    fn mul(self, rhs: Effective) -> Self::Output {
        Self(self.0 * rhs.multiplier())
    }
}

impl Display for Effectiveness {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "x{}", self.0)
    }
}

/// One or two distinct types, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "TypesRecord")]
pub struct PokemonTypes {
    pub primary: PokemonType,
    pub secondary: Option<PokemonType>,
}

#[derive(Deserialize)]
struct TypesRecord {
    primary: PokemonType,
    #[serde(default)]
    secondary: Option<PokemonType>,
}

impl From<TypesRecord> for PokemonTypes {
    fn from(record: TypesRecord) -> Self {
        Self::new(record.primary, record.secondary)
    }
}

impl PokemonTypes {
    pub fn new(primary: PokemonType, secondary: Option<PokemonType>) -> Self {
        Self {
            primary,
            secondary: secondary.filter(|secondary| secondary != &primary),
        }
    }

    pub fn single(primary: PokemonType) -> Self {
        Self::new(primary, None)
    }

    pub fn dual(primary: PokemonType, secondary: PokemonType) -> Self {
        Self::new(primary, Some(secondary))
    }

    pub fn iter(&self) -> impl Iterator<Item = PokemonType> {
        once(self.primary).chain(self.secondary)
    }

    pub fn contains(&self, pokemon_type: &PokemonType) -> bool {
        &self.primary == pokemon_type || self.secondary.as_ref() == Some(pokemon_type)
    }
}

impl From<PokemonType> for PokemonTypes {
    fn from(primary: PokemonType) -> Self {
        Self::single(primary)
    }
}

type Row = [Effective; CHARTED_TYPES];

/// The attacking/defending matchup chart. Never mutated.
pub struct TypeChart([Row; CHARTED_TYPES]);

pub static TYPE_CHART: TypeChart = TypeChart::new();

impl TypeChart {
    const fn new() -> Self {
        let mut chart = [[Effective::Effective; CHARTED_TYPES]; CHARTED_TYPES];
        let mut i = 0;
        while i < MATCHUPS.len() {
            let (attack, defend, effective) = MATCHUPS[i];
            chart[attack as usize][defend as usize] = effective;
            i += 1;
        }
        Self(chart)
    }

    fn row(&self, attack: PokemonType) -> Option<&Row> {
        self.0.get(attack as usize)
    }

    pub fn get(&self, attack: PokemonType, defend: PokemonType) -> Effective {
        self.row(attack)
            .and_then(|row| row.get(defend as usize))
            .copied()
            .unwrap_or_default()
    }

    /// Product of the multipliers of `attack` against each defending type.
    /// An attacking type without a row is neutral against everything.
    pub fn effectiveness(
        &self,
        attack: PokemonType,
        defending: impl IntoIterator<Item = PokemonType>,
    ) -> Effectiveness {
        match self.row(attack) {
            Some(..) => defending
                .into_iter()
                .fold(Effectiveness::NEUTRAL, |effectiveness, defend| {
                    effectiveness * self.get(attack, defend)
                }),
            None => Effectiveness::NEUTRAL,
        }
    }
}

pub fn effectiveness(attack: PokemonType, defending: &PokemonTypes) -> Effectiveness {
    TYPE_CHART.effectiveness(attack, defending.iter())
}

impl PokemonType {
    pub fn effective(&self, defend: PokemonType) -> Effective {
        TYPE_CHART.get(*self, defend)
    }
}

impl Display for PokemonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
            Self::Unknown => "unknown",
        })
    }
}

use Effective::{Ineffective as I, NotEffective as N, SuperEffective as S};
use PokemonType::*;

/// Every matchup that is not neutral.
const MATCHUPS: &[(PokemonType, PokemonType, Effective)] = &[
    (Normal, Rock, N),
    (Normal, Ghost, I),
    (Normal, Steel, N),
    (Fire, Fire, N),
    (Fire, Water, N),
    (Fire, Grass, S),
    (Fire, Ice, S),
    (Fire, Bug, S),
    (Fire, Rock, N),
    (Fire, Dragon, N),
    (Fire, Steel, S),
    (Water, Fire, S),
    (Water, Water, N),
    (Water, Grass, N),
    (Water, Ground, S),
    (Water, Rock, S),
    (Water, Dragon, N),
    (Electric, Water, S),
    (Electric, Electric, N),
    (Electric, Grass, N),
    (Electric, Ground, I),
    (Electric, Flying, S),
    (Electric, Dragon, N),
    (Grass, Fire, N),
    (Grass, Water, S),
    (Grass, Grass, N),
    (Grass, Poison, N),
    (Grass, Ground, S),
    (Grass, Flying, N),
    (Grass, Bug, N),
    (Grass, Rock, S),
    (Grass, Dragon, N),
    (Grass, Steel, N),
    (Ice, Fire, N),
    (Ice, Water, N),
    (Ice, Grass, S),
    (Ice, Ice, N),
    (Ice, Ground, S),
    (Ice, Flying, S),
    (Ice, Dragon, S),
    (Ice, Steel, N),
    (Fighting, Normal, S),
    (Fighting, Ice, S),
    (Fighting, Poison, N),
    (Fighting, Flying, N),
    (Fighting, Psychic, N),
    (Fighting, Bug, N),
    (Fighting, Rock, S),
    (Fighting, Ghost, I),
    (Fighting, Dark, S),
    (Fighting, Steel, S),
    (Fighting, Fairy, N),
    (Poison, Grass, S),
    (Poison, Poison, N),
    (Poison, Ground, N),
    (Poison, Rock, N),
    (Poison, Ghost, N),
    (Poison, Steel, I),
    (Poison, Fairy, S),
    (Ground, Fire, S),
    (Ground, Electric, S),
    (Ground, Grass, N),
    (Ground, Poison, S),
    (Ground, Flying, I),
    (Ground, Bug, N),
    (Ground, Rock, S),
    (Ground, Steel, S),
    (Flying, Electric, N),
    (Flying, Grass, S),
    (Flying, Fighting, S),
    (Flying, Bug, S),
    (Flying, Rock, N),
    (Flying, Steel, N),
    (Psychic, Fighting, S),
    (Psychic, Poison, S),
    (Psychic, Psychic, N),
    (Psychic, Dark, I),
    (Psychic, Steel, N),
    (Bug, Fire, N),
    (Bug, Grass, S),
    (Bug, Fighting, N),
    (Bug, Poison, N),
    (Bug, Flying, N),
    (Bug, Psychic, S),
    (Bug, Ghost, N),
    (Bug, Dark, S),
    (Bug, Steel, N),
    (Bug, Fairy, N),
    (Rock, Fire, S),
    (Rock, Ice, S),
    (Rock, Fighting, N),
    (Rock, Ground, N),
    (Rock, Flying, S),
    (Rock, Bug, S),
    (Rock, Steel, N),
    (Ghost, Normal, I),
    (Ghost, Psychic, S),
    (Ghost, Ghost, S),
    (Ghost, Dark, N),
    (Dragon, Dragon, S),
    (Dragon, Steel, N),
    (Dragon, Fairy, I),
    (Dark, Fighting, N),
    (Dark, Psychic, S),
    (Dark, Ghost, S),
    (Dark, Dark, N),
    (Dark, Fairy, N),
    (Steel, Fire, N),
    (Steel, Water, N),
    (Steel, Electric, N),
    (Steel, Ice, S),
    (Steel, Rock, S),
    (Steel, Steel, N),
    (Steel, Fairy, S),
    (Fairy, Fighting, S),
    (Fairy, Poison, N),
    (Fairy, Bug, N),
    (Fairy, Dragon, S),
    (Fairy, Dark, S),
    (Fairy, Steel, N),
];

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn single_type() {
        assert_eq!(Fire.effective(Grass), Effective::SuperEffective);
        assert_eq!(Fire.effective(Water), Effective::NotEffective);
        assert_eq!(Normal.effective(Ghost), Effective::Ineffective);
        assert_eq!(Normal.effective(Normal), Effective::Effective);
        // Bug attacks ghost at half strength in this chart
        assert_eq!(Bug.effective(Ghost), Effective::NotEffective);
    }

    #[test]
    fn product_rule() {
        let gyarados = PokemonTypes::dual(Water, Flying);
        let e = effectiveness(Electric, &gyarados);
        assert_eq!(e.multiplier(), 4.0);
        assert_eq!(
            e.multiplier(),
            Electric.effective(Water).multiplier() * Electric.effective(Flying).multiplier()
        );
        assert_eq!(e.effective(), Effective::SuperEffective);

        let ferrothorn = PokemonTypes::dual(Grass, Steel);
        assert_eq!(effectiveness(Grass, &ferrothorn).multiplier(), 0.25);
        assert_eq!(effectiveness(Fire, &ferrothorn).multiplier(), 4.0);

        let swampert = PokemonTypes::dual(Water, Ground);
        let e = effectiveness(Electric, &swampert);
        assert!(e.is_immune());
        assert_eq!(e.effective(), Effective::Ineffective);

        let skarmory = PokemonTypes::dual(Steel, Flying);
        assert_eq!(effectiveness(Electric, &skarmory).multiplier(), 2.0);
        assert_eq!(effectiveness(Fighting, &skarmory).multiplier(), 1.0);
        assert_eq!(effectiveness(Fighting, &skarmory).effective(), Effective::Effective);
    }

    #[test]
    fn order_does_not_change_product() {
        for attack in [Fire, Water, Grass, Ground, Ice, Fighting] {
            let a = effectiveness(attack, &PokemonTypes::dual(Rock, Flying));
            let b = effectiveness(attack, &PokemonTypes::dual(Flying, Rock));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unknown_type_is_neutral() {
        assert_eq!(
            effectiveness(Unknown, &PokemonTypes::dual(Water, Ground)),
            Effectiveness::NEUTRAL
        );
        assert_eq!(effectiveness(Fire, &PokemonTypes::single(Unknown)), Effectiveness::NEUTRAL);
    }

    #[test]
    fn duplicate_secondary_is_dropped() {
        let types = PokemonTypes::dual(Fire, Fire);
        assert_eq!(types.secondary, None);
        assert_eq!(effectiveness(Water, &types).multiplier(), 2.0);
    }

    #[test]
    fn deserialize_names() {
        let types: PokemonTypes =
            serde_json::from_str(r#"{"primary":"water","secondary":"shadow"}"#).unwrap();
        assert_eq!(types.primary, Water);
        assert_eq!(types.secondary, Some(Unknown));

        let types: PokemonTypes = serde_json::from_str(r#"{"primary":"ghost"}"#).unwrap();
        assert_eq!(types, PokemonTypes::single(Ghost));

        let types: PokemonTypes =
            serde_json::from_str(r#"{"primary":"fire","secondary":"fire"}"#).unwrap();
        assert_eq!(types.secondary, None);
        assert_eq!(effectiveness(Water, &types).multiplier(), 2.0);
    }
}
