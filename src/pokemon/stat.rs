use core::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::{Deref, DerefMut, RangeInclusive},
};
use std::error::Error;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

pub type BaseStat = u16;
pub type Health = u16;
pub type Level = u8;

pub const LEVEL_RANGE: RangeInclusive<Level> = 5..=100;

#[derive(Debug, Clone, Copy, Enum, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatType {
    Health,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

/// Six stats keyed by [`StatType`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSet(EnumMap<StatType, BaseStat>);

impl StatSet {
    pub fn new(
        hp: BaseStat,
        atk: BaseStat,
        def: BaseStat,
        sp_atk: BaseStat,
        sp_def: BaseStat,
        speed: BaseStat,
    ) -> Self {
        Self(EnumMap::from_array([hp, atk, def, sp_atk, sp_def, speed]))
    }

    pub fn uniform(stat: BaseStat) -> Self {
        Self(EnumMap::from_array([stat; 6]))
    }

    /// Combat stats at `level`.
    pub fn derive(&self, level: Level) -> Result<Self, StatError> {
        let mut derived = Self::default();
        for (stat, base) in self.0.iter() {
            derived[stat] = match stat {
                StatType::Health => derive_hp(*base, level)?,
                _ => derive_stat(*base, level)?,
            };
        }
        Ok(derived)
    }
}

impl Deref for StatSet {
    type Target = EnumMap<StatType, BaseStat>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StatSet {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub fn check_level(level: Level) -> Result<Level, StatError> {
    match LEVEL_RANGE.contains(&level) {
        true => Ok(level),
        false => Err(StatError::InvalidLevel(level)),
    }
}

/// `floor(2 * base * level / 100 + level + 10)`
pub fn derive_hp(base: BaseStat, level: Level) -> Result<Health, StatError> {
    let level = check_level(level)? as u32;
    Health::try_from(2 * base as u32 * level / 100 + level + 10)
        .map_err(|_| StatError::Overflow(base))
}

/// `floor(2 * base * level / 100 + 5)`
pub fn derive_stat(base: BaseStat, level: Level) -> Result<BaseStat, StatError> {
    let level = check_level(level)? as u32;
    BaseStat::try_from(2 * base as u32 * level / 100 + 5).map_err(|_| StatError::Overflow(base))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatError {
    InvalidLevel(Level),
    /// The derived value does not fit in a stat.
    Overflow(BaseStat),
}

impl Error for StatError {}

impl Display for StatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidLevel(level) => write!(
                f,
                "Level {} is outside of {}..={}",
                level,
                LEVEL_RANGE.start(),
                LEVEL_RANGE.end()
            ),
            Self::Overflow(base) => write!(f, "Base stat {} is too large to derive", base),
        }
    }
}

impl Display for StatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn formulas() {
        assert_eq!(derive_hp(100, 50), Ok(160));
        assert_eq!(derive_stat(100, 50), Ok(105));
        assert_eq!(derive_hp(45, 5), Ok(19));
        assert_eq!(derive_stat(49, 5), Ok(9));
        assert_eq!(derive_hp(255, 100), Ok(620));
    }

    #[test]
    fn invalid_level() {
        assert_eq!(derive_hp(100, 4), Err(StatError::InvalidLevel(4)));
        assert_eq!(derive_stat(100, 101), Err(StatError::InvalidLevel(101)));
        assert!(StatSet::uniform(50).derive(0).is_err());
    }

    #[test]
    fn overflow() {
        assert_eq!(derive_stat(32765, 100), Ok(BaseStat::MAX));
        assert_eq!(derive_stat(32766, 100), Err(StatError::Overflow(32766)));
        assert_eq!(derive_stat(40000, 100), Err(StatError::Overflow(40000)));
        assert_eq!(derive_hp(40000, 100), Err(StatError::Overflow(40000)));
        assert_eq!(derive_hp(BaseStat::MAX, 5), Ok(6568));
        assert_eq!(
            StatSet::uniform(40000).derive(100),
            Err(StatError::Overflow(40000))
        );
    }

    #[test]
    fn monotonic() {
        for base in [1, 2, 30, 77, 100, 180, 254] {
            let mut hp = 0;
            let mut stat = 0;
            for level in LEVEL_RANGE {
                let next_hp = derive_hp(base, level).unwrap();
                let next_stat = derive_stat(base, level).unwrap();
                assert!(next_hp >= hp, "hp decreased at base {} level {}", base, level);
                assert!(next_stat >= stat, "stat decreased at base {} level {}", base, level);
                assert!(derive_hp(base + 1, level).unwrap() >= next_hp);
                assert!(derive_stat(base + 1, level).unwrap() >= next_stat);
                hp = next_hp;
                stat = next_stat;
            }
        }
    }

    #[test]
    fn derive_set() {
        let base = StatSet::new(85, 105, 100, 79, 83, 78);
        let derived = base.derive(50).unwrap();
        assert_eq!(derived[StatType::Health], 145);
        assert_eq!(derived[StatType::Attack], 110);
        assert_eq!(derived[StatType::Defense], 105);
        assert_eq!(derived[StatType::SpAttack], 84);
        assert_eq!(derived[StatType::SpDefense], 88);
        assert_eq!(derived[StatType::Speed], 83);
    }
}
