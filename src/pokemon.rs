use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
};

use serde::{Deserialize, Serialize};

use crate::{
    moves::{DamageParams, DamageResult, Move, MoveCategory, Power},
    types::{self, PokemonType, PokemonTypes},
};

pub mod stat;
use stat::{BaseStat, Health, Level, StatError, StatSet, StatType};

mod level;
pub use level::*;

pub type PokemonId = u16;

/// Most moves a combatant can know.
pub const MAX_MOVES: usize = 4;

/// Ordered set of up to [`MAX_MOVES`] moves.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Move>", into = "Vec<Move>")]
pub struct MoveSet(Vec<Move>);

impl MoveSet {
    /// Adds a move, returning it back if the set is full.
    pub fn add(&mut self, m: Move) -> Result<(), Move> {
        match self.0.len() < MAX_MOVES {
            true => {
                self.0.push(m);
                Ok(())
            }
            false => Err(m),
        }
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_MOVES
    }
}

impl From<Vec<Move>> for MoveSet {
    fn from(mut moves: Vec<Move>) -> Self {
        if moves.len() > MAX_MOVES {
            log::warn!(
                "Dropping {} moves past the limit of {}",
                moves.len() - MAX_MOVES,
                MAX_MOVES
            );
            moves.truncate(MAX_MOVES);
        }
        Self(moves)
    }
}

impl From<MoveSet> for Vec<Move> {
    fn from(moves: MoveSet) -> Self {
        moves.0
    }
}

impl FromIterator<Move> for MoveSet {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl Deref for MoveSet {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A fully resolved combatant record, as supplied by whatever loads species and move data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantData {
    #[serde(default)]
    pub id: PokemonId,
    pub name: String,
    pub types: PokemonTypes,
    pub level: Level,
    pub base: StatSet,
    #[serde(default)]
    pub moves: MoveSet,
}

/// A pokemon taking part in a battle.
///
/// Deserializes from a [`CombatantData`] record, so stats are always derived and HP starts full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CombatantData")]
pub struct Combatant {
    pub id: PokemonId,
    pub name: String,
    pub types: PokemonTypes,
    level: Level,
    base: StatSet,
    stats: StatSet,
    hp: Health,
    pub moves: MoveSet,
}

impl Combatant {
    pub fn new(data: CombatantData) -> Result<Self, StatError> {
        let stats = data.base.derive(data.level)?;
        Ok(Self {
            id: data.id,
            name: data.name,
            types: data.types,
            level: data.level,
            base: data.base,
            hp: stats[StatType::Health],
            stats,
            moves: data.moves,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn base(&self) -> &StatSet {
        &self.base
    }

    /// Derived stats at the current level.
    pub fn stats(&self) -> &StatSet {
        &self.stats
    }

    pub fn stat(&self, stat: StatType) -> BaseStat {
        self.stats[stat]
    }

    /// Changes the level and re-derives every stat. HP is refilled.
    pub fn set_level(&mut self, level: Level) -> Result<(), StatError> {
        self.stats = self.base.derive(level)?;
        self.level = level;
        self.heal();
        Ok(())
    }

    pub fn hp(&self) -> Health {
        self.hp
    }

    pub fn max_hp(&self) -> Health {
        self.stats[StatType::Health]
    }

    pub fn percent_hp(&self) -> f32 {
        self.hp as f32 / self.max_hp() as f32
    }

    pub fn fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn heal(&mut self) {
        self.hp = self.max_hp();
    }

    /// Lowers HP, stopping at 0. Returns the HP actually lost.
    pub fn damage(&mut self, damage: Health) -> Health {
        let lost = damage.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn has_type(&self, pokemon_type: &PokemonType) -> bool {
        self.types.contains(pokemon_type)
    }

    pub fn move_power_damage(
        &self,
        target: &Self,
        power: Power,
        category: MoveCategory,
        move_type: PokemonType,
        crit: bool,
        range: f64,
    ) -> DamageResult<Health> {
        let (attack, defense) = match category.stats() {
            Some(stats) => stats,
            None => return DamageResult::default(),
        };
        DamageParams {
            level: self.level,
            power,
            attack: self.stat(attack),
            defense: target.stat(defense),
            effectiveness: types::effectiveness(move_type, &target.types),
            same_type: self.has_type(&move_type),
            crit,
            range,
        }
        .result()
    }

    /// Checks the combatant can start a battle: it needs a move and some HP.
    pub fn is_ready(&self) -> bool {
        !self.moves.is_empty() && !self.fainted()
    }
}

impl TryFrom<CombatantData> for Combatant {
    type Error = StatError;

    fn try_from(data: CombatantData) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl Display for Combatant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {

    use super::*;
    use crate::{moves::MoveCategory, types::PokemonType};

    pub fn tackle() -> Move {
        Move::new("tackle", PokemonType::Normal, MoveCategory::Physical, Some(40), Some(100))
    }

    pub fn feraligatr(level: Level) -> CombatantData {
        CombatantData {
            id: 160,
            name: "feraligatr".to_owned(),
            types: PokemonTypes::single(PokemonType::Water),
            level,
            base: StatSet::new(85, 105, 100, 79, 83, 78),
            moves: vec![
                Move::new("crunch", PokemonType::Dark, MoveCategory::Physical, Some(80), Some(100)),
                Move::new("aqua-tail", PokemonType::Water, MoveCategory::Physical, Some(90), Some(90)),
                Move::new("scary-face", PokemonType::Normal, MoveCategory::Status, None, Some(100))
                    .with_effect("Lowers the target's Speed by two stages.", None),
                tackle(),
            ]
            .into(),
        }
    }

    pub fn geodude(level: Level) -> CombatantData {
        CombatantData {
            id: 74,
            name: "geodude".to_owned(),
            types: PokemonTypes::dual(PokemonType::Rock, PokemonType::Ground),
            level,
            base: StatSet::new(40, 80, 100, 30, 30, 20),
            moves: vec![
                tackle(),
                Move::new("rock-throw", PokemonType::Rock, MoveCategory::Physical, Some(50), Some(90)),
            ]
            .into(),
        }
    }

    #[test]
    fn derive_on_new() {
        let p = Combatant::new(feraligatr(50)).unwrap();
        assert_eq!(p.max_hp(), 145);
        assert_eq!(p.hp(), 145);
        assert_eq!(p.stat(StatType::Attack), 110);
        assert!(Combatant::new(feraligatr(3)).is_err());
    }

    #[test]
    fn set_level() {
        let mut p = Combatant::new(geodude(10)).unwrap();
        p.damage(5);
        p.set_level(30).unwrap();
        assert_eq!(p.level(), 30);
        assert_eq!(p.max_hp(), derive(40, 30));
        assert_eq!(p.hp(), p.max_hp());
        assert_eq!(p.set_level(101), Err(StatError::InvalidLevel(101)));
        assert_eq!(p.level(), 30);

        fn derive(base: BaseStat, level: Level) -> Health {
            stat::derive_hp(base, level).unwrap()
        }
    }

    #[test]
    fn damage_clamps() {
        let mut p = Combatant::new(geodude(10)).unwrap();
        let max = p.max_hp();
        assert_eq!(p.damage(3), 3);
        assert_eq!(p.hp(), max - 3);
        assert_eq!(p.damage(Health::MAX), max - 3);
        assert_eq!(p.hp(), 0);
        assert!(p.fainted());
    }

    #[test]
    fn move_set_limit() {
        let mut moves: MoveSet = std::iter::repeat_with(tackle).take(6).collect();
        assert_eq!(moves.len(), MAX_MOVES);
        assert!(moves.is_full());
        assert!(moves.add(tackle()).is_err());
    }

    #[test]
    fn immune_target() {
        let user = Combatant::new(feraligatr(50)).unwrap();
        let mut target = Combatant::new(geodude(50)).unwrap();
        target.types = PokemonTypes::single(PokemonType::Ghost);
        let result = user.move_power_damage(
            &target,
            40,
            MoveCategory::Physical,
            PokemonType::Normal,
            false,
            1.0,
        );
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn deserialize_record() {
        let data: CombatantData = serde_json::from_str(
            r#"{
                "id": 25,
                "name": "pikachu",
                "types": { "primary": "electric" },
                "level": 20,
                "base": { "health": 35, "attack": 55, "defense": 40, "sp-attack": 50, "sp-defense": 50, "speed": 90 },
                "moves": [
                    { "name": "thunder-shock", "type": "electric", "damageClass": "special", "power": 40, "accuracy": 100,
                      "effect": "Has a $effect_chance% chance to paralyze the target.", "effectChance": 10 }
                ]
            }"#,
        )
        .unwrap();
        let pikachu = Combatant::new(data).unwrap();
        assert_eq!(pikachu.stat(StatType::Speed), 41);
        assert_eq!(pikachu.moves[0].effect_text(), "Has a 10% chance to paralyze the target.");
    }

    #[test]
    fn deserialize_rederives() {
        let mut p = Combatant::new(geodude(50)).unwrap();
        p.damage(10);
        let mut value = serde_json::to_value(&p).unwrap();
        value["hp"] = 60000.into();
        value["stats"]["attack"] = 999.into();

        let loaded: Combatant = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(loaded.hp(), loaded.max_hp());
        assert_eq!(loaded.stats(), &loaded.base().derive(50).unwrap());
        assert_eq!(loaded.stat(StatType::Attack), 85);

        value["level"] = 101.into();
        assert!(serde_json::from_value::<Combatant>(value).is_err());
    }
}
