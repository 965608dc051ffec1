use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{
    battle::{BattleSnapshot, Side},
    pokemon::stat::{Health, Level},
    types::Effective,
};

/// Why a combatant gets the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirstMove {
    Faster,
    SpeedTie,
}

/// A single narrated battle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleMessage {
    /// Names of both combatants
    Introduce(String, String),
    /// Name and level of both combatants
    Begin((String, Level), (String, Level)),
    MovesFirst(String, FirstMove),
    /// User and move name
    UsedMove(String, String),
    Miss,
    Critical,
    SuperEffective,
    NotEffective,
    /// Name of the immune target
    NoEffect(String),
    Damage(String, Health),
    Status(String),
    Winner(String),
}

impl BattleMessage {
    /// The matchup line for a hit on `target`. Neutral hits have none.
    pub fn effective(effective: Effective, target: &str) -> Option<Self> {
        match effective {
            Effective::SuperEffective => Some(Self::SuperEffective),
            Effective::NotEffective => Some(Self::NotEffective),
            Effective::Ineffective => Some(Self::NoEffect(target.to_owned())),
            Effective::Effective => None,
        }
    }
}

impl Display for BattleMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Introduce(a, b) => write!(f, "A battle between {} and {} is about to begin!", a, b),
            Self::Begin((a, a_level), (b, b_level)) => {
                write!(f, "Battle begins! Lv.{} {} vs Lv.{} {}", a_level, a, b_level, b)
            }
            Self::MovesFirst(name, FirstMove::Faster) => {
                write!(f, "{} moves first due to higher speed!", name)
            }
            Self::MovesFirst(name, FirstMove::SpeedTie) => {
                write!(f, "{} moves first by winning the speed tie!", name)
            }
            Self::UsedMove(user, used) => write!(f, "{} used {}!", user, used),
            Self::Miss => f.write_str("But it missed!"),
            Self::Critical => f.write_str("A critical hit!"),
            Self::SuperEffective => f.write_str("It's super effective!"),
            Self::NotEffective => f.write_str("It's not very effective..."),
            Self::NoEffect(target) => write!(f, "It doesn't affect {}...", target),
            Self::Damage(target, damage) => write!(f, "{} took {} damage!", target, damage),
            Self::Status(effect) => f.write_str(effect),
            Self::Winner(name) => write!(f, "{} wins the battle!", name),
        }
    }
}

/// Ordered battle history. Entries are only ever appended.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog(Vec<BattleMessage>);

impl BattleLog {
    pub(crate) fn new(first: BattleMessage) -> Self {
        Self(vec![first])
    }

    pub(crate) fn push(&mut self, message: BattleMessage) {
        log::trace!("{}", message);
        self.0.push(message);
    }

    pub(crate) fn extend(&mut self, messages: impl IntoIterator<Item = BattleMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, BattleMessage> {
        self.0.iter()
    }

    /// Entries from `index` onwards.
    pub fn since(&self, index: usize) -> &[BattleMessage] {
        self.0.get(index..).unwrap_or_default()
    }

    /// Narration lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.0.iter().map(ToString::to_string)
    }
}

impl<'a> IntoIterator for &'a BattleLog {
    type Item = &'a BattleMessage;
    type IntoIter = core::slice::Iter<'a, BattleMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sent to subscribed endpoints as the battle progresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// New log entries
    Log(Vec<BattleMessage>),
    /// State after a change
    Snapshot(BattleSnapshot),
    End(Side),
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn narration() {
        let lines: Vec<String> = [
            BattleMessage::Introduce("bulbasaur".into(), "charmander".into()),
            BattleMessage::Begin(("bulbasaur".into(), 20), ("charmander".into(), 22)),
            BattleMessage::MovesFirst("charmander".into(), FirstMove::Faster),
            BattleMessage::UsedMove("charmander".into(), "ember".into()),
            BattleMessage::Critical,
            BattleMessage::SuperEffective,
            BattleMessage::Damage("bulbasaur".into(), 31),
            BattleMessage::NoEffect("gastly".into()),
            BattleMessage::Winner("charmander".into()),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(
            lines,
            [
                "A battle between bulbasaur and charmander is about to begin!",
                "Battle begins! Lv.20 bulbasaur vs Lv.22 charmander",
                "charmander moves first due to higher speed!",
                "charmander used ember!",
                "A critical hit!",
                "It's super effective!",
                "bulbasaur took 31 damage!",
                "It doesn't affect gastly...",
                "charmander wins the battle!",
            ]
        );
    }

    #[test]
    fn neutral_hits_are_not_narrated() {
        assert_eq!(BattleMessage::effective(Effective::Effective, "onix"), None);
        assert_eq!(
            BattleMessage::effective(Effective::SuperEffective, "onix"),
            Some(BattleMessage::SuperEffective)
        );
        assert_eq!(
            BattleMessage::effective(Effective::NotEffective, "onix"),
            Some(BattleMessage::NotEffective)
        );
        assert_eq!(
            BattleMessage::effective(Effective::Ineffective, "onix").map(|m| m.to_string()),
            Some("It doesn't affect onix...".to_owned())
        );
        assert!(serde_json::from_str::<BattleMessage>(r#"{"Effective":["Effective","onix"]}"#).is_err());
    }

    #[test]
    fn log_appends() {
        let mut log = BattleLog::new(BattleMessage::Miss);
        log.extend([BattleMessage::Critical, BattleMessage::Status("x".into())]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.since(1), &[BattleMessage::Critical, BattleMessage::Status("x".into())]);
        assert!(log.since(5).is_empty());
        assert_eq!(log.lines().next().as_deref(), Some("But it missed!"));
    }
}
