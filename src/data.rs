use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSettings {
    /// Who moves first when both combatants are equally fast
    #[serde(default)]
    pub speed_tie: SpeedTie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTie {
    /// The first combatant always wins the tie
    First,
    /// Coin flip
    Random,
}

impl Default for SpeedTie {
    fn default() -> Self {
        Self::First
    }
}
