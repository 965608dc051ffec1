use serde::{Deserialize, Serialize};

use crate::battle::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    /// Levels and moves can still change
    Setup,
    InProgress,
    /// Holds the winner
    Ended(Side),
}

impl BattleState {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::Ended(winner) => Some(*winner),
            _ => None,
        }
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::Setup
    }
}
