//! Turn-based Pokemon duel resolution
//!
//! Two [`pokemon::Combatant`]s with derived stats and up to four moves take turns in a
//! [`battle::Battle`] until one of them faints. Species and move data come from the caller;
//! the engine handles turn order, accuracy, damage, type matchups and narration.

mod data;
pub use data::*;

pub mod battle;
pub mod endpoint;
pub mod message;
pub mod moves;
pub mod pokemon;
pub mod random;
pub mod state;
pub mod types;

pub mod prelude {

    #[cfg(feature = "mpsc_endpoint")]
    pub use crate::endpoint::{MpscClient, MpscEndpoint};

    pub use crate::battle::{Battle, BattleError, BattleSnapshot, Side, Turn};
    pub use crate::endpoint::BattleEndpoint;
    pub use crate::message::{BattleMessage, ServerMessage};
    pub use crate::moves::{Move, MoveCategory, MoveOutcome, MoveResult};
    pub use crate::pokemon::{
        stat::{Level, StatSet, StatType},
        Combatant, CombatantData, MoveSet,
    };
    pub use crate::random::BattleRandom;
    pub use crate::state::BattleState;
    pub use crate::types::{PokemonType, PokemonTypes};
    pub use crate::{BattleSettings, SpeedTie};
}
