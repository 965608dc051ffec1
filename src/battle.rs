use core::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
};
use std::error::Error;

use enum_map::{Enum, EnumMap};
use hashbrown::HashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    data::{BattleSettings, SpeedTie},
    endpoint::BattleEndpoint,
    message::{BattleLog, BattleMessage, FirstMove, ServerMessage},
    moves::{resolve, MoveError, MoveOutcome},
    pokemon::{
        stat::{Health, Level, StatError, StatType},
        Combatant, CombatantData,
    },
    random::BattleRandom,
    state::BattleState,
};

#[derive(Debug, Clone, Copy, Enum, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const fn other(&self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
        })
    }
}

pub type EndpointId = u32;

/// A one on one battle between two combatants.
///
/// Starts in [`BattleState::Setup`]. [`Battle::start`] picks who moves first,
/// then every [`Battle::act`] resolves one move for whoever's turn it is until
/// a combatant faints.
pub struct Battle {
    state: BattleState,
    settings: BattleSettings,
    turn: Side,
    combatants: EnumMap<Side, Combatant>,
    log: BattleLog,
    endpoints: HashMap<EndpointId, Box<dyn BattleEndpoint + Send>>,
    next_endpoint: EndpointId,
}

/// The result of one call to [`Battle::act`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: Side,
    pub outcome: MoveOutcome,
    /// Set if this move ended the battle
    pub winner: Option<Side>,
}

impl Battle {
    pub fn new(
        settings: BattleSettings,
        first: CombatantData,
        second: CombatantData,
    ) -> Result<Self, BattleError> {
        Ok(Self::from_combatants(
            settings,
            Combatant::new(first)?,
            Combatant::new(second)?,
        ))
    }

    pub fn from_combatants(settings: BattleSettings, first: Combatant, second: Combatant) -> Self {
        let log = BattleLog::new(BattleMessage::Introduce(
            first.name.clone(),
            second.name.clone(),
        ));
        Self {
            state: BattleState::default(),
            settings,
            turn: Side::First,
            combatants: EnumMap::from_array([first, second]),
            log,
            endpoints: Default::default(),
            next_endpoint: 0,
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn settings(&self) -> &BattleSettings {
        &self.settings
    }

    /// Whose move is next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn finished(&self) -> bool {
        matches!(self.state, BattleState::Ended(..))
    }

    pub fn winner(&self) -> Option<&Combatant> {
        self.state.winner().map(|side| self.combatant(side))
    }

    /// Changes a combatant's level, re-deriving its stats and HP.
    pub fn set_level(&mut self, side: Side, level: Level) -> Result<(), BattleError> {
        match self.state {
            BattleState::Setup => {
                self.combatants[side].set_level(level)?;
                debug!("Set {} to level {}", self.combatants[side].name, level);
                self.notify(self.log.len());
                Ok(())
            }
            BattleState::InProgress => Err(BattleError::InProgress),
            BattleState::Ended(..) => Err(BattleError::AlreadyEnded),
        }
    }

    /// Begins the battle and returns who moves first.
    pub fn start<R: BattleRandom + ?Sized>(&mut self, random: &mut R) -> Result<Side, BattleError> {
        match self.state {
            BattleState::Setup => (),
            BattleState::InProgress => return Err(BattleError::InProgress),
            BattleState::Ended(..) => return Err(BattleError::AlreadyEnded),
        }

        for (side, combatant) in self.combatants.iter() {
            if !combatant.is_ready() {
                warn!(
                    "{} cannot battle with {} moves and {} HP",
                    combatant.name,
                    combatant.moves.len(),
                    combatant.hp()
                );
                return Err(BattleError::MissingCombatantData(side));
            }
        }

        let (first, reason) = self.first_move(random);
        let since = self.log.len();

        let [a, b] = [Side::First, Side::Second].map(|side| {
            let combatant = self.combatant(side);
            (combatant.name.clone(), combatant.level())
        });
        self.log.push(BattleMessage::Begin(a, b));
        self.log.push(BattleMessage::MovesFirst(
            self.combatant(first).name.clone(),
            reason,
        ));

        self.turn = first;
        self.state = BattleState::InProgress;

        info!(
            "Battle between {} and {} started, {} moves first",
            self.combatants[Side::First].name,
            self.combatants[Side::Second].name,
            self.combatant(first).name
        );

        self.notify(since);

        Ok(first)
    }

    fn first_move<R: BattleRandom + ?Sized>(&self, random: &mut R) -> (Side, FirstMove) {
        let speed = |side| self.combatant(side).stat(StatType::Speed);
        match speed(Side::First).cmp(&speed(Side::Second)) {
            Ordering::Greater => (Side::First, FirstMove::Faster),
            Ordering::Less => (Side::Second, FirstMove::Faster),
            Ordering::Equal => match self.settings.speed_tie {
                SpeedTie::First => (Side::First, FirstMove::SpeedTie),
                SpeedTie::Random => match random.chance(0.5) {
                    true => (Side::First, FirstMove::SpeedTie),
                    false => (Side::Second, FirstMove::SpeedTie),
                },
            },
        }
    }

    /// Uses the move at `move_index` of whoever's turn it is on the other combatant.
    ///
    /// Errors leave the battle untouched, including the turn.
    pub fn act<R: BattleRandom + ?Sized>(
        &mut self,
        random: &mut R,
        move_index: usize,
    ) -> Result<Turn, BattleError> {
        match self.state {
            BattleState::InProgress => (),
            BattleState::Setup => return Err(BattleError::NotStarted),
            BattleState::Ended(..) => {
                warn!("Cannot use move #{}, the battle has ended", move_index);
                return Err(BattleError::AlreadyEnded);
            }
        }

        let user = self.turn;
        let target = user.other();

        let outcome = resolve(
            random,
            &self.combatants[user],
            &self.combatants[target],
            move_index,
        )?;

        let since = self.log.len();

        let lost = self.combatants[target].damage(outcome.damage());
        self.log.extend(outcome.messages.iter().cloned());

        let winner = match self.combatants[target].fainted() {
            true => {
                self.state = BattleState::Ended(user);
                self.log
                    .push(BattleMessage::Winner(self.combatants[user].name.clone()));
                info!(
                    "{} fainted, {} wins the battle",
                    self.combatants[target].name, self.combatants[user].name
                );
                Some(user)
            }
            false => {
                self.turn = target;
                None
            }
        };

        debug!(
            "{} lost {} HP, {}/{} left",
            self.combatants[target].name,
            lost,
            self.combatants[target].hp(),
            self.combatants[target].max_hp()
        );

        self.notify(since);
        if let Some(winner) = winner {
            self.broadcast(ServerMessage::End(winner));
        }

        Ok(Turn {
            user,
            outcome,
            winner,
        })
    }

    /// Goes back to setup with full HP and a fresh log.
    pub fn reset(&mut self) {
        for combatant in self.combatants.values_mut() {
            combatant.heal();
        }
        self.state = BattleState::Setup;
        self.turn = Side::First;
        self.log = BattleLog::new(BattleMessage::Introduce(
            self.combatants[Side::First].name.clone(),
            self.combatants[Side::Second].name.clone(),
        ));
        debug!("Battle reset");
        self.notify(0);
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            state: self.state,
            turn: self.turn,
            combatants: EnumMap::from_array([Side::First, Side::Second].map(|side| {
                let combatant = self.combatant(side);
                CombatantSnapshot {
                    name: combatant.name.clone(),
                    level: combatant.level(),
                    hp: combatant.hp(),
                    max_hp: combatant.max_hp(),
                }
            })),
            log: self.log.lines().collect(),
        }
    }

    /// Sends every future log entry and snapshot to `endpoint`.
    pub fn subscribe(&mut self, endpoint: impl BattleEndpoint + Send + 'static) -> EndpointId {
        let id = self.next_endpoint;
        self.next_endpoint += 1;
        self.endpoints.insert(id, Box::new(endpoint));
        id
    }

    pub fn unsubscribe(&mut self, id: EndpointId) -> bool {
        self.endpoints.remove(&id).is_some()
    }

    fn notify(&mut self, since: usize) {
        if self.endpoints.is_empty() {
            return;
        }
        let messages = self.log.since(since);
        if !messages.is_empty() {
            self.broadcast(ServerMessage::Log(messages.to_vec()));
        }
        self.broadcast(ServerMessage::Snapshot(self.snapshot()));
    }

    fn broadcast(&mut self, message: ServerMessage) {
        self.endpoints
            .retain(|id, endpoint| match endpoint.send(message.clone()) {
                Ok(()) => true,
                Err(err) => {
                    warn!("Removing endpoint #{}: {}", id, err);
                    false
                }
            });
    }
}

/// Read only view of a battle for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub state: BattleState,
    pub turn: Side,
    pub combatants: EnumMap<Side, CombatantSnapshot>,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub level: Level,
    pub hp: Health,
    pub max_hp: Health,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// No more moves are accepted once a combatant has fainted
    AlreadyEnded,
    NotStarted,
    InProgress,
    /// The combatant cannot battle, because it has no moves or has already fainted
    MissingCombatantData(Side),
    Stat(StatError),
    Move(MoveError),
}

impl Error for BattleError {}

impl Display for BattleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::AlreadyEnded => f.write_str("The battle has already ended"),
            Self::NotStarted => f.write_str("The battle has not started"),
            Self::InProgress => f.write_str("The battle is in progress"),
            Self::MissingCombatantData(side) => {
                write!(f, "The {} combatant has no moves or no HP", side)
            }
            Self::Stat(err) => Display::fmt(err, f),
            Self::Move(err) => Display::fmt(err, f),
        }
    }
}

impl From<StatError> for BattleError {
    fn from(err: StatError) -> Self {
        Self::Stat(err)
    }
}

impl From<MoveError> for BattleError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}
