use core::fmt::{Display, Formatter, Result as FmtResult};
use std::error::Error;

use crate::message::ServerMessage;

/// Receives battle events as they happen.
pub trait BattleEndpoint {
    fn send(&mut self, message: ServerMessage) -> Result<(), ConnectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionError {
    Disconnected,
}

impl Error for ConnectionError {}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Endpoint disconnected")
    }
}

#[cfg(feature = "mpsc_endpoint")]
pub use mpsc::*;

#[cfg(feature = "mpsc_endpoint")]
mod mpsc {

    use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError, TrySendError};

    use crate::message::ServerMessage;

    use super::{BattleEndpoint, ConnectionError};

    pub fn create() -> (MpscEndpoint, MpscClient) {
        let (sender, receiver) = unbounded();
        (MpscEndpoint { sender }, MpscClient { receiver })
    }

    #[derive(Clone)]
    pub struct MpscEndpoint {
        pub sender: Sender<ServerMessage>,
    }

    #[derive(Clone)]
    pub struct MpscClient {
        pub receiver: Receiver<ServerMessage>,
    }

    impl BattleEndpoint for MpscEndpoint {
        fn send(&mut self, message: ServerMessage) -> Result<(), ConnectionError> {
            match self.sender.try_send(message) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(..)) => unreachable!(),
                Err(TrySendError::Disconnected(..)) => Err(ConnectionError::Disconnected),
            }
        }
    }

    impl MpscClient {
        pub fn receive(&self) -> Result<Option<ServerMessage>, ConnectionError> {
            match self.receiver.try_recv() {
                Ok(m) => Ok(Some(m)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(ConnectionError::Disconnected),
            }
        }

        /// Everything received so far.
        pub fn drain(&self) -> Vec<ServerMessage> {
            self.receiver.try_iter().collect()
        }
    }

}
