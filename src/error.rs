//! Error types shared across the player and session layers.
//!
//! Neither kind of error is ever shown to the user: player errors mean
//! "the command did not take effect" and session errors mean "the state file
//! could not be read or written". Callers log them and carry on.

use std::io;

use thiserror::Error;

/// Failures talking to (or launching) the external player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The player binary could not be spawned.
    #[error("failed to launch player: {0}")]
    Launch(#[source] io::Error),

    /// The control socket is absent or refused the connection.
    #[error("control channel unavailable: {0}")]
    Unavailable(#[source] io::Error),

    /// The player did not answer within the IPC timeout.
    #[error("player did not respond in time")]
    Timeout,

    /// The player answered with something that is not a response object.
    #[error("malformed player response: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The player reported an error for the command.
    #[error("player rejected command: {0}")]
    Rejected(String),
}

impl PlayerError {
    /// Map an I/O error from the socket to either a timeout or unavailability.
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Unavailable(err),
        }
    }
}

/// Failures reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
