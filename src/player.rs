//! Control of the external media player.
//!
//! The player runs in its own process and is driven over a JSON IPC socket.
//! Everything here treats it as unreliable: it may not be running, may not
//! have created its socket yet, or may die at any time. Commands therefore
//! return errors that callers are expected to log and otherwise ignore.

mod channel;
mod mpv;
mod process;
mod protocol;

pub use mpv::{MpvOptions, MpvPlayer};
pub use protocol::{Command, Response};

use crate::error::PlayerError;

/// Playback progress in seconds.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position {
    pub elapsed: f64,
    pub duration: f64,
}

impl Position {
    pub const ZERO: Self = Self {
        elapsed: 0.0,
        duration: 0.0,
    };

    /// Fraction played in `0.0..=1.0`; zero when the duration is unknown.
    pub fn ratio(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// True within the last second of a track of known length.
    pub fn is_near_end(&self) -> bool {
        self.duration > 0.0 && self.elapsed >= self.duration - 1.0
    }
}

/// Lifecycle and transport of one player session at a time.
///
/// `Stopped -> start -> Running -> (exit | stop | stop_and_persist) -> Stopped`.
pub trait Player {
    /// Stop any current session and launch a new one playing `target`.
    fn start(&mut self, target: &str, volume: u8) -> Result<(), PlayerError>;

    /// Terminate the session, if any. Safe to call repeatedly.
    fn stop(&mut self);

    /// Ask the player to save its resume position, then stop.
    fn stop_and_persist(&mut self);

    /// Send one command and wait (briefly) for its reply.
    fn send(&self, command: &Command) -> Result<Response, PlayerError>;

    /// Current progress, or [`Position::ZERO`] when unknown.
    fn position(&self) -> Position;

    fn is_running(&self) -> bool;
}
