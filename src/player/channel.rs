use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::PlayerError;

use super::protocol::{Command, Response, parse_line};

/// Request/response transport to the player.
///
/// Implementations must never block longer than their own timeout; an absent
/// or silent player is reported as an error, not waited on.
pub trait ControlChannel {
    fn request(&self, command: &Command) -> Result<Response, PlayerError>;
}

/// One short-lived Unix socket connection per request.
#[derive(Debug, Clone)]
pub struct UnixSocketChannel {
    path: PathBuf,
    timeout: Duration,
}

impl UnixSocketChannel {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }
}

impl ControlChannel for UnixSocketChannel {
    fn request(&self, command: &Command) -> Result<Response, PlayerError> {
        let deadline = Instant::now() + self.timeout;

        let mut stream = UnixStream::connect(&self.path).map_err(PlayerError::Unavailable)?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(PlayerError::from_io)?;
        stream
            .write_all(command.to_line()?.as_bytes())
            .map_err(PlayerError::from_io)?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(PlayerError::Timeout);
            }
            reader
                .get_ref()
                .set_read_timeout(Some(remaining))
                .map_err(PlayerError::from_io)?;

            line.clear();
            let n = reader.read_line(&mut line).map_err(PlayerError::from_io)?;
            if n == 0 {
                return Err(PlayerError::Unavailable(ErrorKind::UnexpectedEof.into()));
            }
            if let Some(response) = parse_line(&line)? {
                return Ok(response);
            }
        }
    }
}
