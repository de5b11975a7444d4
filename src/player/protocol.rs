//! mpv JSON IPC wire format.
//!
//! Requests are `{"command": [...]}` followed by a newline. The player answers
//! with one `{"error": "...", "data": ...}` object per request but may
//! interleave asynchronous `{"event": ...}` lines, which callers skip.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Properties polled for the progress bar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Property {
    TimePos,
    Duration,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Self::TimePos => "time-pos",
            Self::Duration => "duration",
        }
    }
}

/// The commands this application sends to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CyclePause,
    /// Relative seek in seconds.
    Seek(i32),
    SetVolume(u8),
    GetProperty(Property),
    /// Ask the player to write its resume position to the watch-later dir.
    WriteWatchLater,
    /// Graceful exit. With `--save-position-on-quit` this also saves the
    /// resume position.
    Quit,
}

impl Command {
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::CyclePause => vec![json!("cycle"), json!("pause")],
            Self::Seek(secs) => vec![json!("seek"), json!(secs)],
            Self::SetVolume(v) => vec![json!("set_property"), json!("volume"), json!(v)],
            Self::GetProperty(p) => vec![json!("get_property"), json!(p.name())],
            Self::WriteWatchLater => vec![json!("write-watch-later-config")],
            Self::Quit => vec![json!("quit")],
        }
    }

    /// Serialize as a newline-terminated request envelope.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Envelope {
            command: Vec<Value>,
        }

        let mut line = serde_json::to_string(&Envelope {
            command: self.args(),
        })?;
        line.push('\n');
        Ok(line)
    }
}

/// A reply to a single request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub error: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Response {
    #[cfg(test)]
    pub fn success(data: Option<Value>) -> Self {
        Self {
            error: "success".to_string(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error == "success"
    }

    /// The numeric payload, if there is one.
    pub fn as_f64(&self) -> Option<f64> {
        self.data.as_ref().and_then(Value::as_f64)
    }
}

/// Parse one line read from the socket.
///
/// Returns `Ok(None)` for event notifications and anything else that is not
/// a reply.
pub fn parse_line(line: &str) -> Result<Option<Response>, serde_json::Error> {
    let value: Value = serde_json::from_str(line.trim())?;
    if value.get("error").is_none() || value.get("event").is_some() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}
