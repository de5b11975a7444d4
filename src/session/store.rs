use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

use super::state::{DEFAULT_VOLUME, MAX_VOLUME, Playlist, SessionState};
use super::track::TrackRef;

/// On-disk shape of the session file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct SessionFile {
    cwd: String,
    playlist: Vec<String>,
    current_index: i64,
    volume: i64,
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            cwd: String::new(),
            playlist: Vec::new(),
            current_index: -1,
            volume: i64::from(DEFAULT_VOLUME),
        }
    }
}

impl SessionFile {
    fn from_state(state: &SessionState) -> Self {
        Self {
            cwd: state.cwd.to_string_lossy().into_owned(),
            playlist: state.playlist.tracks().iter().map(TrackRef::encode).collect(),
            current_index: state
                .playlist
                .current()
                .and_then(|i| i64::try_from(i).ok())
                .unwrap_or(-1),
            volume: i64::from(state.volume),
        }
    }

    fn into_state(self, fallback_cwd: &Path) -> SessionState {
        let cwd = if self.cwd.is_empty() {
            fallback_cwd.to_path_buf()
        } else {
            PathBuf::from(self.cwd)
        };
        let tracks: Vec<TrackRef> = self.playlist.iter().map(|raw| TrackRef::decode(raw)).collect();
        let current = usize::try_from(self.current_index).ok();

        SessionState {
            cwd,
            playlist: Playlist::new(tracks, current),
            volume: self.volume.clamp(0, i64::from(MAX_VOLUME)) as u8,
        }
    }
}

/// Reads and writes the session file at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, propagating I/O and parse errors.
    pub fn try_load(&self, fallback_cwd: &Path) -> Result<SessionState, SessionError> {
        let content = fs::read_to_string(&self.path)?;
        let file: SessionFile = serde_json::from_str(&content)?;
        Ok(file.into_state(fallback_cwd))
    }

    /// Read the stored session; a missing or corrupt file yields defaults.
    pub fn load(&self, fallback_cwd: &Path) -> SessionState {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no saved session, starting fresh");
            return SessionState::new(fallback_cwd.to_path_buf());
        }
        match self.try_load(fallback_cwd) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session");
                SessionState::new(fallback_cwd.to_path_buf())
            }
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(&SessionFile::from_state(state))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
