//! In-memory session state: working directory, playlist and volume.

use std::path::PathBuf;

use super::track::TrackRef;

pub const DEFAULT_VOLUME: u8 = 50;
pub const MAX_VOLUME: u8 = 100;

/// Ordered playlist plus the index of the track that is playing (if any).
///
/// `current` always points inside `tracks` or is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<TrackRef>,
    current: Option<usize>,
}

impl Playlist {
    /// Build a playlist, dropping a `current` index that is out of range.
    pub fn new(tracks: Vec<TrackRef>, current: Option<usize>) -> Self {
        let current = current.filter(|&i| i < tracks.len());
        Self { tracks, current }
    }

    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&TrackRef> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Mark `index` as the playing track. Returns false when out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Replace every entry; nothing is playing afterwards.
    pub fn replace(&mut self, tracks: Vec<TrackRef>) {
        self.tracks = tracks;
        self.current = None;
    }

    /// Append entries, keeping the current track.
    pub fn extend<I: IntoIterator<Item = TrackRef>>(&mut self, tracks: I) {
        self.tracks.extend(tracks);
    }

    pub fn push(&mut self, track: TrackRef) {
        self.tracks.push(track);
    }

    /// Remove the entry at `index`.
    ///
    /// Removing the playing entry leaves nothing playing (no auto-advance);
    /// removing an earlier entry shifts `current` so it names the same track.
    pub fn remove_at(&mut self, index: usize) -> Option<TrackRef> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Move `current` one step forward, wrapping at the end.
    ///
    /// With nothing playing this starts at the first entry. Returns `None`
    /// for an empty playlist.
    pub fn advance(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(c) => (c + 1) % self.tracks.len(),
            None => 0,
        };
        self.current = Some(next);
        Some(next)
    }
}

/// The durable part of the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub cwd: PathBuf,
    pub playlist: Playlist,
    pub volume: u8,
}

impl SessionState {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            playlist: Playlist::default(),
            volume: DEFAULT_VOLUME,
        }
    }

    /// Apply `delta` to the volume, clamped to `0..=100`. Returns the new value.
    pub fn adjust_volume(&mut self, delta: i32) -> u8 {
        let v = (i32::from(self.volume) + delta).clamp(0, i32::from(MAX_VOLUME));
        self.volume = v as u8;
        self.volume
    }
}
