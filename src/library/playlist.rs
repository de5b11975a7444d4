//! Playlist imports: M3U files, whole directories and single files.
//!
//! Every import mutates a [`Playlist`] in place and reports how many entries
//! it added. Unreadable inputs behave like empty ones.

use std::fs;
use std::path::Path;

use crate::session::{Playlist, TrackRef};

use super::listing::{audio_files_in, is_audio_file};

const EXTINF_PREFIX: &str = "#EXTINF:-1,";

/// Parse M3U text into track references.
///
/// `#EXTINF:-1,<name>` sets a pending name for the next entry unless the name
/// contains an `http://` or `https://` URL. Other `#` lines and blank lines are ignored.
pub fn parse_m3u(text: &str) -> Vec<TrackRef> {
    let mut tracks = Vec::new();
    let mut pending_name: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix(EXTINF_PREFIX) {
            if !(name.contains("http://") || name.contains("https://")) {
                pending_name = Some(name.to_string());
            }
        } else if !line.starts_with('#') {
            match pending_name.take() {
                Some(name) if !name.is_empty() => tracks.push(TrackRef::named(name, line)),
                _ => tracks.push(TrackRef::bare(line)),
            }
        }
    }

    tracks
}

/// Replace the playlist with the contents of an M3U file.
pub fn import_playlist_file(playlist: &mut Playlist, path: &Path) -> usize {
    let tracks = match fs::read_to_string(path) {
        Ok(text) => parse_m3u(&text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read playlist file");
            Vec::new()
        }
    };
    let n = tracks.len();
    playlist.replace(tracks);
    tracing::info!(path = %path.display(), tracks = n, "imported playlist file");
    n
}

/// Append every audio file directly inside `dir`.
pub fn import_directory(playlist: &mut Playlist, dir: &Path) -> usize {
    let files = audio_files_in(dir);
    let n = files.len();
    playlist.extend(
        files
            .into_iter()
            .map(|p| TrackRef::bare(p.to_string_lossy().into_owned())),
    );
    tracing::debug!(dir = %dir.display(), tracks = n, "imported directory");
    n
}

/// Append `path` if it is an audio file; anything else is ignored.
pub fn import_single_file(playlist: &mut Playlist, path: &Path) -> usize {
    if !is_audio_file(path) {
        return 0;
    }
    playlist.push(TrackRef::bare(path.to_string_lossy().into_owned()));
    1
}
