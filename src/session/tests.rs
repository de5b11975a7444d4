use super::*;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn playlist_of(paths: &[&str], current: Option<usize>) -> Playlist {
    Playlist::new(paths.iter().map(|p| TrackRef::bare(*p)).collect(), current)
}

#[test]
fn display_name_falls_back_to_final_path_component() {
    assert_eq!(TrackRef::bare("/music/a/Song.mp3").display_name(), "Song.mp3");
    assert_eq!(TrackRef::named("My Song", "/x/y.mp3").display_name(), "My Song");
    assert_eq!(TrackRef::bare("http://stream.url").display_name(), "stream.url");
}

#[test]
fn encode_decode_named_and_bare_entries() {
    let named = TrackRef::named("Radio", "http://r.example/live");
    assert_eq!(named.encode(), "Radio|#|http://r.example/live");
    assert_eq!(TrackRef::decode(&named.encode()), named);

    let bare = TrackRef::bare("/a/b.flac");
    assert_eq!(bare.encode(), "/a/b.flac");
    assert_eq!(TrackRef::decode("/a/b.flac"), bare);

    // Only the first separator splits.
    let odd = TrackRef::decode("a|#|b|#|c");
    assert_eq!(odd.name.as_deref(), Some("a"));
    assert_eq!(odd.path, "b|#|c");
}

#[test]
fn new_drops_out_of_range_current() {
    let p = playlist_of(&["a.mp3"], Some(3));
    assert_eq!(p.current(), None);
}

#[test]
fn remove_current_resets_to_none() {
    let mut p = playlist_of(&["a.mp3", "b.mp3", "c.mp3"], Some(1));
    let removed = p.remove_at(1).unwrap();
    assert_eq!(removed.path, "b.mp3");
    assert_eq!(p.current(), None);
    assert_eq!(p.len(), 2);
}

#[test]
fn remove_before_current_keeps_same_track() {
    let mut p = playlist_of(&["a.mp3", "b.mp3", "c.mp3", "d.mp3"], Some(2));
    p.remove_at(0);
    assert_eq!(p.current(), Some(1));
    assert_eq!(p.current_track().unwrap().path, "c.mp3");
}

#[test]
fn remove_after_current_keeps_index() {
    let mut p = playlist_of(&["a.mp3", "b.mp3", "c.mp3"], Some(0));
    p.remove_at(2);
    assert_eq!(p.current(), Some(0));
    assert_eq!(p.current_track().unwrap().path, "a.mp3");
    assert!(p.remove_at(9).is_none());
}

#[test]
fn remove_any_index_preserves_current_identity() {
    for current in 0..4 {
        for idx in 0..4 {
            let mut p = playlist_of(&["a", "b", "c", "d"], Some(current));
            let before = p.current_track().cloned().unwrap();
            p.remove_at(idx);
            if idx == current {
                assert_eq!(p.current(), None);
            } else {
                assert_eq!(p.current_track(), Some(&before));
            }
        }
    }
}

#[test]
fn advance_wraps_and_is_noop_when_empty() {
    let mut p = playlist_of(&["a.mp3", "b.mp3", "c.mp3"], Some(1));
    assert_eq!(p.advance(), Some(2));
    assert_eq!(p.advance(), Some(0));

    let mut empty = Playlist::default();
    assert_eq!(empty.advance(), None);
    assert_eq!(empty.current(), None);

    let mut idle = playlist_of(&["a.mp3"], None);
    assert_eq!(idle.advance(), Some(0));
}

#[test]
fn replace_and_clear_reset_current() {
    let mut p = playlist_of(&["a.mp3", "b.mp3"], Some(1));
    p.replace(vec![TrackRef::bare("x.mp3")]);
    assert_eq!(p.current(), None);
    assert_eq!(p.len(), 1);

    p.set_current(0);
    p.clear();
    assert!(p.is_empty());
    assert_eq!(p.current(), None);
}

#[test]
fn volume_is_clamped() {
    let mut s = SessionState::new(PathBuf::from("/"));
    s.volume = 98;
    assert_eq!(s.adjust_volume(5), 100);
    s.volume = 3;
    assert_eq!(s.adjust_volume(-10), 0);
    s.volume = 50;
    assert_eq!(s.adjust_volume(1000), 100);
    assert_eq!(s.adjust_volume(-1000), 0);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("nested").join("state.json"));

    let state = SessionState {
        cwd: PathBuf::from("/srv/music"),
        playlist: Playlist::new(
            vec![
                TrackRef::bare("/srv/music/a.mp3"),
                TrackRef::named("Jazz FM", "http://jazz.example/stream"),
            ],
            Some(1),
        ),
        volume: 35,
    };

    store.save(&state).unwrap();
    let loaded = store.load(Path::new("/elsewhere"));
    assert_eq!(loaded, state);
}

#[test]
fn stored_json_uses_minus_one_for_no_current_track() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("state.json"));
    store.save(&SessionState::new(PathBuf::from("/m"))).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["current_index"], -1);
    assert_eq!(raw["volume"], 50);
    assert_eq!(raw["cwd"], "/m");
    assert!(raw["playlist"].as_array().unwrap().is_empty());
}

#[test]
fn missing_or_corrupt_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let fallback = Path::new("/start/here");

    let missing = SessionStore::new(dir.path().join("absent.json")).load(fallback);
    assert_eq!(missing, SessionState::new(fallback.to_path_buf()));

    let corrupt_path = dir.path().join("corrupt.json");
    std::fs::write(&corrupt_path, "{ not json").unwrap();
    let corrupt = SessionStore::new(&corrupt_path).load(fallback);
    assert_eq!(corrupt.volume, DEFAULT_VOLUME);
    assert_eq!(corrupt.playlist.current(), None);
    assert_eq!(corrupt.cwd, fallback);
}

#[test]
fn partial_file_fills_defaults_and_sanitizes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"playlist":["a.mp3"],"current_index":7,"volume":250}"#).unwrap();

    let s = SessionStore::new(&path).load(Path::new("/cwd"));
    assert_eq!(s.cwd, PathBuf::from("/cwd"));
    assert_eq!(s.playlist.len(), 1);
    assert_eq!(s.playlist.current(), None);
    assert_eq!(s.volume, 100);
}
