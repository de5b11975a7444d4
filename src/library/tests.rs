use super::playlist::parse_m3u;
use super::*;
use crate::session::{Playlist, TrackRef};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn names(entries: &[DirEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn is_audio_file_matches_known_extensions_case_insensitive() {
    for ok in ["a.mp3", "a.MP3", "a.flac", "a.wav", "a.ogg", "a.m4a", "a.Opus", "a.aac", "a.wma"] {
        assert!(is_audio_file(Path::new(ok)), "{ok}");
    }
    assert!(!is_audio_file(Path::new("a.txt")));
    assert!(!is_audio_file(Path::new("a.m3u")));
    assert!(!is_audio_file(Path::new("mp3")));
    assert!(is_playlist_file(Path::new("/x/Radio.M3U")));
    assert!(!is_playlist_file(Path::new("/x/radio.m3u8")));
}

#[test]
fn list_directory_puts_parent_then_dirs_then_files() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();
    fs::create_dir(dir.path().join("Alpha")).unwrap();
    fs::write(dir.path().join("b.mp3"), b"").unwrap();
    fs::write(dir.path().join("A.txt"), b"").unwrap();
    fs::write(dir.path().join("c.FLAC"), b"").unwrap();

    let entries = list_directory(dir.path());
    assert_eq!(names(&entries), vec!["..", "Alpha", "zeta", "A.txt", "b.mp3", "c.FLAC"]);

    let parent = &entries[0];
    assert!(parent.is_parent && parent.is_dir);
    assert_eq!(parent.path, dir.path().parent().unwrap());
    assert!(entries[1].is_dir && !entries[1].is_parent);
    assert!(!entries[3].is_dir);
    assert_eq!(entries[4].path, dir.path().join("b.mp3"));
}

#[test]
fn list_directory_of_missing_dir_is_only_parent() {
    let dir = tempdir().unwrap();
    let entries = list_directory(&dir.path().join("gone"));
    assert_eq!(names(&entries), vec![".."]);
}

#[test]
fn root_is_its_own_parent() {
    assert_eq!(parent_dir(Path::new("/")), Path::new("/"));
    assert_eq!(parent_dir(Path::new("/a/b")), Path::new("/a"));
}

#[test]
fn parse_m3u_pairs_names_with_entries() {
    let text = "#EXTM3U\n#EXTINF:-1,My Song\nhttp://stream.url\n";
    assert_eq!(parse_m3u(text), vec![TrackRef::named("My Song", "http://stream.url")]);
}

#[test]
fn parse_m3u_ignores_url_names_comments_and_blanks() {
    let text = "\
#EXTM3U

#EXTINF:-1,http://not-a-name
http://a.example/live
#EXTINF:123,Other format
/music/b.mp3
  #EXTINF:-1,Named  \r
  /music/c.mp3
# trailing comment
";
    assert_eq!(
        parse_m3u(text),
        vec![
            TrackRef::bare("http://a.example/live"),
            TrackRef::bare("/music/b.mp3"),
            TrackRef::named("Named", "/music/c.mp3"),
        ]
    );
}

#[test]
fn parse_m3u_drops_names_that_embed_a_url() {
    let text = "\
#EXTINF:-1,httpster beats
/music/a.mp3
#EXTINF:-1,Jazz FM - https://jazz.fm
https://jazz.fm/live
";
    assert_eq!(
        parse_m3u(text),
        vec![
            TrackRef::named("httpster beats", "/music/a.mp3"),
            TrackRef::bare("https://jazz.fm/live"),
        ]
    );
}

#[test]
fn pending_name_is_consumed_once() {
    let text = "#EXTINF:-1,First\na.mp3\nb.mp3\n";
    let tracks = parse_m3u(text);
    assert_eq!(tracks[0].name.as_deref(), Some("First"));
    assert_eq!(tracks[1].name, None);
}

#[test]
fn import_playlist_file_replaces_and_resets_current() {
    let dir = tempdir().unwrap();
    let m3u = dir.path().join("radio.m3u");
    fs::write(&m3u, "#EXTINF:-1,My Song\nhttp://stream.url\n").unwrap();

    let mut playlist = Playlist::new(
        vec![TrackRef::bare("old1.mp3"), TrackRef::bare("old2.mp3")],
        Some(1),
    );
    assert_eq!(import_playlist_file(&mut playlist, &m3u), 1);
    assert_eq!(playlist.tracks(), &[TrackRef::named("My Song", "http://stream.url")]);
    assert_eq!(playlist.current(), None);

    // Unreadable file still replaces with nothing.
    let mut playlist = Playlist::new(vec![TrackRef::bare("x.mp3")], Some(0));
    assert_eq!(import_playlist_file(&mut playlist, &dir.path().join("nope.m3u")), 0);
    assert!(playlist.is_empty());
    assert_eq!(playlist.current(), None);
}

#[test]
fn import_directory_appends_audio_only_non_recursive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.ogg"), b"").unwrap();
    fs::write(dir.path().join("a.mp3"), b"").unwrap();
    fs::write(dir.path().join("notes.txt"), b"").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("deep.mp3"), b"").unwrap();

    let mut playlist = Playlist::new(vec![TrackRef::bare("keep.mp3")], Some(0));
    assert_eq!(import_directory(&mut playlist, dir.path()), 2);

    let paths: Vec<&str> = playlist.tracks().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(paths[0], "keep.mp3");
    assert!(paths[1].ends_with("a.mp3"));
    assert!(paths[2].ends_with("b.ogg"));
    assert_eq!(playlist.current(), Some(0));
}

#[test]
fn import_single_file_ignores_non_audio() {
    let mut playlist = Playlist::default();
    assert_eq!(import_single_file(&mut playlist, Path::new("/m/cover.jpg")), 0);
    assert!(playlist.is_empty());
    assert_eq!(import_single_file(&mut playlist, Path::new("/m/song.WAV")), 1);
    assert_eq!(playlist.tracks()[0].path, "/m/song.WAV");
}

#[test]
fn filter_is_case_insensitive_substring() {
    let items = vec!["Alpha", "beta", "ALPHABET", "gamma"];
    let got = filter_by_name(&items, "alp", |s| *s);
    assert_eq!(got, vec!["Alpha", "ALPHABET"]);
    assert_eq!(filter_by_name(&items, "", |s| *s), items);
    assert!(filter_by_name(&items, "zzz", |s| *s).is_empty());
}

#[test]
fn shrinking_query_matches_fresh_filter() {
    let items = vec!["ab", "ac", "xa", "b"];
    let narrowed = filter_by_name(&items, "ab", |s| *s);
    assert_eq!(narrowed, vec!["ab"]);
    // Backspacing re-derives from the full list, not from `narrowed`.
    assert_eq!(filter_by_name(&items, "a", |s| *s), vec!["ab", "ac", "xa"]);
}
