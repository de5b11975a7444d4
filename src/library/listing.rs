use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Name shown for the pseudo-entry that leads to the parent directory.
pub const PARENT_NAME: &str = "..";

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "m4a", "opus", "aac", "wma"];
const PLAYLIST_EXTENSION: &str = "m3u";

/// One row of the file browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    /// Set only on the `..` pseudo-entry.
    pub is_parent: bool,
}

impl DirEntry {
    fn parent_of(dir: &Path) -> Self {
        Self {
            path: parent_dir(dir),
            name: PARENT_NAME.to_string(),
            is_dir: true,
            is_parent: true,
        }
    }
}

fn has_extension(path: &Path, wanted: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            wanted.iter().any(|w| *w == ext)
        })
        .unwrap_or(false)
}

/// True for the audio extensions the player is handed directly.
pub fn is_audio_file(path: &Path) -> bool {
    has_extension(path, AUDIO_EXTENSIONS)
}

/// True for `.m3u` playlist files.
pub fn is_playlist_file(path: &Path) -> bool {
    has_extension(path, &[PLAYLIST_EXTENSION])
}

/// Parent of `dir`; the filesystem root is its own parent.
pub fn parent_dir(dir: &Path) -> PathBuf {
    dir.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf())
}

fn by_name_ignoring_case(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// List `dir` for the file browser.
///
/// The `..` entry comes first, then sub-directories, then files; each group is
/// sorted case-insensitively. An unreadable directory lists only `..`.
pub fn list_directory(dir: &Path) -> Vec<DirEntry> {
    let mut dirs: Vec<DirEntry> = Vec::new();
    let mut files: Vec<DirEntry> = Vec::new();
    let mut errors = 0usize;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                errors += 1;
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let item = DirEntry {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.file_type().is_dir(),
            is_parent: false,
        };
        if item.is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }

    if errors > 0 && dirs.is_empty() && files.is_empty() {
        tracing::warn!(dir = %dir.display(), "directory could not be listed");
    }

    dirs.sort_by(by_name_ignoring_case);
    files.sort_by(by_name_ignoring_case);

    let mut out = Vec::with_capacity(dirs.len() + files.len() + 1);
    out.push(DirEntry::parent_of(dir));
    out.extend(dirs);
    out.extend(files);
    out
}

/// Audio files directly inside `dir` (not recursive), sorted by name.
pub fn audio_files_in(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect()
}
