//! Filesystem side of the library: directory listing for the browser pane,
//! playlist imports and name filtering.

mod filter;
mod listing;
mod playlist;

pub use filter::filter_by_name;
pub use listing::{DirEntry, is_audio_file, is_playlist_file, list_directory, parent_dir};
pub use playlist::{import_directory, import_playlist_file, import_single_file};

#[cfg(test)]
mod tests;
