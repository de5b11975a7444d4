//! Application model types: `App`, `Focus`, `InputMode` and `Cursor`.
//!
//! `App` holds the durable session plus everything the UI derives from it:
//! the browser listing, the playlist rows, cursors, search state and the last
//! polled playback position. It never talks to the player.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::library::{self, DirEntry};
use crate::player::Position;
use crate::session::SessionState;

/// Which pane receives navigation and activation input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Browser,
    Playlist,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Browser => Self::Playlist,
            Self::Playlist => Self::Browser,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typed characters go to the search buffer.
    Search,
}

/// Selection and scroll offset of one pane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Cursor {
    pub selected: usize,
    pub offset: usize,
}

impl Cursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move by `delta`, clamping at both ends instead of wrapping.
    pub fn step(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(max);
    }

    /// Clamp the selection into the list and scroll so it stays visible.
    pub fn reconcile(&mut self, len: usize, height: usize) {
        let height = height.max(1);
        self.selected = self.selected.min(len.saturating_sub(1));
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

/// A visible playlist row; `index` points into the session playlist so a
/// filtered view still acts on the right track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistRow {
    pub index: usize,
    pub name: String,
}

/// The last left click, used for double-click detection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Click {
    pub focus: Focus,
    pub index: usize,
    pub at: Instant,
}

/// The main application model.
pub struct App {
    pub session: SessionState,

    /// Browser rows as displayed (possibly filtered).
    pub browser: Vec<DirEntry>,
    /// Playlist rows as displayed (possibly filtered).
    pub playlist_rows: Vec<PlaylistRow>,
    pub browser_cursor: Cursor,
    pub playlist_cursor: Cursor,

    pub focus: Focus,
    pub mode: InputMode,
    pub search: String,

    pub position: Position,
    /// Visible rows per pane.
    pub height: usize,
    pub last_click: Option<Click>,

    /// Unfiltered listing of `session.cwd` from the last refresh.
    browser_all: Vec<DirEntry>,
}

impl App {
    /// Create an `App` for `session` and list its working directory.
    pub fn new(session: SessionState, height: usize) -> Self {
        let mut app = Self {
            session,
            browser: Vec::new(),
            playlist_rows: Vec::new(),
            browser_cursor: Cursor::default(),
            playlist_cursor: Cursor::default(),
            focus: Focus::Browser,
            mode: InputMode::Normal,
            search: String::new(),
            position: Position::ZERO,
            height: height.max(1),
            last_click: None,
            browser_all: Vec::new(),
        };
        app.refresh();
        app
    }

    fn all_playlist_rows(&self) -> Vec<PlaylistRow> {
        self.session
            .playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, t)| PlaylistRow {
                index,
                name: t.display_name().to_string(),
            })
            .collect()
    }

    /// Re-list the working directory and rebuild the playlist rows.
    ///
    /// Drops any filtered view.
    pub fn refresh(&mut self) {
        self.browser_all = library::list_directory(&self.session.cwd);
        self.browser = self.browser_all.clone();
        self.playlist_rows = self.all_playlist_rows();
        self.reconcile();
    }

    /// Rebuild only the playlist rows after a playlist mutation.
    pub fn refresh_playlist(&mut self) {
        self.playlist_rows = self.all_playlist_rows();
        self.reconcile();
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.reconcile();
    }

    /// Keep both cursors inside their lists and on screen.
    pub fn reconcile(&mut self) {
        self.browser_cursor.reconcile(self.browser.len(), self.height);
        self.playlist_cursor
            .reconcile(self.playlist_rows.len(), self.height);
    }

    /// Number of rows currently shown in `pane`.
    pub fn pane_len(&self, pane: Focus) -> usize {
        match pane {
            Focus::Browser => self.browser.len(),
            Focus::Playlist => self.playlist_rows.len(),
        }
    }

    pub fn cursor(&self, pane: Focus) -> Cursor {
        match pane {
            Focus::Browser => self.browser_cursor,
            Focus::Playlist => self.playlist_cursor,
        }
    }

    fn cursor_mut(&mut self, pane: Focus) -> &mut Cursor {
        match pane {
            Focus::Browser => &mut self.browser_cursor,
            Focus::Playlist => &mut self.playlist_cursor,
        }
    }

    /// Move the focused pane's selection by `delta`, clamped.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.pane_len(self.focus);
        self.cursor_mut(self.focus).step(delta, len);
        self.reconcile();
    }

    /// Focus `pane` and select its row `index`. Out-of-range rows are ignored.
    pub fn select(&mut self, pane: Focus, index: usize) -> bool {
        if index >= self.pane_len(pane) {
            return false;
        }
        self.focus = pane;
        self.cursor_mut(pane).selected = index;
        self.reconcile();
        true
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.browser.get(self.browser_cursor.selected)
    }

    /// Playlist index behind the selected playlist row.
    pub fn selected_track_index(&self) -> Option<usize> {
        self.playlist_rows
            .get(self.playlist_cursor.selected)
            .map(|row| row.index)
    }

    /// Make `dir` the working directory and list it from the top.
    pub fn change_dir(&mut self, dir: PathBuf) {
        self.session.cwd = dir;
        self.browser_cursor.reset();
        self.refresh();
    }

    /// Move to the parent directory and select the directory just left.
    pub fn go_up(&mut self) {
        let left = self
            .session
            .cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.change_dir(library::parent_dir(&self.session.cwd));

        if let Some(name) = left {
            if let Some(i) = self
                .browser
                .iter()
                .position(|e| e.is_dir && !e.is_parent && e.name == name)
            {
                self.browser_cursor.selected = i;
                self.reconcile();
            }
        }
    }

    /// Point the playlist cursor at the playing track.
    pub fn select_current_track(&mut self) {
        if let Some(current) = self.session.playlist.current() {
            if let Some(row) = self.playlist_rows.iter().position(|r| r.index == current) {
                self.playlist_cursor.selected = row;
                self.reconcile();
            }
        }
    }

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
        self.search.clear();
    }

    /// Leave search mode; the filtered view stays until the next refresh.
    pub fn end_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.apply_search();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.apply_search();
        }
    }

    /// Filter the focused pane from its full listing by the search buffer.
    pub fn apply_search(&mut self) {
        self.browser = self.browser_all.clone();
        self.playlist_rows = self.all_playlist_rows();
        match self.focus {
            Focus::Browser => {
                self.browser = library::filter_by_name(&self.browser_all, &self.search, |e| {
                    e.name.as_str()
                });
            }
            Focus::Playlist => {
                self.playlist_rows =
                    library::filter_by_name(&self.playlist_rows, &self.search, |r| r.name.as_str());
            }
        }
        self.cursor_mut(self.focus).reset();
        self.reconcile();
    }

    /// Record a click on `index` of `focus`; true when it completes a
    /// double-click (same pane, same row, within `window`).
    pub fn register_click(&mut self, focus: Focus, index: usize, at: Instant, window: Duration) -> bool {
        let double = self.last_click.is_some_and(|last| {
            last.focus == focus
                && last.index == index
                && at.saturating_duration_since(last.at) < window
        });
        // A completed double-click does not start another one.
        self.last_click = if double {
            None
        } else {
            Some(Click { focus, index, at })
        };
        double
    }
}
