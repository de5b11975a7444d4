//! Keyboard mapping: raw key events to [`Action`]s.
//!
//! Mouse events need the screen layout and are resolved by the controller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::InputMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnterSearch,
    SearchInput(char),
    SearchBackspace,
    EndSearch,
    MoveUp,
    MoveDown,
    ToggleFocus,
    /// Open the browser selection or play the playlist selection.
    Activate,
    GoUp,
    TogglePause,
    SeekBackward,
    SeekForward,
    VolumeDown,
    VolumeUp,
    NextTrack,
    /// Add the browser selection to the playlist without entering it.
    AddSelection,
    RemoveSelection,
    ClearPlaylist,
    Quit,
    /// Quit after asking the player to remember the position.
    QuitAndPersist,
}

/// Map a key press to an action for the given input mode.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Enter | KeyCode::Esc => Some(Action::EndSearch),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('/') => Some(Action::EnterSearch),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Tab => Some(Action::ToggleFocus),
            KeyCode::Enter | KeyCode::Right => Some(Action::Activate),
            KeyCode::Left => Some(Action::GoUp),
            KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char(',') => Some(Action::SeekBackward),
            KeyCode::Char('.') => Some(Action::SeekForward),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::VolumeDown),
            KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::VolumeUp),
            KeyCode::Char('n') => Some(Action::NextTrack),
            KeyCode::F(2) => Some(Action::AddSelection),
            KeyCode::F(3) => Some(Action::RemoveSelection),
            KeyCode::F(5) => Some(Action::ClearPlaylist),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('Q') => Some(Action::QuitAndPersist),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn normal_mode_bindings() {
        let n = InputMode::Normal;
        assert_eq!(map_key(n, key(KeyCode::Char('/'))), Some(Action::EnterSearch));
        assert_eq!(map_key(n, key(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(map_key(n, key(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(map_key(n, key(KeyCode::Right)), Some(Action::Activate));
        assert_eq!(map_key(n, key(KeyCode::Left)), Some(Action::GoUp));
        assert_eq!(map_key(n, key(KeyCode::Char('_'))), Some(Action::VolumeDown));
        assert_eq!(map_key(n, key(KeyCode::Char('+'))), Some(Action::VolumeUp));
        assert_eq!(map_key(n, key(KeyCode::F(2))), Some(Action::AddSelection));
        assert_eq!(
            map_key(n, KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(Action::QuitAndPersist)
        );
        assert_eq!(map_key(n, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn search_mode_captures_characters() {
        let s = InputMode::Search;
        assert_eq!(map_key(s, key(KeyCode::Char('q'))), Some(Action::SearchInput('q')));
        assert_eq!(map_key(s, key(KeyCode::Char('/'))), Some(Action::SearchInput('/')));
        assert_eq!(map_key(s, key(KeyCode::Backspace)), Some(Action::SearchBackspace));
        assert_eq!(map_key(s, key(KeyCode::Esc)), Some(Action::EndSearch));
        assert_eq!(map_key(s, key(KeyCode::Enter)), Some(Action::EndSearch));
        assert_eq!(map_key(s, key(KeyCode::Down)), None);
    }

    #[test]
    fn ctrl_c_quits_in_any_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Normal, ctrl_c), Some(Action::Quit));
        assert_eq!(map_key(InputMode::Search, ctrl_c), Some(Action::Quit));
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(map_key(InputMode::Search, ctrl_x), None);
    }
}
