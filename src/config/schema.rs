use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.json`.
///
/// File format: JSON
/// Lookup order: `CYAN_CONFIG_PATH`, `./config.json`, then
/// `$XDG_CONFIG_HOME/cyan/config.json` or `~/.config/cyan/config.json`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CYAN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// The theme keys live at the top level so that a plain
/// `{"theme_color": "#ff8800"}` file works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Accent color for borders, headers and the progress bar (`#rrggbb`).
    pub theme_color: String,
    /// Background of the cursor row (`#rrggbb`).
    pub bg_cursor: String,
    pub border_style: BorderStyle,
    pub player: PlayerSettings,
    pub controls: ControlsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_color: "#00FFFF".to_string(),
            bg_cursor: "#005555".to_string(),
            border_style: BorderStyle::Rounded,
            player: PlayerSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

/// Read as a plain string: `"double"` (any case) selects double borders and
/// every other value means rounded, so a bad value never rejects the file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BorderStyle {
    Double,
    Rounded,
}

impl From<String> for BorderStyle {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("double") {
            Self::Double
        } else {
            Self::Rounded
        }
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::Rounded
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Player executable, looked up on `PATH`.
    pub binary: String,
    /// Well-known IPC socket shared by every session of this instance.
    pub socket_path: PathBuf,
    /// Connect/read timeout for a single IPC request (milliseconds).
    pub ipc_timeout_ms: u64,
    /// Delay after spawning the player before the socket is assumed ready.
    pub settle_ms: u64,
    /// Grace period after asking the player to persist its position.
    pub persist_grace_ms: u64,
    /// Where the player keeps resume positions. Defaults to a `history`
    /// directory next to the session file.
    pub watch_later_dir: Option<PathBuf>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            binary: "mpv".to_string(),
            socket_path: PathBuf::from("/tmp/cyan.sock"),
            ipc_timeout_ms: 100,
            settle_ms: 200,
            persist_grace_ms: 500,
            watch_later_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds to seek when pressing `,` / `.`.
    pub seek_seconds: u32,
    /// Volume change per `-` / `+` press.
    pub volume_step: u8,
    /// Two clicks on the same row within this window activate it.
    pub double_click_ms: u64,
    /// How often the player is polled for position/duration.
    pub poll_interval_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step: 5,
            double_click_ms: 400,
            poll_interval_ms: 500,
        }
    }
}
