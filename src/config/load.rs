use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

const APP_DIR: &str = "cyan";

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional JSON config file, then applies
/// environment overrides (prefix `CYAN__`) on top, and falls back to struct
/// defaults for anything left unset.
impl Settings {
    /// Load settings from the optional config file and environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from an explicit config file path (if any) and environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Json)
                    .required(false),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CYAN")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.poll_interval_ms == 0 {
            return Err("controls.poll_interval_ms must be >= 1".to_string());
        }
        if self.player.ipc_timeout_ms == 0 {
            return Err("player.ipc_timeout_ms must be >= 1".to_string());
        }
        if self.player.binary.trim().is_empty() {
            return Err("player.binary must not be empty".to_string());
        }
        Ok(())
    }

    /// Directory handed to the player for resume positions.
    pub fn watch_later_dir(&self, state_path: &Path) -> PathBuf {
        self.player.watch_later_dir.clone().unwrap_or_else(|| {
            state_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("history")
        })
    }
}

/// Resolve the config path from `CYAN_CONFIG_PATH`, a `config.json` in the
/// working directory, or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CYAN_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    let local = PathBuf::from("config.json");
    if local.is_file() {
        return Some(local);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cyan/config.json`
/// or `~/.config/cyan/config.json` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.json"))
}

/// Resolve where the session state is persisted.
///
/// `CYAN_STATE_PATH` wins; otherwise `$XDG_STATE_HOME/cyan/state.json` or
/// `~/.local/state/cyan/state.json`, and as a last resort `.cyan_state.json`
/// in the working directory.
pub fn resolve_state_path() -> PathBuf {
    if let Some(p) = env::var_os("CYAN_STATE_PATH") {
        return PathBuf::from(p);
    }

    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    match state_home {
        Some(d) => d.join(APP_DIR).join("state.json"),
        None => PathBuf::from(".cyan_state.json"),
    }
}
