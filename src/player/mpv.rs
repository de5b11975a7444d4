use std::fs;
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};
use std::thread;
use std::time::Duration;

use crate::config::Settings;
use crate::error::PlayerError;

use super::channel::{ControlChannel, UnixSocketChannel};
use super::process::PlayerProcess;
use super::protocol::{Command, Property, Response};
use super::{Player, Position};

/// How `MpvPlayer` launches and talks to the player.
#[derive(Debug, Clone)]
pub struct MpvOptions {
    pub binary: String,
    pub socket_path: PathBuf,
    pub ipc_timeout: Duration,
    pub settle: Duration,
    pub persist_grace: Duration,
    pub watch_later_dir: PathBuf,
}

impl MpvOptions {
    pub fn from_settings(settings: &Settings, watch_later_dir: PathBuf) -> Self {
        Self {
            binary: settings.player.binary.clone(),
            socket_path: settings.player.socket_path.clone(),
            ipc_timeout: Duration::from_millis(settings.player.ipc_timeout_ms),
            settle: Duration::from_millis(settings.player.settle_ms),
            persist_grace: Duration::from_millis(settings.player.persist_grace_ms),
            watch_later_dir,
        }
    }

    fn launch_command(&self, target: &str, volume: u8) -> ProcessCommand {
        let mut cmd = ProcessCommand::new(&self.binary);
        cmd.arg("--no-terminal")
            .arg("--no-video")
            .arg("--vo=null")
            .arg("--no-config")
            .arg(format!("--input-ipc-server={}", self.socket_path.display()))
            .arg(format!("--volume={volume}"))
            .arg("--save-position-on-quit=yes")
            .arg(format!(
                "--watch-later-directory={}",
                self.watch_later_dir.display()
            ))
            .arg("--")
            .arg(target)
            // The terminal belongs to the UI.
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// Controls one external mpv process at a time.
pub struct MpvPlayer<C: ControlChannel = UnixSocketChannel> {
    options: MpvOptions,
    channel: C,
    process: Option<PlayerProcess>,
}

impl MpvPlayer<UnixSocketChannel> {
    pub fn new(options: MpvOptions) -> Self {
        let channel = UnixSocketChannel::new(options.socket_path.clone(), options.ipc_timeout);
        Self::with_channel(options, channel)
    }
}

impl<C: ControlChannel> MpvPlayer<C> {
    pub fn with_channel(options: MpvOptions, channel: C) -> Self {
        Self {
            options,
            channel,
            process: None,
        }
    }

    #[cfg(test)]
    pub(super) fn channel(&self) -> &C {
        &self.channel
    }

    fn remove_socket(&self) {
        match fs::remove_file(&self.options.socket_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!(path = %self.options.socket_path.display(), error = %e, "could not remove socket")
            }
        }
    }

    fn query(&self, property: Property) -> Option<f64> {
        self.send(&Command::GetProperty(property))
            .ok()
            .and_then(|r| r.as_f64())
            .filter(|v| v.is_finite() && *v >= 0.0)
    }
}

impl<C: ControlChannel> Player for MpvPlayer<C> {
    fn start(&mut self, target: &str, volume: u8) -> Result<(), PlayerError> {
        self.stop();

        if let Err(e) = fs::create_dir_all(&self.options.watch_later_dir) {
            tracing::debug!(error = %e, "could not create watch-later directory");
        }

        let process = PlayerProcess::spawn(self.options.launch_command(target, volume))
            .map_err(PlayerError::Launch)?;
        self.process = Some(process);
        tracing::info!(track = target, volume, "player started");

        // The socket appears some time after spawn; polls that race it just
        // come back empty until the next tick.
        thread::sleep(self.options.settle);
        Ok(())
    }

    fn stop(&mut self) {
        // A hard kill: a graceful `quit` would make the player save its
        // resume position, which only `stop_and_persist` should do.
        if let Some(process) = self.process.take() {
            process.terminate();
            tracing::info!("player stopped");
        }
        self.remove_socket();
    }

    fn stop_and_persist(&mut self) {
        if self.is_running() {
            match self.send(&Command::WriteWatchLater) {
                Ok(_) => {
                    thread::sleep(self.options.persist_grace);
                    if let Err(e) = self.send(&Command::Quit) {
                        tracing::debug!(error = %e, "player did not acknowledge quit");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "could not persist playback position"),
            }
        }
        self.stop();
    }

    fn send(&self, command: &Command) -> Result<Response, PlayerError> {
        let response = self.channel.request(command)?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(PlayerError::Rejected(response.error))
        }
    }

    fn position(&self) -> Position {
        if !self.is_running() {
            return Position::ZERO;
        }
        let Some(elapsed) = self.query(Property::TimePos) else {
            return Position::ZERO;
        };
        match self.query(Property::Duration) {
            Some(duration) => Position { elapsed, duration },
            None => Position::ZERO,
        }
    }

    fn is_running(&self) -> bool {
        self.process.as_ref().is_some_and(PlayerProcess::is_running)
    }
}

impl<C: ControlChannel> Drop for MpvPlayer<C> {
    fn drop(&mut self) {
        if let Some(process) = self.process.take() {
            process.terminate();
        }
    }
}
