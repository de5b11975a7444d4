use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::{App, Focus};
use crate::config::ControlsSettings;
use crate::library;
use crate::player::{Command, Player, Position};
use crate::runtime::input::{self, Action};
use crate::session::SessionStore;
use crate::ui::{self, Theme};

/// One input to the controller. Everything the loop reacts to is serialized
/// into this stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic position poll.
    Tick,
    Key(KeyEvent),
    /// `at` is when the event was read, for double-click detection.
    Mouse { event: MouseEvent, at: Instant },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the model, the player and the session store, and applies events to
/// them one at a time.
pub struct Controller<P: Player> {
    app: App,
    player: P,
    store: SessionStore,
    controls: ControlsSettings,
    /// Terminal area, for mouse hit-testing.
    area: Rect,
}

impl<P: Player> Controller<P> {
    pub fn new(app: App, player: P, store: SessionStore, controls: ControlsSettings, area: Rect) -> Self {
        Self {
            app,
            player,
            store,
            controls,
            area,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    #[cfg(test)]
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    #[cfg(test)]
    pub fn player(&self) -> &P {
        &self.player
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.controls.poll_interval_ms)
    }

    /// Apply one event; the model is reconciled afterwards.
    pub fn handle(&mut self, event: AppEvent) -> Flow {
        let flow = match event {
            AppEvent::Tick => {
                self.on_tick();
                Flow::Continue
            }
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Mouse { event, at } => self.on_mouse(event, at),
            AppEvent::Resize { width, height } => {
                self.area = Rect::new(0, 0, width, height);
                self.app.set_height(ui::visible_rows(height));
                Flow::Continue
            }
        };
        self.app.reconcile();
        flow
    }

    /// Start the saved current track, if the session has one.
    pub fn resume(&mut self) {
        if let Some(index) = self.app.session.playlist.current() {
            tracing::info!(index, "resuming saved track");
            self.play(index);
            self.app.select_current_track();
        }
    }

    fn on_tick(&mut self) {
        if !self.player.is_running() {
            self.app.position = Position::ZERO;
            return;
        }
        self.app.position = self.player.position();
        if self.app.position.is_near_end() {
            tracing::debug!("track near its end, advancing");
            self.next_track();
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        match input::map_key(self.app.mode, key) {
            Some(action) => self.apply(action),
            None => Flow::Continue,
        }
    }

    fn on_mouse(&mut self, event: MouseEvent, at: Instant) -> Flow {
        match event.kind {
            MouseEventKind::ScrollUp => self.app.move_selection(-1),
            MouseEventKind::ScrollDown => self.app.move_selection(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let areas = ui::layout(self.area, self.app.height);
                let Some((pane, row)) = areas.hit_test(event.column, event.row) else {
                    return Flow::Continue;
                };
                self.app.focus = pane;
                let index = row + self.app.cursor(pane).offset;
                if !self.app.select(pane, index) {
                    return Flow::Continue;
                }
                let window = Duration::from_millis(self.controls.double_click_ms);
                if self.app.register_click(pane, index, at, window) {
                    return self.apply(Action::Activate);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    pub fn apply(&mut self, action: Action) -> Flow {
        match action {
            Action::EnterSearch => self.app.enter_search(),
            Action::SearchInput(c) => self.app.push_search_char(c),
            Action::SearchBackspace => self.app.pop_search_char(),
            Action::EndSearch => self.app.end_search(),
            Action::MoveUp => self.app.move_selection(-1),
            Action::MoveDown => self.app.move_selection(1),
            Action::ToggleFocus => self.app.toggle_focus(),
            Action::Activate => self.activate(),
            Action::GoUp => {
                self.app.go_up();
                self.persist();
            }
            Action::TogglePause => self.send(Command::CyclePause),
            Action::SeekBackward => self.send(Command::Seek(-self.seek_seconds())),
            Action::SeekForward => self.send(Command::Seek(self.seek_seconds())),
            Action::VolumeDown => self.change_volume(-i32::from(self.controls.volume_step)),
            Action::VolumeUp => self.change_volume(i32::from(self.controls.volume_step)),
            Action::NextTrack => self.next_track(),
            Action::AddSelection => self.add_selection(),
            Action::RemoveSelection => {
                if let Some(index) = self.app.selected_track_index() {
                    self.app.session.playlist.remove_at(index);
                    self.app.refresh_playlist();
                    self.persist();
                }
            }
            Action::ClearPlaylist => {
                self.app.session.playlist.clear();
                self.app.refresh_playlist();
                self.persist();
            }
            Action::Quit => {
                self.persist();
                self.player.stop();
                return Flow::Quit;
            }
            Action::QuitAndPersist => {
                self.persist();
                self.player.stop_and_persist();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn seek_seconds(&self) -> i32 {
        i32::try_from(self.controls.seek_seconds).unwrap_or(i32::MAX)
    }

    fn activate(&mut self) {
        match self.app.focus {
            Focus::Browser => {
                let Some(entry) = self.app.selected_entry().cloned() else {
                    return;
                };
                if entry.is_parent {
                    self.app.go_up();
                } else if entry.is_dir {
                    self.app.change_dir(entry.path);
                } else if library::is_playlist_file(&entry.path) {
                    library::import_playlist_file(&mut self.app.session.playlist, &entry.path);
                    self.app.refresh_playlist();
                } else if library::is_audio_file(&entry.path) {
                    library::import_single_file(&mut self.app.session.playlist, &entry.path);
                    self.app.refresh_playlist();
                } else {
                    return;
                }
                self.persist();
            }
            Focus::Playlist => {
                if let Some(index) = self.app.selected_track_index() {
                    self.play(index);
                }
            }
        }
    }

    /// Like activating the browser selection, except that directories are
    /// imported instead of entered.
    fn add_selection(&mut self) {
        let Some(entry) = self.app.selected_entry().cloned() else {
            return;
        };
        if entry.is_parent {
            return;
        }
        let playlist = &mut self.app.session.playlist;
        let added = if entry.is_dir {
            library::import_directory(playlist, &entry.path)
        } else if library::is_playlist_file(&entry.path) {
            library::import_playlist_file(playlist, &entry.path)
        } else {
            library::import_single_file(playlist, &entry.path)
        };
        tracing::debug!(path = %entry.path.display(), added, "added to playlist");
        self.app.refresh_playlist();
        self.persist();
    }

    fn next_track(&mut self) {
        if let Some(index) = self.app.session.playlist.advance() {
            self.play(index);
        }
    }

    /// Make `index` the current track and start it.
    fn play(&mut self, index: usize) {
        if !self.app.session.playlist.set_current(index) {
            return;
        }
        self.persist();
        let Some(track) = self.app.session.playlist.current_track() else {
            return;
        };
        let target = track.path.clone();
        self.app.position = Position::ZERO;
        if let Err(e) = self.player.start(&target, self.app.session.volume) {
            tracing::warn!(track = %target, error = %e, "failed to start player");
        }
    }

    fn change_volume(&mut self, delta: i32) {
        let volume = self.app.session.adjust_volume(delta);
        self.send(Command::SetVolume(volume));
        self.persist();
    }

    /// Fire-and-forget: a missing or slow player is not an error here.
    fn send(&self, command: Command) {
        if let Err(e) = self.player.send(&command) {
            tracing::debug!(?command, error = %e, "player command dropped");
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.app.session) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "failed to save session");
        }
    }
}

/// Main terminal event loop: draws, waits for input until the next tick is
/// due, and feeds everything through the controller. Returns `Ok(())` when
/// shutdown is requested.
pub fn run<P: Player>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    controller: &mut Controller<P>,
    theme: &Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = controller.tick_interval();
    let mut next_tick = Instant::now() + tick;

    loop {
        terminal.draw(|f| ui::draw(f, controller.app(), theme))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let event = match event::read()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Mouse(mouse) => Some(AppEvent::Mouse {
                    event: mouse,
                    at: Instant::now(),
                }),
                Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
                _ => None,
            };
            if let Some(event) = event {
                if controller.handle(event) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        if Instant::now() >= next_tick {
            controller.handle(AppEvent::Tick);
            next_tick = Instant::now() + tick;
        }
    }
}
