use std::env;
use std::path::PathBuf;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::App;
use crate::config;
use crate::player::{MpvOptions, MpvPlayer};
use crate::session::SessionStore;
use crate::ui::{self, Theme};

mod event_loop;
mod input;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let state_path = config::resolve_state_path();
    startup::init_logging(&state_path);
    tracing::info!(state = %state_path.display(), "starting");

    let settings = settings::load_settings();
    let theme = Theme::from_settings(&settings);

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let store = SessionStore::new(&state_path);
    let session = store.load(&cwd);

    let options = MpvOptions::from_settings(&settings, settings.watch_later_dir(&state_path));
    let player = MpvPlayer::new(options);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let size = terminal.size()?;
        let app = App::new(session, ui::visible_rows(size.height));
        let area = Rect::new(0, 0, size.width, size.height);
        let mut controller =
            event_loop::Controller::new(app, player, store, settings.controls.clone(), area);
        controller.resume();

        event_loop::run(&mut terminal, &mut controller, &theme)
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    run_result
}
