mod app;
mod config;
mod error;
mod library;
mod player;
mod runtime;
mod session;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("cyan: {e}");
        std::process::exit(1);
    }
}
