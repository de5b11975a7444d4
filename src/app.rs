//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the session, the two pane
//! listings, cursors, search state and the polled playback position.

mod model;

pub use model::*;
