//! Durable session: working directory, playlist, current track and volume.
//!
//! `SessionState` is the in-memory form mutated by the event loop and
//! `SessionStore` moves it to and from the JSON session file.

mod state;
mod store;
mod track;

pub use state::*;
pub use store::SessionStore;
pub use track::TrackRef;

#[cfg(test)]
mod tests;
