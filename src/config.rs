//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (theme, player and control
//! tunables) and helpers to locate the config and session files on disk.

mod load;
mod schema;

pub use load::resolve_state_path;
pub use schema::*;
