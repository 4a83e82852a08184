//! Tiles (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, benches and
//! integration tests can write `tui_tiles::{core,engine,input,term,types}`.

pub use tui_tiles_core as core;
pub use tui_tiles_engine as engine;
pub use tui_tiles_input as input;
pub use tui_tiles_term as term;
pub use tui_tiles_types as types;
