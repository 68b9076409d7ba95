//! Half-row terminal Tetris (workspace facade crate).
//!
//! The game logic, input handling and rendering live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `halfrow_tetris::{core,input,term,types}` and adds process-level
//! configuration and logging for the binaries.

pub mod config;
pub mod logging;

pub use halfrow_tetris_core as core;
pub use halfrow_tetris_input as input;
pub use halfrow_tetris_term as term;
pub use halfrow_tetris_types as types;

pub use config::GameConfig;
