//! Terminal input module (engine-facing).
//!
//! Raw key sources differ a lot between terminals: some report press and
//! release events, others only a stream of presses with auto-repeat. Each
//! source is wrapped in an [`InputAdapter`] that produces, once per frame,
//! the set of logical keys active right now. [`InputAggregator`] turns that
//! set into one canonical [`crate::types::InputEvent`], so the engine sees
//! the same behavior whichever adapter feeds it.

pub mod aggregator;
pub mod map;
pub mod source;

pub use halfrow_tetris_types as types;

pub use aggregator::InputAggregator;
pub use map::{logical_key, should_quit};
pub use source::{
    detect_backend, BufferedInput, InputAdapter, InputBackend, KeyStateInput, ScriptedInput,
};
