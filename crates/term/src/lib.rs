//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`core::GameSnapshot`] into a [`FrameBuffer`] and the renderer flushes
//! only what changed since the previous frame. No widget toolkit is used.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use halfrow_tetris_core as core;
pub use halfrow_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
