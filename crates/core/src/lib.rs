//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, headless)
//! - **Fast**: Zero-allocation hot paths for game tick processing
//!
//! # Module Structure
//!
//! - [`pieces`]: Bit-packed shape catalog, 7 families with precomputed rotation states
//! - [`board`]: 10x40 half-row board with collision, locking and line clearing
//! - [`rng`]: Uniform random piece selection
//! - [`game_state`]: The engine: active piece, hold/next, score, gravity
//! - [`snapshot`]: Read-only render view
//!
//! # Game Rules
//!
//! - **Half-rows**: each piece cell covers two board rows so pieces look square
//! - **Sub-row gravity**: pieces fall half a row at a time; physics uses the even row
//! - **Rotation**: cycles through precomputed states, no wall kicks
//! - **Ghost Piece**: Shows where the current piece will land
//! - **Hold**: Store one piece for later use (once per piece)
//! - **Scoring**: one point per cleared line; gravity speeds up every 10 points
//!
//! # Example
//!
//! ```
//! use halfrow_tetris_core::{GameState, StepOutcome};
//! use halfrow_tetris_types::{ActionKey, HorizontalDirection, InputEvent};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! let input = InputEvent::new(HorizontalDirection::Right, Some(ActionKey::SoftDrop));
//! assert_eq!(game.step(input), StepOutcome::Falling);
//! assert_eq!(game.active().unwrap().y, 2);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use halfrow_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{gravity_speed, ActivePiece, GameState, Phase, StepOutcome};
pub use pieces::{get_shape, get_spawn_shape, next_rotation, rotation_count, rotation_states, Shape};
pub use rng::{PieceRandomizer, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
