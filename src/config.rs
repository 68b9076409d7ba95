//! Environment configuration for the binaries.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_TICK_MS` | 100 | Frame duration in milliseconds |
//! | `TETRIS_SEED` | wall clock | Piece sequence seed |
//! | `TETRIS_INPUT` | `auto` | `auto`, `keystate` or `buffered` |
//! | `TETRIS_GAME_OVER_PAUSE_MS` | 2000 | How long the final board stays up |
//! | `TETRIS_LOG_PATH` | unset | Log file; no logging when unset |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::input::InputBackend;
use crate::types::{GAME_OVER_PAUSE_MS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub tick_ms: u32,
    pub seed: Option<u32>,
    pub input: InputBackend,
    pub game_over_pause_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            seed: None,
            input: InputBackend::Auto,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_ms = lookup("TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.tick_ms);

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let input = lookup("TETRIS_INPUT")
            .and_then(|s| InputBackend::from_str(&s))
            .unwrap_or(defaults.input);

        let game_over_pause_ms = lookup("TETRIS_GAME_OVER_PAUSE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.game_over_pause_ms);

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .map(PathBuf::from);

        Self {
            tick_ms,
            seed,
            input,
            game_over_pause_ms,
            log_path,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms as u64)
    }

    /// Configured seed, or one taken from the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
