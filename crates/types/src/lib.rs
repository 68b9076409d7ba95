//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, input aggregation, terminal rendering).
//!
//! # Board Dimensions
//!
//! The board has a doubled vertical resolution. A terminal character is about
//! twice as tall as it is wide, so every logical cell of a piece covers two
//! consecutive board rows ("half-rows") in the same column:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 40 half-rows (indexed 0-39), drawn as 20 text rows
//! - **Spawn position**: (3, 0)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Fixed frame duration |
//! | `BASE_SPEED_TICKS` | 10 | Ticks between automatic drops at score 0 |
//! | `SCORE_PER_SPEED_STEP` | 10 | Score needed to shave one tick off the divisor |
//! | `MIN_SPEED_TICKS` | 1 | Fastest gravity: a drop every tick |
//! | `GAME_OVER_PAUSE_MS` | 2000 | How long the final board stays on screen |
//!
//! The gravity divisor only gates how many ticks pass between automatic
//! drops. It never changes the tick duration.
//!
//! # Examples
//!
//! ```
//! use halfrow_tetris_types::{KeySet, LogicalKey, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("o"), Some(PieceKind::O));
//! assert_eq!(PieceKind::O.index(), 3);
//! assert_eq!(PieceKind::O.cell_id(), 4);
//!
//! let keys: KeySet = [LogicalKey::Left, LogicalKey::Up].into_iter().collect();
//! assert!(keys.contains(LogicalKey::Up));
//! assert!(!keys.contains(LogicalKey::Right));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 40);
//! ```

/// Board width in columns (10)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in half-rows (40, i.e. 20 visually square rows)
pub const BOARD_HEIGHT: u8 = 40;

/// Number of half-rows covered by one logical piece cell.
pub const HALF_ROWS_PER_CELL: u8 = 2;

/// Number of visible text rows (one per half-row pair).
pub const VISIBLE_ROWS: u8 = BOARD_HEIGHT / HALF_ROWS_PER_CELL;

/// Spawn column for every new piece.
pub const SPAWN_X: i8 = 3;

/// Spawn half-row for every new piece.
pub const SPAWN_Y: i8 = 0;

/// Number of piece families in the catalog.
pub const PIECE_KIND_COUNT: usize = 7;

/// Fixed frame duration in milliseconds.
pub const TICK_MS: u32 = 100;

/// Gravity divisor at score 0 (an automatic drop every 10 ticks).
pub const BASE_SPEED_TICKS: u32 = 10;

/// Score step that speeds gravity up by one tick.
pub const SCORE_PER_SPEED_STEP: u32 = 10;

/// Gravity divisor floor.
pub const MIN_SPEED_TICKS: u32 = 1;

/// Display pause after game over before the process exits.
pub const GAME_OVER_PAUSE_MS: u32 = 2000;


/// The seven piece families, in catalog order.
///
/// Each variant is named after the shape its catalog mask draws, so the
/// table order reads I, J, L, O, S, T, Z rather than any listing order. The
/// discriminant is the family index used by the catalog and, plus one, the
/// nonzero id written into locked board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All families in catalog order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Family index (0-6).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Nonzero board id for a locked cell of this family.
    pub fn cell_id(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_id`]. Returns `None` for 0 (empty).
    pub fn from_cell_id(id: u8) -> Option<Self> {
        match id {
            0 => None,
            n => Self::from_index(n as usize - 1),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use halfrow_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, remembered only for its render color
pub type Cell = Option<PieceKind>;

/// Logical keys a platform input source can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Left,
    Right,
    /// Rotate
    Up,
    /// Soft drop
    Down,
    /// Force this tick's gravity check
    Space,
    Hold,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 6] = [
        LogicalKey::Left,
        LogicalKey::Right,
        LogicalKey::Up,
        LogicalKey::Down,
        LogicalKey::Space,
        LogicalKey::Hold,
    ];

    #[inline(always)]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalKey::Left => "left",
            LogicalKey::Right => "right",
            LogicalKey::Up => "up",
            LogicalKey::Down => "down",
            LogicalKey::Space => "space",
            LogicalKey::Hold => "hold",
        }
    }
}

/// Set of logical keys active during one frame.
///
/// Duplicate or buffered events for the same key collapse into membership;
/// there is no event counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeySet {
    bits: u8,
}

impl KeySet {
    pub const EMPTY: KeySet = KeySet { bits: 0 };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub fn from_keys(keys: &[LogicalKey]) -> Self {
        keys.iter().copied().collect()
    }

    pub fn insert(&mut self, key: LogicalKey) {
        self.bits |= key.bit();
    }

    pub fn remove(&mut self, key: LogicalKey) {
        self.bits &= !key.bit();
    }

    pub fn contains(&self, key: LogicalKey) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn union(self, other: KeySet) -> KeySet {
        KeySet {
            bits: self.bits | other.bits,
        }
    }

    /// Keys in the set, in [`LogicalKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = LogicalKey> {
        let set = *self;
        LogicalKey::ALL.into_iter().filter(move |k| set.contains(*k))
    }
}

impl FromIterator<LogicalKey> for KeySet {
    fn from_iter<T: IntoIterator<Item = LogicalKey>>(iter: T) -> Self {
        let mut set = KeySet::new();
        set.extend(iter);
        set
    }
}

impl Extend<LogicalKey> for KeySet {
    fn extend<T: IntoIterator<Item = LogicalKey>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Remembered horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalDirection {
    Left,
    Right,
    #[default]
    None,
}

impl HorizontalDirection {
    /// Column offset a move in this direction applies.
    pub fn dx(self) -> i8 {
        match self {
            HorizontalDirection::Left => -1,
            HorizontalDirection::Right => 1,
            HorizontalDirection::None => 0,
        }
    }

    /// The logical key that holds this direction, if any.
    pub fn key(self) -> Option<LogicalKey> {
        match self {
            HorizontalDirection::Left => Some(LogicalKey::Left),
            HorizontalDirection::Right => Some(LogicalKey::Right),
            HorizontalDirection::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalDirection::Left => "left",
            HorizontalDirection::Right => "right",
            HorizontalDirection::None => "none",
        }
    }
}

/// The single prioritized action reported for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    /// `Up`: advance to the next rotation state
    Rotate,
    /// `Space`: fire this tick's gravity check regardless of speed
    Drop,
    /// `Hold`: swap with the hold slot
    Hold,
    /// `Down`: move a full cell down this tick
    SoftDrop,
}

impl ActionKey {
    /// Actions in priority order, highest first.
    pub const PRIORITY: [ActionKey; 4] = [
        ActionKey::Rotate,
        ActionKey::Drop,
        ActionKey::Hold,
        ActionKey::SoftDrop,
    ];

    pub fn key(self) -> LogicalKey {
        match self {
            ActionKey::Rotate => LogicalKey::Up,
            ActionKey::Drop => LogicalKey::Space,
            ActionKey::Hold => LogicalKey::Hold,
            ActionKey::SoftDrop => LogicalKey::Down,
        }
    }

    pub fn from_key(key: LogicalKey) -> Option<Self> {
        match key {
            LogicalKey::Up => Some(ActionKey::Rotate),
            LogicalKey::Space => Some(ActionKey::Drop),
            LogicalKey::Hold => Some(ActionKey::Hold),
            LogicalKey::Down => Some(ActionKey::SoftDrop),
            LogicalKey::Left | LogicalKey::Right => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::Rotate => "rotate",
            ActionKey::Drop => "drop",
            ActionKey::Hold => "hold",
            ActionKey::SoftDrop => "softDrop",
        }
    }
}

/// Canonical per-frame input consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputEvent {
    pub direction: HorizontalDirection,
    pub action: Option<ActionKey>,
}

impl InputEvent {
    /// No direction, no action.
    pub const NONE: InputEvent = InputEvent {
        direction: HorizontalDirection::None,
        action: None,
    };

    pub fn new(direction: HorizontalDirection, action: Option<ActionKey>) -> Self {
        Self { direction, action }
    }
}
