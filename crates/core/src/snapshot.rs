use crate::board::covered_cells;
use crate::game_state::ActivePiece;
use crate::pieces::get_shape;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Half-row cells covered with the piece's top at `y`.
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> {
        covered_cells(get_shape(self.kind, self.rotation), self.x, y)
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of everything a renderer needs for one frame.
///
/// `board` holds 0 for empty cells and family index + 1 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub speed: u32,
    pub tick: u32,
}

impl GameSnapshot {
    /// Render id at `(x, y)`, 0 when empty or out of bounds.
    pub fn cell_id(&self, x: i8, y: i8) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Half-row cells of the falling piece at its animated position.
    pub fn active_cells(&self) -> impl Iterator<Item = (i8, i8)> {
        self.active.into_iter().flat_map(|a| a.cells_at(a.y))
    }

    /// Half-row cells of the ghost projection.
    pub fn ghost_cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let ghost = self.active.zip(self.ghost_y);
        ghost.into_iter().flat_map(|(a, y)| a.cells_at(y))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: PieceKind::I,
            can_hold: true,
            game_over: false,
            score: 0,
            speed: 0,
            tick: 0,
        }
    }
}
