//! Board module - manages the half-row game grid
//!
//! The board is a 10x40 grid of half-rows where each cell can be empty or
//! hold the family of the piece that locked there.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..39
//! (top to bottom, in half-rows).
//!
//! A shape cell `(r, c)` placed at `(x, y)` covers half-rows `y + 2r` and
//! `y + 2r + 1` in column `x + c`. Rows above the top edge are open space:
//! they never collide and writes to them are dropped.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HALF_ROWS_PER_CELL, VISIBLE_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Maximum number of lines (half-row pairs) a board can hold.
pub const MAX_LINES: usize = VISIBLE_ROWS as usize;

/// Half-row cells covered by `shape` at `(x, y)`.
pub fn covered_cells(shape: Shape, x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> {
    shape.cells().flat_map(move |(r, c)| {
        let top = y + (r * HALF_ROWS_PER_CELL) as i8;
        let nx = x + c as i8;
        [(nx, top), (nx, top + 1)]
    })
}

/// The game board - 10 columns x 40 half-rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Height in half-rows.
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` placed at `(x, y)` hits a wall, the floor, or a locked cell.
    ///
    /// Physics callers pass an even (aligned) `y`.
    pub fn collides(&self, shape: Shape, x: i8, y: i8) -> bool {
        covered_cells(shape, x, y).any(|(nx, ny)| {
            if nx < 0 || nx >= BOARD_WIDTH as i8 || ny >= BOARD_HEIGHT as i8 {
                return true;
            }
            ny >= 0 && self.is_occupied(nx, ny)
        })
    }

    /// Write `kind` into every in-bounds cell covered by `shape` at `(x, y)`.
    ///
    /// Out-of-range writes are dropped silently, so a piece locking partly
    /// above the top edge at game over does not fault.
    pub fn lock(&mut self, shape: Shape, x: i8, y: i8, kind: PieceKind) {
        for (nx, ny) in covered_cells(shape, x, y) {
            self.set(nx, ny, Some(kind));
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether the half-row pair starting at even row `row` is a full line.
    pub fn is_line_full(&self, row: usize) -> bool {
        if row % 2 != 0 || row + 1 >= BOARD_HEIGHT as usize {
            return false;
        }
        self.is_row_full(row) && self.is_row_full(row + 1)
    }

    /// Remove every full line and pack the remaining pairs downward.
    ///
    /// Returns the top half-row of each cleared pair, bottom to top. Pairs
    /// that are kept stay in their original order and the freed pairs become
    /// empty rows at the top. Uses a two-pointer pass with zero allocation.
    pub fn clear_full_lines(&mut self) -> ArrayVec<usize, MAX_LINES> {
        let mut cleared = ArrayVec::new();
        let pair_len = BOARD_WIDTH as usize * 2;
        let mut write_row = BOARD_HEIGHT as usize;

        for read_row in (0..BOARD_HEIGHT as usize).step_by(2).rev() {
            if self.is_line_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            write_row -= 2;
            if write_row != read_row {
                let src = read_row * BOARD_WIDTH as usize;
                let dst = write_row * BOARD_WIDTH as usize;
                self.cells.copy_within(src..src + pair_len, dst);
            }
        }

        let freed = write_row * BOARD_WIDTH as usize;
        self.cells[..freed].fill(None);

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export cells as render ids: 0 for empty, family index + 1 otherwise.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (row, chunk) in out.iter_mut().zip(self.cells.chunks_exact(BOARD_WIDTH as usize)) {
            for (dst, cell) in row.iter_mut().zip(chunk) {
                *dst = cell.map_or(0, PieceKind::cell_id);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill an entire half-row with `kind`.
    pub fn fill_row(&mut self, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, Some(kind));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
