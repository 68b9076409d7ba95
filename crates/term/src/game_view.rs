//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! One text row shows one half-row pair and every column is two characters
//! wide. A half-row pair whose halves differ is drawn with the upper (`▀`) or
//! lower (`▄`) half block, which is how the falling piece moves by half a
//! cell per drop.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, VISIBLE_ROWS};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// Terminal columns per board column.
const CELL_W: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);
const GHOST_FG: Rgb = Rgb::new(120, 120, 130);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// What one half-row of one column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Half {
    Empty,
    Ghost,
    Solid(PieceKind),
}

/// Board colour for a family.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

/// Glyph and style for a text cell whose upper half shows `top` and lower
/// half shows `bottom`.
fn compose(top: Half, bottom: Half) -> Cell {
    let solid = |fg| CellStyle::plain(fg, BOARD_BG);
    match (top, bottom) {
        (Half::Solid(a), Half::Solid(b)) if a == b => Cell::new('█', solid(piece_color(a))),
        (Half::Solid(a), Half::Solid(b)) => {
            Cell::new('▀', CellStyle::plain(piece_color(a), piece_color(b)))
        }
        (Half::Solid(a), _) => Cell::new('▀', solid(piece_color(a))),
        (_, Half::Solid(b)) => Cell::new('▄', solid(piece_color(b))),
        (Half::Ghost, _) | (_, Half::Ghost) => {
            Cell::new('▒', CellStyle::plain(GHOST_FG, BOARD_BG).dim())
        }
        (Half::Empty, Half::Empty) => Cell::new(' ', CellStyle::plain(BOARD_BG, BOARD_BG)),
    }
}

/// A lightweight terminal renderer for the half-row board.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Width and height of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (BOARD_WIDTH as u16 * CELL_W + 2, VISIBLE_ROWS as u16 + 2)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path once `fb` has reached the
    /// viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let halves = layer_halves(snap);
        for row in 0..VISIBLE_ROWS as usize {
            let py = start_y + 1 + row as u16;
            for x in 0..W {
                let cell = compose(halves[row * 2][x], halves[row * 2 + 1][x]);
                let px = start_x + 1 + x as u16 * CELL_W;
                fb.set(px, py, cell);
                fb.set(px + 1, py, cell);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.speed, value);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold),
            None => {
                fb.put_str(panel_x, y + 1, "-", value);
            }
        }
        y += 6;

        fb.put_str(panel_x, y, "NEXT", label);
        draw_preview(fb, panel_x, y + 1, snap.next, false);
    }
}

/// Per half-row contents: locked cells, then the ghost, then the active piece.
fn layer_halves(snap: &GameSnapshot) -> [[Half; W]; H] {
    let mut halves = [[Half::Empty; W]; H];
    for (y, row) in snap.board.iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            if let Some(kind) = PieceKind::from_cell_id(id) {
                halves[y][x] = Half::Solid(kind);
            }
        }
    }

    let mut place = |x: i8, y: i8, half: Half| {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= H {
            return;
        }
        let slot = &mut halves[y as usize][x as usize];
        if half != Half::Ghost || *slot == Half::Empty {
            *slot = half;
        }
    };

    for (x, y) in snap.ghost_cells() {
        place(x, y, Half::Ghost);
    }
    if let Some(active) = snap.active {
        for (x, y) in snap.active_cells() {
            place(x, y, Half::Solid(active.kind));
        }
    }
    halves
}

/// Spawn orientation of `kind`, one text row per shape row.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
    let mut style = CellStyle::plain(piece_color(kind), Rgb::new(0, 0, 0));
    if dim {
        style = style.dim();
    }
    for (r, c) in get_shape(kind, 0).cells() {
        let px = x + c as u16 * CELL_W;
        let py = y + r as u16;
        fb.put_char(px, py, '█', style);
        fb.put_char(px + 1, py, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
