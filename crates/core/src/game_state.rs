//! Game state module - the engine
//!
//! Ties together the board, the piece catalog, and the random piece source.
//! One call to [`GameState::step`] is one fixed-rate tick: it applies the
//! frame's canonical input, runs gravity, and on landing locks the piece,
//! clears lines and spawns the next one.
//!
//! The active piece falls half a row per automatic drop, which animates it
//! smoothly, but every physics decision uses its vertical offset rounded
//! down to an even half-row.

use tracing::{debug, info};

use crate::board::{covered_cells, Board};
use crate::pieces::{get_shape, next_rotation, Shape};
use crate::rng::PieceRandomizer;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Ticks between automatic drops for a given score.
///
/// Linear in score, one tick faster per [`SCORE_PER_SPEED_STEP`] points,
/// floored at [`MIN_SPEED_TICKS`].
pub fn gravity_speed(score: u32) -> u32 {
    BASE_SPEED_TICKS
        .saturating_sub(score / SCORE_PER_SPEED_STEP)
        .max(MIN_SPEED_TICKS)
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    /// Vertical offset in half-rows; may be odd mid-animation.
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> Shape {
        get_shape(self.kind, self.rotation)
    }

    /// `y` with the low bit cleared; the offset physics works with.
    pub fn y_aligned(&self) -> i8 {
        self.y & !1
    }

    /// Half-row cells at the animated position.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        covered_cells(self.shape(), self.x, self.y)
    }
}

/// Engine lifecycle.
///
/// Locking and line clearing finish inside the tick that lands a piece, so
/// between ticks the engine is always in one of these phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, first piece not spawned yet
    Spawning,
    Falling,
    /// Terminal
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do: not started, or already over
    Idle,
    /// A piece is still falling
    Falling,
    /// A piece locked and the next one spawned
    Locked { lines_cleared: u32 },
    /// The game ended this tick
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    next: PieceKind,
    pieces: PieceRandomizer,
    phase: Phase,
    score: u32,
    tick: u32,
    used_hold: bool,
    pieces_locked: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a game on a prepared board.
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut pieces = PieceRandomizer::new(seed);
        let next = pieces.next_kind();

        Self {
            board,
            active: None,
            hold: None,
            next,
            pieces,
            phase: Phase::Spawning,
            score: 0,
            tick: 0,
            used_hold: false,
            pieces_locked: 0,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Spawning {
            return;
        }
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current gravity divisor in ticks.
    pub fn speed(&self) -> u32 {
        gravity_speed(self.score)
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    /// Whether hold is still available for the current piece.
    pub fn can_hold(&self) -> bool {
        !self.used_hold
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn seed(&self) -> u32 {
        self.pieces.seed()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Resting half-row of the active piece if it fell straight down.
    ///
    /// Advisory only; physics never reads it.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let shape = piece.shape();

        let mut y = piece.y_aligned();
        while !self.board.collides(shape, piece.x, y + 2) {
            y += 2;
        }
        Some(y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next = self.next;
        out.can_hold = self.can_hold();
        out.game_over = self.is_game_over();
        out.score = self.score;
        out.speed = self.speed();
        out.tick = self.tick;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the game by one tick.
    pub fn step(&mut self, input: InputEvent) -> StepOutcome {
        if self.phase != Phase::Falling {
            return StepOutcome::Idle;
        }
        let Some(mut piece) = self.active else {
            return StepOutcome::Idle;
        };

        let tick = self.tick;
        self.tick = self.tick.wrapping_add(1);

        // Sampled once: every check in this tick uses it, even after a hold
        // has moved the piece back to the spawn row.
        let y_aligned = piece.y_aligned();

        // Horizontal move
        let dx = input.direction.dx();
        if dx != 0 && !self.board.collides(piece.shape(), piece.x + dx, y_aligned) {
            piece.x += dx;
        }

        match input.action {
            Some(ActionKey::Rotate) => {
                let rotation = next_rotation(piece.kind, piece.rotation);
                let shape = get_shape(piece.kind, rotation);
                if !self.board.collides(shape, piece.x, y_aligned) {
                    piece.rotation = rotation;
                }
            }
            Some(ActionKey::Hold) if !self.used_hold => piece = self.hold_swap(piece.kind),
            _ => {}
        }
        self.active = Some(piece);

        let forced = matches!(input.action, Some(ActionKey::SoftDrop | ActionKey::Drop));
        if !forced && tick % self.speed() != 0 {
            return StepOutcome::Falling;
        }

        if self.board.collides(piece.shape(), piece.x, y_aligned + 2) {
            return self.lock_piece(y_aligned);
        }

        piece.y += if input.action == Some(ActionKey::SoftDrop) {
            2
        } else {
            1
        };
        self.active = Some(piece);
        StepOutcome::Falling
    }

    /// Put `current` into the hold slot and bring in the replacement at the
    /// spawn position.
    fn hold_swap(&mut self, current: PieceKind) -> ActivePiece {
        self.used_hold = true;

        let incoming = match self.hold.replace(current) {
            Some(held) => held,
            None => self.take_next(),
        };
        debug!(held = current.as_str(), incoming = incoming.as_str(), "hold");

        ActivePiece::new(incoming)
    }

    /// Merge the active piece into the board, clear lines, spawn the next one.
    fn lock_piece(&mut self, y: i8) -> StepOutcome {
        let Some(piece) = self.active.take() else {
            return StepOutcome::Idle;
        };

        self.board.lock(piece.shape(), piece.x, y, piece.kind);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines_cleared = self.board.clear_full_lines().len() as u32;
        self.score += lines_cleared;
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y,
            lines_cleared,
            score = self.score,
            "piece locked"
        );

        if !self.spawn_piece() {
            return StepOutcome::GameOver;
        }
        StepOutcome::Locked { lines_cleared }
    }

    /// Spawn a new piece from the next slot
    ///
    /// Returns false (and ends the game) if it collides at the spawn position.
    fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::new(self.take_next());
        self.used_hold = false;

        if self.blocked_at_spawn(&piece) {
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    fn take_next(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.pieces.next_kind())
    }

    fn blocked_at_spawn(&self, piece: &ActivePiece) -> bool {
        self.board
            .collides(piece.shape(), piece.x, piece.y_aligned())
    }

    fn end_game(&mut self) {
        self.active = None;
        self.phase = Phase::GameOver;
        info!(
            score = self.score,
            pieces = self.pieces_locked,
            "game over"
        );
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_with(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.next = kind;
        state.start();
        state
    }

    fn input(action: Option<ActionKey>) -> InputEvent {
        InputEvent::new(HorizontalDirection::None, action)
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, Phase::Spawning);
        assert!(state.active.is_none());
        assert!(state.hold.is_none());
        assert_eq!(state.score, 0);
        assert!(state.can_hold());
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        let first = state.next;

        state.start();
        assert_eq!(state.phase, Phase::Falling);
        let active = state.active.unwrap();
        assert_eq!(active.kind, first);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn test_step_before_start_is_idle() {
        let mut state = GameState::new(12345);
        assert_eq!(state.step(InputEvent::NONE), StepOutcome::Idle);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_gravity_fires_on_speed_multiples() {
        let mut state = started_with(PieceKind::T);

        // Tick 0 fires.
        state.step(InputEvent::NONE);
        assert_eq!(state.active.unwrap().y, 1);

        // Ticks 1..=9 do not.
        for _ in 1..10 {
            state.step(InputEvent::NONE);
        }
        assert_eq!(state.active.unwrap().y, 1);

        // Tick 10 fires again.
        state.step(InputEvent::NONE);
        assert_eq!(state.active.unwrap().y, 2);
    }

    #[test]
    fn test_soft_drop_moves_a_full_cell() {
        let mut state = started_with(PieceKind::T);
        state.step(InputEvent::NONE); // tick 0, y = 1
        state.step(input(Some(ActionKey::SoftDrop)));
        assert_eq!(state.active.unwrap().y, 3);
    }

    #[test]
    fn test_drop_key_forces_half_row_gravity() {
        let mut state = started_with(PieceKind::T);
        state.step(InputEvent::NONE); // tick 0, y = 1
        state.step(input(Some(ActionKey::Drop)));
        assert_eq!(state.active.unwrap().y, 2);
    }

    #[test]
    fn test_horizontal_move_stops_at_wall() {
        let mut state = started_with(PieceKind::O);
        let left = InputEvent::new(HorizontalDirection::Left, None);
        for _ in 0..10 {
            state.step(left);
        }
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_move_uses_aligned_row() {
        let mut state = started_with(PieceKind::O);
        state.step(InputEvent::NONE); // y = 1

        // A locked cell in the half-row just below the aligned footprint
        // must not block the move even though the animated piece overlaps it.
        state.board_mut().set(2, 4, Some(PieceKind::I));
        state.step(InputEvent::new(HorizontalDirection::Left, None));
        assert_eq!(state.active.unwrap().x, 2);
    }

    #[test]
    fn test_rotate_cycles_states() {
        let mut state = started_with(PieceKind::T);
        for expected in [1, 2, 3, 0] {
            state.step(input(Some(ActionKey::Rotate)));
            assert_eq!(state.active.unwrap().rotation, expected);
        }
    }

    #[test]
    fn test_rotate_fails_silently_on_collision() {
        let mut state = started_with(PieceKind::I);
        // Vertical I at x=3 covers column 3 down to half-row 7.
        state.board_mut().set(3, 6, Some(PieceKind::O));

        state.step(input(Some(ActionKey::Rotate)));
        let active = state.active.unwrap();
        assert_eq!(active.rotation, 0);
        assert_eq!(active.x, SPAWN_X);
    }

    #[test]
    fn test_hold_into_empty_slot_pulls_next() {
        let mut state = started_with(PieceKind::T);
        let next = state.next;

        state.step(input(Some(ActionKey::Hold)));
        assert_eq!(state.hold, Some(PieceKind::T));
        assert_eq!(state.active.unwrap().kind, next);
        assert!(!state.can_hold());
    }

    #[test]
    fn test_hold_twice_is_ignored() {
        let mut state = started_with(PieceKind::T);
        state.step(input(Some(ActionKey::Hold)));
        let after_first = (state.hold, state.active.unwrap().kind, state.next);

        state.step(input(Some(ActionKey::Hold)));
        assert_eq!(
            (state.hold, state.active.unwrap().kind, state.next),
            after_first
        );
    }

    #[test]
    fn test_hold_swaps_and_resets_position() {
        let mut state = started_with(PieceKind::T);
        state.hold = Some(PieceKind::I);

        for _ in 0..3 {
            state.step(input(Some(ActionKey::SoftDrop)));
        }
        state.step(InputEvent::new(
            HorizontalDirection::Right,
            Some(ActionKey::Hold),
        ));

        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!(state.hold, Some(PieceKind::T));
        assert_eq!((active.x, active.rotation), (SPAWN_X, 0));
        assert!(active.y <= 1);
    }

    #[test]
    fn test_hold_keeps_alignment_sampled_before_swap() {
        let mut state = started_with(PieceKind::T);
        state.hold = Some(PieceKind::O);
        state.active = Some(ActivePiece {
            y: 37,
            ..state.active.unwrap()
        });

        // Tick 0 runs gravity; the O is checked and locked at row 36.
        let outcome = state.step(input(Some(ActionKey::Hold)));
        assert_eq!(outcome, StepOutcome::Locked { lines_cleared: 0 });
        assert_eq!(state.pieces_locked, 1);
        for y in 36..40 {
            assert_eq!(state.board.get(3, y), Some(Some(PieceKind::O)));
            assert_eq!(state.board.get(4, y), Some(Some(PieceKind::O)));
        }
        assert_eq!(state.hold, Some(PieceKind::T));
    }

    #[test]
    fn test_hold_into_occupied_spawn_keeps_falling() {
        let mut state = started_with(PieceKind::T);
        state.hold = Some(PieceKind::I);
        state.board_mut().set(5, 0, Some(PieceKind::Z));

        let outcome = state.step(input(Some(ActionKey::Hold)));
        assert_eq!(outcome, StepOutcome::Falling);
        assert_eq!(state.phase, Phase::Falling);
        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!(active.y, 1);
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = started_with(PieceKind::I);
        for y in 38..40 {
            for x in 0..10 {
                if !(3..7).contains(&x) {
                    state.board_mut().set(x, y, Some(PieceKind::O));
                }
            }
        }
        state.active = Some(ActivePiece {
            y: 36,
            ..state.active.unwrap()
        });

        state.step(input(Some(ActionKey::SoftDrop)));
        assert_eq!(state.active.unwrap().y, 38);

        let outcome = state.step(input(Some(ActionKey::SoftDrop)));
        assert_eq!(outcome, StepOutcome::Locked { lines_cleared: 1 });
        assert_eq!(state.score, 1);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
        assert!(state.can_hold());
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut state = started_with(PieceKind::O);
        // A ledge right under the spawn footprint makes the O lock at the
        // top, where every family's spawn state overlaps it.
        state.board_mut().fill_row(4, PieceKind::Z);
        state.board_mut().set(0, 4, None);

        let outcome = state.step(input(Some(ActionKey::SoftDrop)));
        assert_eq!(outcome, StepOutcome::GameOver);
        assert!(state.is_game_over());
        assert!(state.active.is_none());
        assert_eq!(state.pieces_locked, 1);
        assert_eq!(state.step(InputEvent::NONE), StepOutcome::Idle);
    }

    #[test]
    fn test_gravity_speed_curve() {
        assert_eq!(gravity_speed(0), 10);
        assert_eq!(gravity_speed(9), 10);
        assert_eq!(gravity_speed(10), 9);
        assert_eq!(gravity_speed(85), 2);
        assert_eq!(gravity_speed(90), 1);
        assert_eq!(gravity_speed(10_000), 1);
    }

    #[test]
    fn test_ghost_y_on_empty_board() {
        let mut state = started_with(PieceKind::O);
        assert_eq!(state.ghost_y(), Some(36));

        state.step(InputEvent::NONE); // y = 1
        assert_eq!(state.ghost_y(), Some(36));
    }

    #[test]
    fn test_snapshot_matches_state() {
        let state = started_with(PieceKind::S);
        let snap = state.snapshot();

        assert_eq!(snap.active.unwrap().kind, PieceKind::S);
        assert_eq!(snap.next, state.next);
        assert_eq!(snap.speed, 10);
        assert!(!snap.game_over);
        assert_eq!(snap.active_cells().count(), 8);
        assert_eq!(snap.ghost_cells().count(), 8);
    }
}
