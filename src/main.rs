//! Half-row terminal Tetris (default binary).
//!
//! Runs a fixed-rate loop: poll the input adapter, fold the keys into one
//! canonical event, advance the engine one tick, render, sleep out the rest
//! of the tick.

use std::thread;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info};

use halfrow_tetris::core::{GameSnapshot, GameState};
use halfrow_tetris::input::{BufferedInput, InputAdapter, InputAggregator, InputBackend, KeyStateInput};
use halfrow_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use halfrow_tetris::{logging, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let _log_guard = logging::init(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_selected(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "game loop failed");
    }
    result
}

/// Pick the adapter once; the loop itself is monomorphized per adapter.
fn run_selected(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    match config.input.resolve() {
        InputBackend::KeyState => run(term, config, KeyStateInput::attach()?),
        InputBackend::Buffered | InputBackend::Auto => run(term, config, BufferedInput::new()),
    }
}

fn run<A: InputAdapter>(term: &mut TerminalRenderer, config: &GameConfig, mut input: A) -> Result<()> {
    let mut game = GameState::new(config.resolve_seed());
    game.start();
    info!(
        adapter = input.name(),
        seed = game.seed(),
        tick_ms = config.tick_ms,
        "starting game"
    );

    let mut aggregator = InputAggregator::new();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = config.tick();
    let mut game_over_at: Option<Instant> = None;

    loop {
        let frame_start = Instant::now();

        let keys = input.poll()?;
        if input.quit_requested() {
            info!("quit requested");
            break;
        }

        game.step(aggregator.step(keys));
        if game.is_game_over() && game_over_at.is_none() {
            game_over_at = Some(frame_start);
        }

        game.snapshot_into(&mut snap);
        let (w, h) = term.viewport_size();
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(at) = game_over_at {
            if at.elapsed() >= config.game_over_pause() {
                break;
            }
        }

        if let Some(rest) = tick.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    info!(
        score = game.score(),
        pieces = game.pieces_locked(),
        ticks = game.tick_count(),
        "game finished"
    );
    Ok(())
}
