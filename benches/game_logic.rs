use criterion::{black_box, criterion_group, criterion_main, Criterion};
use halfrow_tetris::core::{get_spawn_shape, Board, GameSnapshot, GameState};
use halfrow_tetris::input::InputAggregator;
use halfrow_tetris::term::{FrameBuffer, GameView, Viewport};
use halfrow_tetris::types::{ActionKey, HorizontalDirection, InputEvent, KeySet, LogicalKey, PieceKind};

fn bench_step(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("engine_step_idle", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state = GameState::new(12345);
                state.start();
            }
            state.step(black_box(InputEvent::NONE));
        })
    });
}

fn bench_soft_drop_game(c: &mut Criterion) {
    let soft = InputEvent::new(HorizontalDirection::None, Some(ActionKey::SoftDrop));

    c.bench_function("soft_drop_until_game_over", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(7));
            state.start();
            while !state.is_game_over() {
                state.step(soft);
            }
            state.pieces_locked()
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 lines (8 half-rows)
            for y in 32..40 {
                board.fill_row(y, PieceKind::I);
            }
            board.clear_full_lines().len()
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 20..40 {
        board.fill_row(y, PieceKind::Z);
    }
    let shape = get_spawn_shape(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| board.collides(black_box(shape), black_box(3), black_box(18)))
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let mut agg = InputAggregator::new();
    let frames = [
        KeySet::from_keys(&[LogicalKey::Left, LogicalKey::Up]),
        KeySet::from_keys(&[LogicalKey::Left, LogicalKey::Right]),
        KeySet::EMPTY,
    ];
    let mut i = 0;

    c.bench_function("aggregate_frame", |b| {
        b.iter(|| {
            i = (i + 1) % frames.len();
            agg.step(black_box(frames[i]))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = GameSnapshot::default();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_soft_drop_game,
    bench_line_clear,
    bench_collides,
    bench_aggregate,
    bench_render
);
criterion_main!(benches);
