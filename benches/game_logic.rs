use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bloxorz::core::{resolve, Block, GameSnapshot, LevelCatalog, LevelController};
use bloxorz::term::{FrameBuffer, GameView, Viewport};
use bloxorz::types::{Coord, Direction, TICK_MS};

fn bench_roll_and_resolve(c: &mut Criterion) {
    let catalog = LevelCatalog::builtin();
    let level = catalog.get(0).unwrap();
    let board = level.board().clone();
    let start = Block::standing(Coord::new(2, 3));

    c.bench_function("roll_and_resolve_4_dirs", |b| {
        b.iter(|| {
            for dir in Direction::ALL {
                let next = black_box(start).roll(dir).unwrap();
                black_box(resolve(&board, &next));
            }
        })
    });
}

fn bench_controller_frame(c: &mut Criterion) {
    let mut game = LevelController::new(LevelCatalog::builtin(), 0).unwrap();
    let mut snap = GameSnapshot::default();
    let dirs = [Direction::Right, Direction::Left];
    let mut i = 0usize;

    c.bench_function("controller_frame_16ms", |b| {
        b.iter(|| {
            if game.is_idle() {
                game.submit_move(dirs[i % 2]).unwrap();
                i += 1;
            }
            game.tick(black_box(TICK_MS));
            game.snapshot_into(&mut snap);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let game = LevelController::new(LevelCatalog::builtin(), 3).unwrap();
    let snap = game.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    c.bench_function("render_80x24", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_roll_and_resolve,
    bench_controller_frame,
    bench_render
);
criterion_main!(benches);
