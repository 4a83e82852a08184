use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_tiles::core::{Canvas, Config, Game, NoopNotifier, TickOutcome};
use tui_tiles::term::{GameView, Viewport};
use tui_tiles::types::Point;

fn new_game(row: u8, level: u8) -> Game {
    let mut game = Game::new(Canvas::new(500, 500), Config::new(row, level).unwrap())
        .unwrap()
        .with_seed(12345);
    game.set_notifier(NoopNotifier);
    game.start();
    game
}

fn bench_tick(c: &mut Criterion) {
    let mut game = new_game(5, 1);

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if game.tick() == TickOutcome::Failed {
                game.restart();
            }
        })
    });
}

fn bench_tick_many_rows(c: &mut Criterion) {
    // Eight narrow columns keep three rows on screen at once.
    let mut game = new_game(8, 3);

    c.bench_function("game_tick_8_columns", |b| {
        b.iter(|| {
            if game.tick() == TickOutcome::Failed {
                game.restart();
            }
        })
    });
}

fn bench_hit_miss(c: &mut Criterion) {
    let mut game = new_game(5, 1);
    for _ in 0..100 {
        game.tick();
    }

    c.bench_function("hit_miss", |b| {
        b.iter(|| game.hit(black_box(Point::new(-100.0, -100.0))))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = new_game(5, 2);
    for _ in 0..150 {
        game.tick();
    }
    let snap = game.snapshot();
    let view = GameView::default();

    c.bench_function("render_80x28", |b| {
        b.iter(|| view.render(game.surface(), &snap, None, black_box(Viewport::new(80, 28))))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_tick_many_rows,
    bench_hit_miss,
    bench_render
);
criterion_main!(benches);
