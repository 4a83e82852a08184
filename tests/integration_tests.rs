//! Integration tests for the game loop

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tui_tiles::core::{Canvas, Config, Game, NoopNotifier, RawConfig, Row, TickOutcome};
use tui_tiles::types::Point;

fn new_game(row: u8, level: u8, seed: u32) -> Game {
    let mut game = Game::new(Canvas::new(500, 500), Config::new(row, level).unwrap())
        .unwrap()
        .with_seed(seed);
    game.set_notifier(NoopNotifier);
    game
}

fn center_of(row: &Row) -> Point {
    let r = row.visible_rect();
    Point::new(r.left + r.width / 2.0, r.top + r.height / 2.0)
}

#[test]
fn test_geometry_for_every_valid_config() {
    for width in [320u32, 500, 777] {
        for row in 2..=8u8 {
            for level in 1..=3u8 {
                let game = Game::new(Canvas::new(width, 600), Config::new(row, level).unwrap())
                    .unwrap();
                let column_width = width as f32 / row as f32;
                assert_eq!(game.column_width(), column_width);
                assert_eq!(game.row_height(), (column_width * 2.0).floor());
            }
        }
    }
}

#[test]
fn test_invalid_configs_fail() {
    for json in [
        r#"{"row": 1}"#,
        r#"{"row": 9}"#,
        r#"{"level": 0}"#,
        r#"{"level": 4}"#,
        r#"{"row": "5"}"#,
        r#"{"level": [1]}"#,
    ] {
        let raw = RawConfig::from_json(json).unwrap();
        assert!(Config::from_raw(&raw).is_err(), "{json} should be rejected");
    }
}

#[test]
fn test_reference_example_500x500() {
    let mut game = new_game(5, 1, 1);
    assert_eq!(game.column_width(), 100.0);
    assert_eq!(game.row_height(), 200.0);

    game.start();
    assert_eq!(game.rows()[0].bottom_offset(), 0.0);

    for _ in 0..200 {
        assert_eq!(game.tick(), TickOutcome::Advanced);
    }
    assert_eq!(game.rows().len(), 1);
    assert_eq!(game.rows()[0].bottom_offset(), 200.0);

    // Next tick spawns the second row exactly one row height behind.
    game.tick();
    assert_eq!(game.rows().len(), 2);
    assert_eq!(game.rows()[1].bottom_offset(), 1.0);

    for _ in 201..500 {
        assert_eq!(game.tick(), TickOutcome::Advanced);
    }
    assert_eq!(game.rows()[0].bottom_offset(), 500.0);
    assert_eq!(game.tick(), TickOutcome::Failed);
}

#[test]
fn test_rows_stay_one_row_height_apart() {
    // Keep the game alive by tapping the front row once it is well inside the
    // board, and change speed along the way.
    let mut game = new_game(3, 1, 99);
    let row_height = game.row_height();
    game.start();

    for i in 0..3000 {
        if i == 700 {
            game.switch_level(3).unwrap();
        }
        if i == 1900 {
            game.switch_level(2).unwrap();
        }

        if let Some(front) = game.front_row() {
            if front.bottom_offset() > 350.0 {
                let p = center_of(front);
                assert!(game.hit(p));
            }
        }
        assert_eq!(game.tick(), TickOutcome::Advanced, "failed at tick {i}");

        for pair in game.rows().windows(2) {
            assert_eq!(
                pair[0].bottom_offset() - pair[1].bottom_offset(),
                row_height,
                "tick {i}"
            );
        }
    }
}

#[test]
fn test_only_front_row_is_hittable() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();

    let mut game = new_game(5, 1, 2024);
    game.set_on_hit(move || {
        h.fetch_add(1, Ordering::SeqCst);
    });
    game.start();
    for _ in 0..300 {
        game.tick();
    }
    assert_eq!(game.rows().len(), 2);
    assert_eq!(game.rows()[0].bottom_offset(), 300.0);
    assert_eq!(game.rows()[1].bottom_offset(), 100.0);

    // Center of the second row is at least 40 units clear of the front row's
    // padded region, whichever columns they are in.
    let second = center_of(&game.rows()[1]);
    assert!(!game.hit(second));
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let front = center_of(&game.rows()[0]);
    assert!(game.hit(front));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // The flagged row is still drawn this tick; the second row is now the front.
    assert_eq!(game.rows().len(), 2);
    assert_eq!(game.front_row().unwrap().bottom_offset(), 100.0);

    game.tick();
    assert_eq!(game.rows().len(), 1);
    assert_eq!(game.rows()[0].bottom_offset(), 101.0);

    let next = center_of(&game.rows()[0]);
    assert!(game.hit(next));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_hit_region_tolerance_edges() {
    let mut game = new_game(5, 1, 5);
    game.start();
    for _ in 0..100 {
        game.tick();
    }
    let region = game.rows()[0].hit_region();

    let outside = Point::new(region.right() + 0.5, region.top + 20.0);
    assert!(!game.hit(outside));

    let corner = Point::new(region.right(), region.bottom());
    assert!(game.hit(corner));
}

#[test]
fn test_game_over_fires_once_and_freezes() {
    let fails = Arc::new(AtomicU32::new(0));
    let f = fails.clone();

    let mut game = new_game(5, 2, 3);
    game.set_on_failed(move || {
        f.fetch_add(1, Ordering::SeqCst);
    });
    game.start();

    let mut ticks = 0;
    while game.tick() != TickOutcome::Failed {
        ticks += 1;
    }
    // 500 / 2 ticks to reach the bottom; detected on the next one.
    assert_eq!(ticks, 250);
    assert_eq!(fails.load(Ordering::SeqCst), 1);

    let offsets: Vec<f32> = game.rows().iter().map(|r| r.bottom_offset()).collect();
    for _ in 0..10 {
        assert_eq!(game.tick(), TickOutcome::Idle);
    }
    let after: Vec<f32> = game.rows().iter().map(|r| r.bottom_offset()).collect();
    assert_eq!(offsets, after);
    assert_eq!(fails.load(Ordering::SeqCst), 1);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = new_game(4, 3, 8);
    game.start();
    while game.tick() != TickOutcome::Failed {}

    game.restart();
    assert!(!game.is_failed());
    assert!(game.is_running());
    assert_eq!(game.rows().len(), 1);
    assert_eq!(game.rows()[0].bottom_offset(), 0.0);
    // Restart always comes back at level 1.
    assert_eq!(game.level(), 1);

    game.tick();
    assert_eq!(game.rows()[0].bottom_offset(), 1.0);
}

#[test]
fn test_stop_and_resume() {
    let mut game = new_game(5, 1, 4);
    game.start();
    for _ in 0..10 {
        game.tick();
    }
    game.stop();
    game.stop();
    assert_eq!(game.tick(), TickOutcome::Idle);
    assert_eq!(game.rows()[0].bottom_offset(), 10.0);

    game.start();
    assert_eq!(game.rows().len(), 1);
    game.tick();
    assert_eq!(game.rows()[0].bottom_offset(), 11.0);
}

#[test]
fn test_snapshot_serializes() {
    let mut game = new_game(5, 1, 4);
    game.start();
    game.tick();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["columns"], 5);
    assert_eq!(json["rows"][0]["bottom_offset"], 1.0);
    assert_eq!(json["running"], true);
}
