//! End-to-end games through the public API
//!
//! Engines play each other through `GameState`, the same way a host drives
//! the library.

use std::time::{Duration, Instant};

use kinarow::{Board, Engine, GameState, GameStatus, Mark, Pos, SearchType, Variant};

// =============================================================================
// Helper functions
// =============================================================================

/// Play a full game; `x` moves first.
fn play_game(variant: Variant, x: &mut Engine, o: &mut Engine) -> GameStatus {
    let mut game = GameState::from_variant(variant);
    while !game.is_game_over() {
        let mover = game.current_mark();
        let engine = if mover == Mark::X { &mut *x } else { &mut *o };
        let mv = engine.request_move(game.board(), mover).unwrap();
        assert!(game.board().is_empty(mv), "{mv} is occupied");
        game.play(mv).unwrap();
    }
    game.status()
}

fn seeded(level: u8, seed: u64) -> Engine {
    Engine::new(level).unwrap().with_seed(seed)
}

// =============================================================================
// Strong play on 3x3
// =============================================================================

#[test]
fn top_level_self_play_on_3x3_draws() {
    for seed in 0..2 {
        let status = play_game(Variant::Easy, &mut seeded(10, seed), &mut seeded(10, seed + 1));
        assert_eq!(status, GameStatus::Drawn, "seed {seed}");
    }
}

#[test]
fn top_level_never_loses_on_3x3() {
    for (i, level) in [1u8, 2, 5, 7].into_iter().enumerate() {
        let seed = i as u64;

        let as_x = play_game(Variant::Easy, &mut seeded(10, seed), &mut seeded(level, seed));
        assert_ne!(as_x, GameStatus::Won(Mark::O), "level 10 as X lost to level {level}");

        let as_o = play_game(Variant::Easy, &mut seeded(level, seed), &mut seeded(10, seed));
        assert_ne!(as_o, GameStatus::Won(Mark::X), "level 10 as O lost to level {level}");
    }
}

#[test]
fn games_on_every_variant_terminate() {
    for variant in Variant::ALL {
        let status = play_game(variant, &mut seeded(1, 3), &mut seeded(3, 4));
        assert!(status.is_over(), "{variant}");
    }
}

// =============================================================================
// Deadlines on 6x6
// =============================================================================

#[test]
fn deep_levels_respect_deadline_on_6x6() {
    let mut board = Board::from_variant(Variant::Insane);
    board.place_mark(Pos::new(2, 2), Mark::X);

    for level in [7u8, 10] {
        let mut engine = seeded(level, 0);
        let budget = engine.tier().time_budget();

        let start = Instant::now();
        let result = engine.request_move_with_stats(&board, Mark::O).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed <= budget + Duration::from_secs(1),
            "level {level} took {elapsed:?} with a {budget:?} budget"
        );
        assert!(board.is_empty(result.best_move));
        assert!(matches!(
            result.search_type,
            SearchType::AlphaBeta | SearchType::Fallback
        ));
    }
}

// =============================================================================
// Host contract
// =============================================================================

#[test]
fn completing_cell_returned_at_every_level() {
    let board = Board::from_rows(&["XX.", "...", "..."]).unwrap();
    for level in 1..=10 {
        assert_eq!(
            kinarow::request_move(&board, Mark::X, level).unwrap(),
            Pos::new(0, 2),
            "level {level}"
        );
    }
}

#[test]
fn host_flow_with_reset() {
    let mut game = GameState::from_variant(Variant::Medium);
    let mut engine = seeded(4, 11);

    assert!(game.apply_move(0, 0));
    let reply = engine.request_move(game.board(), game.current_mark()).unwrap();
    assert!(game.apply_move(reply.row as usize, reply.col as usize));
    assert_eq!(game.move_count(), 2);
    assert_eq!(game.last_move(), Some(reply));

    game.reset();
    assert!(game.board().is_board_empty());
    assert_eq!(game.board().size(), 4);
    assert_eq!(game.current_mark(), Mark::X);
}
