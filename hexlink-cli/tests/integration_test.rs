//! Integration tests for the Hexlink engine
//!
//! Drives the full stack through random self-play and checks the game
//! invariants that the unit tests cannot see from inside one module:
//! termination, winner uniqueness and winner monotonicity.

use hexlink_core::{
    Board, Coord, HexError, MoveStrategy, PlayerId, RandomMover, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
    PLAYER_IDS,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Play one random game to completion, checking invariants after every move
fn play_random_game(size: usize, seed: u64) -> (Board, Vec<Coord>) {
    let mut board = Board::new(size).unwrap();
    let mut white = RandomMover::with_seed(seed);
    let mut black = RandomMover::with_seed(seed + 1);
    let mut history = Vec::new();
    let mut winner_seen: Option<PlayerId> = None;

    while !board.is_game_over() {
        assert!(
            history.len() < size * size,
            "game did not finish within {} moves",
            size * size
        );
        let mover: &mut dyn MoveStrategy = match board.current_player() {
            PlayerId::White => &mut white,
            PlayerId::Black => &mut black,
        };
        let coord = board.suggest_move(mover).unwrap().expect("a free cell");
        board.place(coord).unwrap();
        history.push(coord);

        let winners: Vec<PlayerId> = PLAYER_IDS
            .into_iter()
            .filter(|&p| board.has_won(p))
            .collect();
        assert!(winners.len() <= 1, "two winners after {history:?}");
        if let Some(p) = winner_seen {
            assert!(board.has_won(p), "winner flag retracted");
        }
        winner_seen = winners.first().copied();
    }
    (board, history)
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

#[test]
fn random_games_finish_with_exactly_one_winner() {
    for size in [MIN_BOARD_SIZE, 7, MAX_BOARD_SIZE] {
        for seed in 0..16 {
            let (board, history) = play_random_game(size, seed * 31);
            let winners: Vec<PlayerId> = PLAYER_IDS
                .into_iter()
                .filter(|&p| board.has_won(p))
                .collect();
            assert_eq!(winners.len(), 1, "size {size}, seed {seed}: {history:?}");
        }
    }
}

#[test]
fn occupancy_stays_disjoint_and_consistent() {
    let (board, history) = play_random_game(7, 1234);
    let white = board.pieces_of(PlayerId::White);
    let black = board.pieces_of(PlayerId::Black);
    assert!(white.is_disjoint(&black));
    assert_eq!(white.len() + black.len(), history.len());
    // White moved first, so White has equal or one more piece
    assert!(white.len() == black.len() || white.len() == black.len() + 1);
}

#[test]
fn finished_game_rejects_everything_but_queries() {
    let (mut board, _) = play_random_game(5, 99);
    let free = board.free_cells().next();
    if let Some(coord) = free {
        assert!(matches!(
            board.place(coord),
            Err(HexError::InvalidMove { .. })
        ));
    }
    let mut mover = RandomMover::with_seed(0);
    assert_eq!(board.suggest_move(&mut mover), Err(HexError::GameOver));
    // Reset brings the board back to life
    board.reset();
    assert!(board.is_board_empty());
    assert!(board.place(Coord::new(0, 0)).is_ok());
}

#[test]
fn snapshot_survives_a_full_game() {
    let (board, _) = play_random_game(6, 7);
    let snap = board.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let parsed: hexlink_core::Snapshot = serde_json::from_str(&json).unwrap();
    let restored = Board::from_snapshot(&parsed).unwrap();
    for player in PLAYER_IDS {
        assert_eq!(restored.has_won(player), board.has_won(player));
        assert_eq!(restored.pieces_of(player), board.pieces_of(player));
    }
}

#[test]
fn deterministic_for_equal_seeds() {
    let (_, a) = play_random_game(8, 5);
    let (_, b) = play_random_game(8, 5);
    assert_eq!(a, b);
}
