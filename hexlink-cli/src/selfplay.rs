//! Selfplay command - random vs random games
//!
//! Plays a batch of games between two seeded random movers and reports
//! per-game records plus aggregate counts, plain or as JSON.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use hexlink_core::{Board, Coord, PlayerId, RandomMover};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board edge length (4-11)
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Base seed; game n uses seed + n
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    size: usize,
    winner: Option<PlayerId>,
    moves: Vec<Coord>,
}

/// Aggregated results
#[derive(Clone, Debug, Serialize)]
struct SelfplayResults {
    white_wins: usize,
    black_wins: usize,
    avg_moves: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run selfplay command
pub fn run(args: SelfplayArgs) -> Result<()> {
    let results = play_games(&args)?;
    report_results(&results, args.json)
}

fn play_games(args: &SelfplayArgs) -> Result<SelfplayResults> {
    let mut games = Vec::with_capacity(args.games);
    for n in 0..args.games {
        let record = play_single_game(n, args.size, args.seed + n as u64)?;
        info!(
            game = n,
            moves = record.moves.len(),
            winner = ?record.winner,
            "game finished"
        );
        games.push(record);
    }

    let white_wins = games
        .iter()
        .filter(|g| g.winner == Some(PlayerId::White))
        .count();
    let black_wins = games
        .iter()
        .filter(|g| g.winner == Some(PlayerId::Black))
        .count();
    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    Ok(SelfplayResults {
        white_wins,
        black_wins,
        avg_moves,
        games,
    })
}

fn play_single_game(number: usize, size: usize, seed: u64) -> Result<GameRecord> {
    let mut board = Board::new(size)?;
    let mut white = RandomMover::with_seed(seed);
    let mut black = RandomMover::with_seed(seed.wrapping_add(0x9e37_79b9));
    let mut moves = Vec::new();

    while !board.is_game_over() {
        let mover = match board.current_player() {
            PlayerId::White => &mut white,
            PlayerId::Black => &mut black,
        };
        let Some(coord) = board.suggest_move(mover)? else {
            break;
        };
        board.place(coord)?;
        moves.push(coord);
    }

    let winner = [PlayerId::White, PlayerId::Black]
        .into_iter()
        .find(|&p| board.has_won(p));
    Ok(GameRecord {
        game_number: number,
        size,
        winner,
        moves,
    })
}

// ============================================================================
// REPORTING
// ============================================================================

fn report_results(results: &SelfplayResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }
    for game in &results.games {
        let winner = match game.winner {
            Some(p) => p.default_name(),
            None => "nobody",
        };
        println!(
            "game {:>3}: {} wins after {} moves",
            game.game_number,
            winner,
            game.moves.len()
        );
    }
    println!(
        "white {} - black {} (avg {:.1} moves on {}x{})",
        results.white_wins,
        results.black_wins,
        results.avg_moves,
        results.games.first().map_or(0, |g| g.size),
        results.games.first().map_or(0, |g| g.size),
    );
    Ok(())
}
