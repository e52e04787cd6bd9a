//! Play command - interactive game on the terminal
//!
//! Moves are typed in the board's textual form (`B,3` or `b3`). The
//! screen redraw is driven by the board's change notification: a
//! subscribed callback flips a dirty flag and the loop re-renders when it
//! is set.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use hexlink_core::{Board, Coord, RandomMover};

use crate::render;

#[derive(Args)]
pub struct PlayArgs {
    /// Board edge length (4-11)
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Let a random bot play Black
    #[arg(long)]
    pub bot: bool,

    /// Seed for the bot
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mut board = Board::new(args.size)?;

    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    board.subscribe(move || flag.set(true));

    let mut bot = args.bot.then(|| RandomMover::with_seed(args.seed));

    println!("Type a coordinate like B,3 to move; 'reset' or 'quit' also work.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if dirty.replace(false) {
            println!("{}", render::board_to_string(&board));
            println!("{}", render::status_line(&board));
        }
        if board.is_game_over() {
            break;
        }

        print!("{}> ", board.current_player().default_name());
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "q" => break,
            "reset" => {
                board.reset();
                continue;
            }
            _ => {}
        }

        let coord: Coord = match input.parse() {
            Ok(c) => c,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        if let Err(e) = board.place(coord) {
            println!("{e}");
            continue;
        }
        debug!(%coord, "human move");

        if let Some(bot) = bot.as_mut() {
            if !board.is_game_over() {
                if let Some(reply) = board.suggest_move(bot)? {
                    board.place(reply)?;
                    println!("Black plays {reply}");
                    debug!(%reply, "bot move");
                }
            }
        }
    }
    Ok(())
}
