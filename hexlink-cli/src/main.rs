//! Hexlink CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game on the terminal
//! - selfplay: Random self-play games with aggregate results

use clap::{Parser, Subcommand};

mod play;
mod render;
mod selfplay;

#[derive(Parser)]
#[command(name = "hexlink")]
#[command(about = "Hex connection game on a rhombic grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(play::PlayArgs),
    /// Run random self-play games
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}
