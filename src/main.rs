use std::io;

use anyhow::Context;
use clap::Parser;
use rookie::chess::board::Board;
use rookie::chess::core::Player;
use rookie::chess::game::Game;
use rookie::Engine;
use tracing_subscriber::EnvFilter;

/// Two-player chess on the terminal: type moves like `e2 e4`, `board` to see
/// the position, `new` to start over and `quit` to exit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Config {
    /// Start from the given piece placement (first field of FEN) instead of
    /// the standard starting position.
    #[arg(long, value_name = "PLACEMENT")]
    position: Option<String>,
    /// Black moves first.
    #[arg(long)]
    black: bool,
    /// Do not print the board before each move.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    rookie::print_engine_info();

    let board = match &config.position {
        Some(placement) => Board::from_placement(placement)
            .with_context(|| format!("invalid --position \"{placement}\""))?,
        None => Board::starting(),
    };
    let side_to_move = if config.black {
        Player::Black
    } else {
        Player::White
    };
    tracing::debug!(?config, "starting the game");

    let mut engine = Engine::with_game(Game::from_board(board, side_to_move)).quiet(config.quiet);
    engine.play_loop(&mut io::stdin().lock(), &mut io::stdout().lock())
}
