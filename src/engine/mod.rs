//! The engine is a text front-end for [`Game`]: it reads one command per line,
//! applies moves and reports check and checkmate back to the players.
//!
//! [`Engine::play_loop`] is the "main loop" of the engine which communicates
//! with the players and executes commands from the input stream until the game
//! is over.
//!
//! Supported commands:
//!
//! - `e2 e4` or `e2e4`: move the piece of the side to move.
//! - `board` (or `d`): print the board.
//! - `new`: start a new game from the starting position.
//! - `quit`: stop the engine.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::chess::core::Move;
use crate::chess::game::{Game, Outcome};
use crate::engine::command::Command;

mod command;

/// Frames check and checkmate announcements.
const SEPARATOR: &str = "-----------------------------------------";

/// The Engine owns the game and handles the commands sent by the players,
/// including I/O.
#[derive(Debug, Default)]
pub struct Engine {
    game: Game,
    quiet: bool,
}

impl Engine {
    /// Creates a new instance of the engine with the starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that continues an existing game.
    #[must_use]
    pub const fn with_game(game: Game) -> Self {
        Self { game, quiet: false }
    }

    /// Stops printing the board before each prompt.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The game being played.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously prompts the side to move, reads the input stream and
    /// executes the commands until the game is over, "quit" is sent or the
    /// input ends.
    ///
    /// Malformed and illegal moves are reported to the output and the same
    /// player is asked again.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn play_loop(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        while !self.game.is_over() {
            if !self.quiet {
                write!(output, "{}", self.game.render())?;
            }
            writeln!(
                output,
                "Player {}, enter your move (e.g., 'e2 e4'):",
                self.game.side_to_move().to_string().to_lowercase()
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("input closed");
                break;
            }
            match Command::parse(&line) {
                Command::Move(next_move) => self.handle_move(next_move, output)?,
                Command::Board => write!(output, "{}", self.game.render())?,
                Command::NewGame => {
                    debug!("new game");
                    self.game = Game::new();
                },
                Command::Quit => break,
                Command::Unknown(command) if command.is_empty() => {},
                Command::Unknown(command) => {
                    debug!(%command, "unsupported command");
                    writeln!(output, "Unknown command: {command}")?;
                },
            }
        }
        Ok(())
    }

    /// Applies the move and announces check or the end of the game.
    fn handle_move(&mut self, next_move: Move, output: &mut impl Write) -> anyhow::Result<()> {
        match self.game.play(next_move) {
            Ok(Outcome::Continued) => {},
            Ok(Outcome::Check(player)) => {
                writeln!(output, "{SEPARATOR}\nCheck! {player} is in check.\n{SEPARATOR}")?;
            },
            Ok(Outcome::Checkmate(winner)) => {
                if !self.quiet {
                    write!(output, "{}", self.game.render())?;
                }
                writeln!(output, "{SEPARATOR}\nCheckmate! {winner} wins!\n{SEPARATOR}")?;
            },
            Err(e) => writeln!(output, "Invalid move: {}. Please try again.", e.reason())?,
        }
        Ok(())
    }
}
