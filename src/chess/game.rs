//! The game controller: owns the board, keeps track of whose turn it is and
//! decides when the game is over.

use tracing::{debug, info};

use crate::chess::attacks::in_check;
use crate::chess::board::Board;
use crate::chess::checkmate::is_checkmate;
use crate::chess::core::{Move, Player, Square};
use crate::chess::moves::{validate, IllegalMove};

/// What happened after an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing special: the other player moves next.
    Continued,
    /// The given player's king is attacked, but the game goes on.
    Check(Player),
    /// The game is over and the given player won, either by checkmate or by
    /// capturing the opponent's king.
    Checkmate(Player),
}

/// State of a single game: the board, the side to move and the winner once
/// the game is over.
///
/// ```
/// use rookie::chess::core::{Player, Square};
/// use rookie::chess::game::{Game, Outcome};
///
/// let mut game = Game::new();
/// assert_eq!(game.apply_move(Square::E2, Square::E4), Ok(Outcome::Continued));
/// assert_eq!(game.side_to_move(), Player::Black);
/// // Not Black's piece.
/// assert!(game.apply_move(Square::D2, Square::D4).is_err());
/// assert_eq!(game.side_to_move(), Player::Black);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    winner: Option<Player>,
}

impl Game {
    /// Starts a new game from the standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::starting(), Player::White)
    }

    /// Starts a game from an arbitrary position.
    ///
    /// The position is not checked for sanity: it may contain any number of
    /// kings (or none) and the side to move may already be checkmated. A
    /// game starting without one of the kings is immediately over.
    #[must_use]
    pub fn from_board(board: Board, side_to_move: Player) -> Self {
        let winner = match (board.has_king(Player::White), board.has_king(Player::Black)) {
            (true, false) => Some(Player::White),
            (false, true) => Some(Player::Black),
            _ => None,
        };
        Self {
            board,
            side_to_move,
            winner,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The player who won, if the game is over.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Moves the piece of the side to move from one square to another.
    ///
    /// On success the board is updated, the opponent's king is inspected and
    /// the turn passes to the opponent. The game ends when the opponent is
    /// checkmated or no longer has a king.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if the game is already over or the move breaks
    /// the rules. In that case nothing changes: the board stays the same and
    /// it is still the same player's turn.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Outcome, IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::new("the game is over"));
        }
        let player = self.side_to_move;
        validate(&self.board, player, from, to)?;
        let captured = self.board.relocate(from, to);
        debug!(%player, played = %Move::new(from, to), ?captured, "move accepted");
        let opponent = !player;
        self.side_to_move = opponent;

        if !self.board.has_king(opponent) {
            info!(winner = %player, "king captured");
            self.winner = Some(player);
            return Ok(Outcome::Checkmate(player));
        }
        if is_checkmate(&self.board, opponent) {
            info!(winner = %player, "checkmate");
            self.winner = Some(player);
            return Ok(Outcome::Checkmate(player));
        }
        if in_check(&self.board, opponent) {
            info!(%opponent, "check");
            return Ok(Outcome::Check(opponent));
        }
        Ok(Outcome::Continued)
    }

    /// Same as [`Game::apply_move`] for an already constructed [`Move`].
    ///
    /// # Errors
    ///
    /// See [`Game::apply_move`].
    pub fn play(&mut self, next_move: Move) -> Result<Outcome, IllegalMove> {
        self.apply_move(next_move.from(), next_move.to())
    }

    /// Draws the board for humans, see [`Board::render`].
    #[must_use]
    pub fn render(&self) -> String {
        self.board.render()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
