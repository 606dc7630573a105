//! Square-centric ("mailbox") [board representation]: each of the 64 squares
//! stores the piece standing on it, if any.
//!
//! The board is a dumb container: it does not know whose turn it is and does
//! not validate anything written into it. Rules live in
//! [`crate::chess::moves`].
//!
//! [board representation]: https://www.chessprogramming.org/Mailbox

use std::fmt::{self, Write};

use anyhow::bail;
use strum::IntoEnumIterator;

use crate::chess::core::{
    File,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Piece kinds on the backrank, from [`File::A`] to [`File::H`].
const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8×8 grid of optional pieces, indexed by [`Square`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use rookie::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.set(
                    Square::new(file, Rank::backrank(player)),
                    Some(Piece::new(player, kind)),
                );
                board.set(
                    Square::new(file, Rank::pawns_starting(player)),
                    Some(Piece::new(player, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Parses the piece placement part of [Forsyth-Edwards Notation] (FEN),
    /// e.g. `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`. Ranks are listed
    /// from 8 to 1, files from a to h, digits stand for runs of empty squares.
    ///
    /// Any arrangement of pieces is accepted, including boards without kings.
    ///
    /// # Errors
    ///
    /// Returns an error if there are not exactly 8 ranks, a rank does not
    /// describe exactly 8 squares or an unknown symbol is encountered.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut ranks = Rank::iter().rev();
        for rank_placement in placement.split('/') {
            let Some(rank) = ranks.next() else {
                bail!("pieces placement should have 8 ranks, got {placement}");
            };
            let mut file: u8 = 0;
            for symbol in rank_placement.chars() {
                if file >= BOARD_WIDTH {
                    bail!("rank {rank_placement} describes more than {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' | '9' => bail!("empty squares run should be within 1..=8, got {symbol}"),
                    '1'..='8' => file += symbol as u8 - b'0',
                    _ => {
                        let piece = Piece::try_from(symbol)?;
                        result.set(Square::new(File::try_from(file)?, rank), Some(piece));
                        file += 1;
                    },
                }
            }
            if file != BOARD_WIDTH {
                bail!(
                    "rank size should be exactly {BOARD_WIDTH}, got {rank_placement} of length {file}"
                );
            }
        }
        if ranks.next().is_some() {
            bail!("pieces placement should have 8 ranks, got {placement}");
        }
        Ok(result)
    }

    /// Returns the piece standing on the square.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Puts the piece on the square (or clears it with `None`), replacing
    /// whatever was there.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square as usize] = piece;
    }

    /// Moves whatever stands on `from` to `to` and returns the piece that was
    /// standing on `to` before. No rules are checked.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.squares[from as usize].take();
        std::mem::replace(&mut self.squares[to as usize], moving)
    }

    /// Iterates over occupied squares row by row from the top-left corner
    /// (a8, b8, ..., h1).
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Iterates over the squares occupied by the player's pieces, in the same
    /// order as [`Board::occupied`].
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.owner == player)
    }

    /// Locates the player's king. If there are several kings, the first one
    /// in [`Board::occupied`] order is returned.
    #[must_use]
    pub fn king(&self, player: Player) -> Option<Square> {
        let king = Piece::new(player, PieceKind::King);
        self.occupied()
            .find_map(|(square, piece)| (piece == king).then_some(square))
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn has_king(&self, player: Player) -> bool {
        self.king(player).is_some()
    }

    /// Draws the board for humans: files are labeled a-h, ranks go from 8 at
    /// the top to 1 at the bottom.
    ///
    /// ```
    /// use rookie::chess::board::Board;
    ///
    /// let board = Board::starting().render();
    /// assert!(board.starts_with("   a b c d e f g h\n +----------------\n8| r n b q k b n r"));
    /// assert!(board.ends_with("1| R N B Q K B N R\n"));
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut result = String::from(FILE_LABELS);
        result.push_str(FRAME);
        for rank in Rank::iter().rev() {
            result.push_str(&format!("{rank}|"));
            for file in File::iter() {
                result.push(' ');
                match self.at(Square::new(file, rank)) {
                    Some(piece) => result.push_str(&piece.to_string()),
                    None => result.push(EMPTY_SQUARE),
                }
            }
            result.push('\n');
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    /// Prints pieces placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                if let Some(piece) = self.at(Square::new(file, rank)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char(EMPTY_SQUARE),
                }?;
                if file != File::H {
                    f.write_char(' ')?;
                }
            }
            if rank != Rank::One {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

const FILE_LABELS: &str = "   a b c d e f g h\n";
const FRAME: &str = " +----------------\n";
const EMPTY_SQUARE: char = '.';
