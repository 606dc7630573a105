//! Move validation: whether a piece may go from one square to another under
//! the movement rules of its kind.
//!
//! The rule set is deliberately small: there is no castling, no en passant and
//! no promotion (a pawn reaching the last rank stays a pawn). Validation does
//! not look at the safety of the mover's own king either: a move that leaves
//! the king attacked is accepted and the king may be captured on the next
//! turn.

use std::fmt;

use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Move, PieceKind, Player, Rank, Square};

/// The only way a move can fail. The reason is meant for humans and is not
/// part of the contract: callers should only care that the move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalMove {
    reason: &'static str,
}

impl IllegalMove {
    pub(crate) const fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Human-readable explanation of the first rule the move broke.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move: {}", self.reason)
    }
}

impl std::error::Error for IllegalMove {}

/// Checks whether every square strictly between `from` and `to` is empty.
///
/// The squares have to be aligned: on the same rank, the same file or the
/// same diagonal. Adjacent squares trivially have a clear path.
#[must_use]
pub fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    debug_assert!(
        file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs(),
        "{from} and {to} are not aligned"
    );
    let step = (file_delta.signum(), rank_delta.signum());
    let mut current = from;
    loop {
        current = match current.offset(step.0, step.1) {
            Some(square) if square != to => square,
            _ => return true,
        };
        if board.at(current).is_some() {
            return false;
        }
    }
}

/// Returns `true` if the player may move the piece standing on `from` to `to`.
///
/// The player does not have to be the side to move: attack detection probes
/// the opponent's pieces with this predicate.
#[must_use]
pub fn is_legal(board: &Board, player: Player, from: Square, to: Square) -> bool {
    validate(board, player, from, to).is_ok()
}

/// Same as [`is_legal`] but explains the rejection.
///
/// The checks are applied in order and the first failing one is reported:
///
/// 1. The piece has to actually move.
/// 2. There has to be a piece on `from` and it has to belong to `player`.
/// 3. The destination can't be occupied by `player`'s own piece.
/// 4. The movement has to follow the rules of the piece kind.
///
/// # Errors
///
/// Returns [`IllegalMove`] if any of the checks above fails.
pub fn validate(
    board: &Board,
    player: Player,
    from: Square,
    to: Square,
) -> Result<(), IllegalMove> {
    if from == to {
        return Err(IllegalMove::new("the piece has to leave its square"));
    }
    let Some(piece) = board.at(from) else {
        return Err(IllegalMove::new("there is no piece on the starting square"));
    };
    if piece.owner != player {
        return Err(IllegalMove::new("the piece belongs to the opponent"));
    }
    let capture = match board.at(to) {
        Some(target) if target.owner == player => {
            return Err(IllegalMove::new("can not capture own piece"));
        },
        target => target.is_some(),
    };
    let (file_delta, rank_delta) = from.delta(to);
    let follows_rules = match piece.kind {
        PieceKind::Pawn => is_pawn_move(board, player, from, to, capture),
        PieceKind::Knight => matches!((file_delta.abs(), rank_delta.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => is_diagonal(file_delta, rank_delta) && clear_path(board, from, to),
        PieceKind::Rook => is_straight(file_delta, rank_delta) && clear_path(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(file_delta, rank_delta) || is_straight(file_delta, rank_delta))
                && clear_path(board, from, to)
        },
        PieceKind::King => file_delta.abs() <= 1 && rank_delta.abs() <= 1,
    };
    if follows_rules {
        Ok(())
    } else {
        Err(IllegalMove::new(match piece.kind {
            PieceKind::Pawn => "pawns advance straight and capture diagonally",
            PieceKind::Knight => "knights jump in an L shape",
            PieceKind::Bishop => "bishops move diagonally through empty squares",
            PieceKind::Rook => "rooks move along ranks and files through empty squares",
            PieceKind::Queen => "queens move along lines through empty squares",
            PieceKind::King => "kings move one square in any direction",
        }))
    }
}

/// Lists every move [`is_legal`] accepts for the player. Moves are ordered by
/// the origin square and then by the destination square, both in board
/// storage order (a8 first).
///
/// The moves are produced lazily: the checkmate search usually stops at the
/// first escape.
pub fn legal_moves(board: &Board, player: Player) -> impl Iterator<Item = Move> + '_ {
    board.pieces(player).flat_map(move |(from, _)| {
        Square::iter()
            .filter(move |&to| is_legal(board, player, from, to))
            .map(move |to| Move::new(from, to))
    })
}

const fn is_diagonal(file_delta: i8, rank_delta: i8) -> bool {
    file_delta != 0 && file_delta.abs() == rank_delta.abs()
}

const fn is_straight(file_delta: i8, rank_delta: i8) -> bool {
    (file_delta == 0) != (rank_delta == 0)
}

fn is_pawn_move(board: &Board, player: Player, from: Square, to: Square, capture: bool) -> bool {
    let forward = player.push_direction();
    let (file_delta, rank_delta) = from.delta(to);
    match (file_delta.abs(), rank_delta) {
        // Captures are only possible diagonally.
        (1, delta) if delta == forward => capture,
        (0, delta) if delta == forward => !capture,
        // Double push from the starting rank: both squares must be empty.
        (0, delta) if delta == 2 * forward => {
            from.rank() == Rank::pawns_starting(player)
                && !capture
                && from
                    .offset(0, forward)
                    .is_some_and(|skipped| board.at(skipped).is_none())
        },
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Piece;

    fn setup(placement: &str) -> Board {
        Board::from_placement(placement).expect("valid placement: {placement}")
    }

    fn moves_from(board: &Board, player: Player, from: Square) -> Vec<String> {
        legal_moves(board, player)
            .filter(|m| m.from() == from)
            .map(|m| m.to().to_string())
            .sorted()
            .collect()
    }

    fn sorted(squares: &[&str]) -> Vec<String> {
        squares.iter().map(|s| (*s).to_string()).sorted().collect()
    }

    #[test]
    fn path() {
        let board = setup("8/8/8/3p4/8/8/8/R7");
        assert!(clear_path(&board, Square::A1, Square::A8));
        assert!(clear_path(&board, Square::A1, Square::H1));
        assert!(clear_path(&board, Square::A1, Square::D4));
        // The destination itself does not block.
        assert!(clear_path(&board, Square::A2, Square::D5));
        assert!(!clear_path(&board, Square::A2, Square::E6));
        assert!(!clear_path(&board, Square::D1, Square::D8));
        assert!(!clear_path(&board, Square::H1, Square::A8));
        // Adjacent squares.
        assert!(clear_path(&board, Square::D4, Square::D5));
        assert!(clear_path(&board, Square::C4, Square::D5));
    }

    #[test]
    fn starting_moves() {
        let board = Board::starting();
        assert_eq!(
            legal_moves(&board, Player::White)
                .map(|m| m.to_string())
                .sorted()
                .collect::<Vec<_>>(),
            sorted(&[
                "a2a3", "a2a4", "b1a3", "b1c3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4",
                "e2e3", "e2e4", "f2f3", "f2f4", "g1f3", "g1h3", "g2g3", "g2g4", "h2h3", "h2h4"
            ])
        );
        assert_eq!(legal_moves(&board, Player::Black).count(), 20);
    }

    #[test]
    fn own_pieces() {
        let board = Board::starting();
        // Wrong owner.
        assert!(!is_legal(&board, Player::White, Square::E7, Square::E5));
        assert!(!is_legal(&board, Player::Black, Square::E2, Square::E4));
        // Nothing to move.
        assert!(!is_legal(&board, Player::White, Square::E4, Square::E5));
        // Standing still.
        assert!(!is_legal(&board, Player::White, Square::E2, Square::E2));
    }

    #[test]
    fn same_color_capture() {
        // Every kind, each target reachable by the movement pattern.
        let board = setup("8/8/8/8/3P4/2P1P3/1PPPPP2/PR1QKBN1");
        for (from, to) in [
            (Square::E2, Square::E3),
            (Square::A1, Square::B2),
            (Square::G1, Square::E2),
            (Square::F1, Square::E2),
            (Square::B1, Square::A1),
            (Square::D1, Square::D2),
            (Square::D1, Square::C2),
            (Square::E1, Square::F2),
        ] {
            let piece = board.at(from).expect("{from} is occupied");
            assert!(
                !is_legal(&board, Player::White, from, to),
                "{piece} {from}{to}"
            );
            assert_eq!(
                validate(&board, Player::White, from, to).unwrap_err().reason(),
                "can not capture own piece"
            );
        }
    }

    #[test]
    fn pawns() {
        let board = Board::starting();
        assert_eq!(moves_from(&board, Player::White, Square::E2), sorted(&["e3", "e4"]));
        assert_eq!(moves_from(&board, Player::Black, Square::D7), sorted(&["d6", "d5"]));
        // Pawns can't move backwards or sideways.
        let board = setup("8/8/8/8/3P4/8/8/8");
        assert_eq!(moves_from(&board, Player::White, Square::D4), sorted(&["d5"]));
        // Double push only from the starting rank.
        let board = setup("8/8/8/8/8/3P4/8/8");
        assert!(!is_legal(&board, Player::White, Square::D3, Square::D5));
        // Blocked pushes.
        let board = setup("8/8/8/8/8/4n3/4P3/8");
        assert!(!is_legal(&board, Player::White, Square::E2, Square::E3));
        assert!(!is_legal(&board, Player::White, Square::E2, Square::E4));
        let board = setup("8/8/8/8/4n3/8/4P3/8");
        assert!(is_legal(&board, Player::White, Square::E2, Square::E3));
        assert!(!is_legal(&board, Player::White, Square::E2, Square::E4));
    }

    #[test]
    fn pawn_captures() {
        let board = setup("8/8/8/2n1N3/3P4/8/8/8");
        assert_eq!(moves_from(&board, Player::White, Square::D4), sorted(&["c5", "d5"]));
        // Diagonal moves onto empty squares are not allowed (no en passant).
        let board = setup("8/8/8/8/3P4/8/8/8");
        assert!(!is_legal(&board, Player::White, Square::D4, Square::E5));
        // Black pawns capture downwards.
        let board = setup("8/8/8/3p4/2Q1B3/8/8/8");
        assert_eq!(
            moves_from(&board, Player::Black, Square::D5),
            sorted(&["c4", "d4", "e4"])
        );
        // Capturing straight ahead is not allowed.
        let board = setup("8/8/8/3p4/3Q4/8/8/8");
        assert!(!is_legal(&board, Player::Black, Square::D5, Square::D4));
        // Capturing backwards is not allowed either.
        let board = setup("8/8/8/3P4/2p5/8/8/8");
        assert!(!is_legal(&board, Player::Black, Square::C4, Square::D5));
    }

    #[test]
    fn pawn_on_last_rank() {
        // No promotion: the pawn stays and has nowhere to go.
        let board = setup("3P4/8/8/8/8/8/8/8");
        assert!(moves_from(&board, Player::White, Square::D8).is_empty());
        assert_eq!(
            board.at(Square::D8),
            Some(Piece::new(Player::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn knights() {
        let expected = sorted(&["c6", "e6", "f5", "f3", "e2", "c2", "b3", "b5"]);
        let board = setup("8/8/8/8/3N4/8/8/8");
        assert_eq!(moves_from(&board, Player::White, Square::D4), expected);
        // Surrounded knight still jumps.
        let board = setup("8/8/8/2PPP3/2PNP3/2PPP3/8/8");
        assert_eq!(moves_from(&board, Player::White, Square::D4), expected);
        // Corners.
        let board = setup("8/8/8/8/8/8/8/N7");
        assert_eq!(moves_from(&board, Player::White, Square::A1), sorted(&["b3", "c2"]));
    }

    #[test]
    fn knight_offsets_symmetry() {
        for file_delta in -2i8..=2 {
            for rank_delta in -2i8..=2 {
                let board = setup("8/8/8/8/3n4/8/8/8");
                let to = Square::D4.offset(file_delta, rank_delta).unwrap();
                assert_eq!(
                    is_legal(&board, Player::Black, Square::D4, to),
                    file_delta.abs() * rank_delta.abs() == 2,
                    "{to}"
                );
            }
        }
    }

    #[test]
    fn bishops() {
        let board = setup("8/8/5p2/8/3B4/8/1P6/8");
        assert_eq!(
            moves_from(&board, Player::White, Square::D4),
            sorted(&["c3", "c5", "b6", "a7", "e3", "f2", "g1", "e5", "f6"])
        );
    }

    #[test]
    fn rooks() {
        let board = setup("8/8/8/1n1R1P2/8/8/8/8");
        assert_eq!(
            moves_from(&board, Player::White, Square::D5),
            sorted(&["b5", "c5", "e5", "d6", "d7", "d8", "d4", "d3", "d2", "d1"])
        );
        assert!(!is_legal(&board, Player::White, Square::D5, Square::E6));
    }

    #[test]
    fn queens() {
        let board = setup("8/8/8/8/8/2p5/1P6/Q7");
        assert_eq!(
            moves_from(&board, Player::White, Square::A1),
            sorted(&[
                "a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1", "c1", "d1", "e1", "f1", "g1", "h1"
            ])
        );
        let board = setup("8/8/8/8/8/2p5/8/Q7");
        assert!(is_legal(&board, Player::White, Square::A1, Square::B2));
        assert!(is_legal(&board, Player::White, Square::A1, Square::C3));
        assert!(!is_legal(&board, Player::White, Square::A1, Square::D4));
        // Not a line at all.
        assert!(!is_legal(&board, Player::White, Square::A1, Square::B3));
    }

    #[test]
    fn sliding_blockers() {
        // A single blocker anywhere on the path is enough.
        for blocker in [Square::B2, Square::C3, Square::D4, Square::E5, Square::F6, Square::G7] {
            let mut board = setup("8/8/8/8/8/8/8/B7");
            board.set(blocker, Some(Piece::new(Player::Black, PieceKind::Knight)));
            assert!(!is_legal(&board, Player::White, Square::A1, Square::H8), "{blocker}");
            assert!(is_legal(&board, Player::White, Square::A1, blocker));
        }
    }

    #[test]
    fn kings() {
        let board = setup("8/8/8/8/8/8/8/4K3");
        assert_eq!(
            moves_from(&board, Player::White, Square::E1),
            sorted(&["d1", "d2", "e2", "f2", "f1"])
        );
        // No castling.
        let board = setup("8/8/8/8/8/8/8/4K2R");
        assert!(!is_legal(&board, Player::White, Square::E1, Square::G1));
        // Moving into an attacked square is not prevented here.
        let board = setup("3r4/8/8/8/8/8/8/4K3");
        assert!(is_legal(&board, Player::White, Square::E1, Square::D1));
    }
}
