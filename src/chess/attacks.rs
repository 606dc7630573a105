//! Attack detection: which opposing pieces could capture the king right now.
//!
//! Attacks are found by probing [`crate::chess::moves::is_legal`] for every
//! opposing piece with the king's square as the destination, as if it was the
//! opponent's turn. Any piece kind can give check.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Player, Square, BOARD_SIZE};
use crate::chess::moves::is_legal;

/// Squares of the pieces attacking a king. There can't be more attackers
/// than squares on the board.
pub type Attackers = ArrayVec<Square, { BOARD_SIZE as usize }>;

/// Lists the squares of the opponent's pieces that attack the player's king,
/// in board storage order. A player without a king is never attacked.
#[must_use]
pub fn attackers(board: &Board, player: Player) -> Attackers {
    let Some(king) = board.king(player) else {
        return Attackers::new();
    };
    let opponent = !player;
    board
        .pieces(opponent)
        .filter(|&(square, _)| is_legal(board, opponent, square, king))
        .map(|(square, _)| square)
        .collect()
}

/// Returns `true` if the player's king is attacked by at least one opposing
/// piece. A board without the player's king is not a check.
#[must_use]
pub fn in_check(board: &Board, player: Player) -> bool {
    let Some(king) = board.king(player) else {
        return false;
    };
    let opponent = !player;
    board
        .pieces(opponent)
        .any(|(square, _)| is_legal(board, opponent, square, king))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(placement: &str) -> Board {
        Board::from_placement(placement).expect("valid placement: {placement}")
    }

    #[test]
    fn starting_position() {
        let board = Board::starting();
        assert!(!in_check(&board, Player::White));
        assert!(!in_check(&board, Player::Black));
        assert!(attackers(&board, Player::White).is_empty());
    }

    #[test]
    fn every_kind_checks() {
        for (placement, attacker) in [
            ("4k3/8/8/8/8/8/3p4/4K3", Square::D2),
            ("4k3/8/8/8/8/5n2/8/4K3", Square::F3),
            ("4k3/8/8/b7/8/8/8/4K3", Square::A5),
            ("4r2k/8/8/8/8/8/8/4K3", Square::E8),
            ("7k/8/8/8/8/8/8/q3K3", Square::A1),
            ("8/8/8/8/8/8/3k4/4K3", Square::D2),
        ] {
            let board = setup(placement);
            assert!(in_check(&board, Player::White), "{placement}");
            assert_eq!(attackers(&board, Player::White).as_slice(), &[attacker]);
        }
    }

    #[test]
    fn pawns_only_attack_diagonally_forward() {
        // Black pawn in front of the white king does not attack it.
        assert!(!in_check(&setup("4k3/8/8/8/8/8/4p3/4K3"), Player::White));
        // Black pawn behind the white king does not attack it either.
        assert!(!in_check(&setup("4k3/8/8/8/8/8/4K3/3p4"), Player::White));
        // White pawn attacks upwards.
        assert!(in_check(&setup("8/8/8/3k4/2P5/8/8/4K3"), Player::Black));
        assert!(!in_check(&setup("8/8/8/3k4/8/2P5/8/4K3"), Player::Black));
    }

    #[test]
    fn blocked_attacks() {
        assert!(!in_check(&setup("4r2k/8/8/8/8/8/4P3/4K3"), Player::White));
        // Own piece blocks the diagonal.
        assert!(!in_check(&setup("7k/8/8/b7/8/2N5/8/4K3"), Player::White));
        // Knights ignore blockers.
        assert!(in_check(&setup("7k/8/8/8/8/5n2/3PPP2/3PKP2"), Player::White));
    }

    #[test]
    fn double_check() {
        let board = setup("4k3/8/8/8/1b6/8/8/r3K3");
        assert!(in_check(&board, Player::White));
        assert_eq!(
            attackers(&board, Player::White).as_slice(),
            &[Square::B4, Square::A1]
        );
    }

    #[test]
    fn missing_king() {
        let board = setup("4r3/8/8/8/8/8/8/8");
        assert!(!in_check(&board, Player::White));
        assert!(attackers(&board, Player::White).is_empty());
    }
}
