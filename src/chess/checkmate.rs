//! Game termination: detecting [checkmate].
//!
//! [checkmate]: https://en.wikipedia.org/wiki/Checkmate

use tracing::trace;

use crate::chess::attacks::{attackers, in_check};
use crate::chess::board::Board;
use crate::chess::core::{Move, Player};
use crate::chess::moves::legal_moves;

/// True if the player is in check and none of their moves gets the king out
/// of it.
///
/// Every move accepted by [`crate::chess::moves::is_legal`] is tried on a copy
/// of the board: moving the king away, capturing the checking piece with any
/// piece, blocking the line of a sliding attacker and capturing the opponent's
/// king all count as escapes.
///
/// A player without a king is not checkmated: losing the king ends the game
/// separately.
#[must_use]
pub fn is_checkmate(board: &Board, player: Player) -> bool {
    let checkers = attackers(board, player);
    if checkers.is_empty() {
        return false;
    }
    match escape(board, player) {
        Some(escape) => {
            trace!(%player, %escape, ?checkers, "check can be escaped");
            false
        },
        None => {
            trace!(%player, ?checkers, "no escape from check");
            true
        },
    }
}

/// Finds the first move (in [`legal_moves`] order) after which the player's
/// king is not attacked or the opponent's king is gone.
#[must_use]
pub fn escape(board: &Board, player: Player) -> Option<Move> {
    legal_moves(board, player).find(|candidate| {
        let mut after = *board;
        let _captured = after.relocate(candidate.from(), candidate.to());
        !after.has_king(!player) || !in_check(&after, player)
    })
}
