use crate::chess::core::{Move, Square};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Move(Move),
    Board,
    NewGame,
    Quit,
    Unknown(String),
}

/// Accepts both `e2 e4` and the UCI-style `e2e4`.
fn parse_move(parts: &[&str]) -> Option<Move> {
    match parts {
        [uci] => Move::from_uci(uci).ok(),
        [from, to] => Some(Move::new(
            Square::try_from(*from).ok()?,
            Square::try_from(*to).ok()?,
        )),
        _ => None,
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["board" | "d"] => Self::Board,
            ["new"] => Self::NewGame,
            ["quit"] => Self::Quit,
            _ => match parse_move(&parts) {
                Some(next_move) => Self::Move(next_move),
                None => Self::Unknown(input.to_string()),
            },
        }
    }
}
