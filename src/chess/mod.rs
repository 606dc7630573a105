//! Implementation of the chess rules: board representation, move validation,
//! check and checkmate detection and the game controller that puts them
//! together.

pub mod attacks;
pub mod board;
pub mod checkmate;
pub mod core;
pub mod game;
pub mod moves;
