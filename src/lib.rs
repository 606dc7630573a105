//! Two-player chess rules engine: keeps track of the board, validates moves
//! according to the movement rules of each piece and detects check and
//! checkmate. For more information, see `README.md`.
//!
//! The rules live in [`chess`]: [`chess::game::Game`] is the entry point that
//! applies moves and reports their [`chess::game::Outcome`]. [`Engine`] is a
//! small text front-end on top of it that the `rookie` binary runs on the
//! standard input and output.
//!
//! ```
//! use rookie::chess::core::{Player, Square};
//! use rookie::chess::game::{Game, Outcome};
//!
//! let mut game = Game::new();
//! for (from, to) in [
//!     (Square::F2, Square::F3),
//!     (Square::E7, Square::E5),
//!     (Square::G2, Square::G4),
//! ] {
//!     assert_eq!(game.apply_move(from, to), Ok(Outcome::Continued));
//! }
//! assert_eq!(
//!     game.apply_move(Square::D8, Square::H4),
//!     Ok(Outcome::Checkmate(Player::Black))
//! );
//! assert!(game.is_over());
//! ```

pub mod chess;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the engine version and whether the build is clean on startup.
pub fn print_engine_info() {
    println!("Rookie chess rules engine {}", engine_version());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
