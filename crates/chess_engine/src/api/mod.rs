//! Public API for the chess engine
//!
//! High-level entry points used by the session layer: starting positions,
//! checked move execution, and game-state queries.
//!
//! ## Module Organization
//!
//! - `game` - Starting positions (new_game, game_from_layout)
//! - `moves` - Validated move execution (do_move)
//! - `state` - Game state queries (game_status)

mod game;
mod moves;
mod state;

pub use game::{game_from_layout, new_game};
pub use moves::do_move;
pub use state::{game_status, GameStatus};
