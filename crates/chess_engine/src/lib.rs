//! Minichess engine
//!
//! Rules, evaluation and search for chess on small rectangular boards
//! (5×4 by default, anything up to 16×16 through custom layouts).
//!
//! ## Overview
//!
//! - [`board`] - Board state: placement, side to move, lost pieces, text form
//! - [`validate`] - The single legality gate for moves
//! - [`move_gen`] - Legal move enumeration and attack queries
//! - [`evaluation`] - Position scoring for one side
//! - [`search`] - Alpha-beta search under a difficulty and a deadline
//! - [`api`] - Convenience entry points for game drivers
//!
//! ```
//! use minichess_engine::{do_move, evaluate, game_status, new_game, Color, GameStatus, Move, Square};
//!
//! let mut board = new_game();
//! do_move(&mut board, &Move::new(Square::new(3, 0), Square::new(2, 0))).unwrap();
//! assert_eq!(board.side_to_move(), Color::Black);
//! assert_eq!(game_status(&board), GameStatus::Ongoing);
//! let _ = evaluate(&board, Color::Black);
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod move_gen;
pub mod search;
pub mod types;
pub mod validate;

pub use api::{do_move, game_from_layout, game_status, new_game, GameStatus};
pub use board::{AppliedMove, Board};
pub use error::{IllegalMove, LayoutError, LayoutResult};
pub use evaluation::{evaluate, EvaluationResult, KingSafety};
pub use move_gen::{has_legal_move, is_in_check, legal_moves};
pub use search::{best_move, find_best_move, Difficulty, SearchParams, SearchReport};
pub use types::{Color, Move, Piece, PieceKind, Square};
pub use validate::{is_legal, validate};
