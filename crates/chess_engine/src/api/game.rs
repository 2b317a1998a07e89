//! Game lifecycle management
//!
//! Functions for creating boards to start a game from.

use crate::board::Board;
use crate::error::LayoutResult;

/// Create a new game with the standard opening position
pub fn new_game() -> Board {
    Board::standard()
}

/// Create a game from a custom text layout.
///
/// The layout must parse and be playable (one king per side, no pawn on its
/// last rank, no king left capturable). Nothing is created on error.
pub fn game_from_layout(text: &str) -> LayoutResult<Board> {
    let board = Board::from_text(text)?;
    board.check_playable()?;
    Ok(board)
}
