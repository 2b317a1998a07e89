//! Move execution
//!
//! Functions for executing moves after checking their legality.

use crate::board::{AppliedMove, Board};
use crate::error::IllegalMove;
use crate::types::Move;
use crate::validate::validate;

/// Validate `mv` and, if legal, apply it to `board`.
///
/// The board is left untouched when the move is rejected.
///
/// # Examples
///
/// ```
/// use minichess_engine::{do_move, new_game, Move, Square};
///
/// let mut board = new_game();
/// let applied = do_move(&mut board, &Move::new(Square::new(3, 0), Square::new(2, 0)));
/// assert!(applied.is_ok());
/// ```
pub fn do_move(board: &mut Board, mv: &Move) -> Result<AppliedMove, IllegalMove> {
    validate(board, mv)?;
    board.apply_move(mv).ok_or(IllegalMove::NoPieceAtSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    #[test]
    fn test_do_move_rejects_without_mutation() {
        let mut board = Board::standard();
        let before = board.clone();
        let result = do_move(&mut board, &Move::new(Square::new(3, 0), Square::new(1, 0)));
        assert_eq!(result, Err(IllegalMove::IllegalShapeForPiece));
        assert_eq!(board, before);
    }

    #[test]
    fn test_do_move_applies_legal_move() {
        let mut board = Board::standard();
        let applied = do_move(&mut board, &Move::new(Square::new(3, 1), Square::new(2, 1))).unwrap();
        assert_eq!(applied.captured, None);
        assert_eq!(board.to_text(), "nqkb/pppp/1P2/P1PP/NQKB b - -");
    }
}
