//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all pieces of the
//! attacking colour and ask whether each one's shape-legal reach covers the
//! target. Pawns are the one special case: they attack diagonally forward
//! whether or not anything stands there, and never attack straight ahead.

use super::shape::check_shape;
use crate::board::Board;
use crate::types::*;

/// Does `piece` standing on `from` attack `target`?
pub fn attacks(board: &Board, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => {
            let dr = target.row as i16 - from.row as i16;
            let dc = target.col as i16 - from.col as i16;
            dr == piece.color.forward() && dc.abs() == 1
        }
        _ => check_shape(board, piece, from, target).is_ok(),
    }
}

/// Check if a square is under attack by pieces of the specified color
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| attacks(board, piece, from, square))
}

/// Number of `by_color` pieces attacking `square`.
pub fn count_attackers(board: &Board, square: Square, by_color: Color) -> usize {
    board
        .pieces_of(by_color)
        .filter(|(from, piece)| attacks(board, *piece, *from, square))
        .count()
}

/// Check if the king of a color is in check. A side without a king is never
/// in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}
