//! Material evaluation
//!
//! Counts material in whole pawns. Kings are excluded.

use crate::board::Board;
use crate::constants::piece_value;
use crate::types::Color;

/// Total material of `color`, in pawns.
pub fn material_of(board: &Board, color: Color) -> i32 {
    board
        .pieces_of(color)
        .map(|(_, piece)| piece_value(piece.kind))
        .sum()
}

/// Material of `color` minus the opponent's, in pawns.
pub fn material_balance(board: &Board, color: Color) -> i32 {
    material_of(board, color) - material_of(board, color.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_balance_at_start() {
        let board = Board::standard();
        // Four pawns, knight, queen, bishop
        assert_eq!(material_of(&board, Color::White), 19);
        assert_eq!(material_balance(&board, Color::White), 0);
    }

    #[test]
    fn test_material_balance_after_loss() {
        let board = Board::from_text("k3/4/4/4/QR1K w").unwrap();
        assert_eq!(material_balance(&board, Color::White), 14);
        assert_eq!(material_balance(&board, Color::Black), -14);
    }
}
