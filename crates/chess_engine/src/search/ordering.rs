//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying
//! captures (most valuable victim, least valuable attacker) and promotions
//! first. The sort is stable, so moves with equal ordering scores keep
//! their generation order.

use crate::board::Board;
use crate::constants::piece_value;
use crate::types::*;

/// Ordering score of a single move; higher is searched first.
pub(crate) fn order_score(board: &Board, mv: &Move) -> i32 {
    let mut score = 0;

    // MVV-LVA: Most Valuable Victim - Least Valuable Attacker
    if let (Some(victim), Some(attacker)) = (board.piece_at(mv.to), board.piece_at(mv.from)) {
        score += piece_value(victim.kind) * 10 - piece_value(attacker.kind);
    }

    if let Some(kind) = mv.promotion {
        score += piece_value(kind) * 10;
    }

    score
}

/// Order moves for better alpha-beta pruning
pub(crate) fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| std::cmp::Reverse(order_score(board, mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_gen::legal_moves;

    #[test]
    fn test_order_moves_prioritizes_captures() {
        // White rook can take the black queen on a3
        let board = Board::from_text("k3/4/q3/4/R2K w").unwrap();
        let mut moves = legal_moves(&board);
        order_moves(&board, &mut moves);

        assert_eq!(moves[0], Move::new(Square::new(4, 0), Square::new(2, 0)));
    }

    #[test]
    fn test_quiet_moves_keep_generation_order() {
        let board = Board::standard();
        let generated = legal_moves(&board);
        let mut ordered = generated.clone();
        order_moves(&board, &mut ordered);
        assert_eq!(ordered, generated);
    }

    #[test]
    fn test_queen_promotion_first() {
        let board = Board::from_text("3k/P3/4/4/K3 w").unwrap();
        let mut moves = legal_moves(&board);
        order_moves(&board, &mut moves);
        assert_eq!(moves[0].promotion, Some(PieceKind::Queen));
    }
}
