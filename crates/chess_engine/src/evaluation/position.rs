//! Full position evaluation
//!
//! Combines material, activity, king safety and center control into a
//! single score:
//!
//! ```text
//! score = MATERIAL_WEIGHT * material
//!       + MOBILITY_WEIGHT * (own mobility - opponent mobility)
//!       + CENTER_WEIGHT   * (own center  - opponent center)
//!       - own king penalty + opponent king penalty
//! ```

use super::king_safety::{king_safety, KingSafety};
use super::material::material_balance;
use crate::board::Board;
use crate::constants::*;
use crate::move_gen::attack::attacks;
use crate::move_gen::pseudo_legal_count;
use crate::types::*;
use serde::Serialize;

/// Breakdown of an evaluation from one side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub perspective: Color,
    /// Own material minus the opponent's, in pawns
    pub material: i32,
    pub mobility: i32,
    pub opponent_mobility: i32,
    pub king_safety: KingSafety,
    pub opponent_king_safety: KingSafety,
    pub center_control: i32,
    pub opponent_center_control: i32,
    /// Combined score in centipawns, positive when `perspective` is better
    pub score: i32,
}

/// The central squares of the grid: the middle row(s) crossed with the
/// middle column(s).
pub fn center_squares(board: &Board) -> Vec<Square> {
    let (rows, cols) = (board.rows(), board.cols());
    let mut center_rows = vec![(rows - 1) / 2, rows / 2];
    let mut center_cols = vec![(cols - 1) / 2, cols / 2];
    center_rows.dedup();
    center_cols.dedup();

    center_rows
        .iter()
        .flat_map(|&row| center_cols.iter().map(move |&col| Square::new(row, col)))
        .collect()
}

/// Activity of `color`: pseudo-legal destination squares over all pieces.
pub fn mobility(board: &Board, color: Color) -> i32 {
    pseudo_legal_count(board, color) as i32
}

/// Center-control points for `color`.
pub fn center_control(board: &Board, color: Color) -> i32 {
    let center = center_squares(board);
    let mut points = 0;

    for target in &center {
        if board.piece_at(*target).is_some_and(|p| p.color == color) {
            points += CENTER_OCCUPY_POINTS;
        }
    }

    for (from, piece) in board.pieces_of(color) {
        for target in &center {
            if attacks(board, piece, from, *target) {
                points += CENTER_ATTACK_POINTS;
            }
        }
    }

    points
}

/// Evaluate `board` from `perspective`'s point of view.
///
/// # Examples
///
/// ```
/// use minichess_engine::{evaluate, Board, Color};
///
/// let board = Board::standard();
/// let white = evaluate(&board, Color::White);
/// let black = evaluate(&board, Color::Black);
/// assert_eq!(white.score, -black.score);
/// ```
pub fn evaluate(board: &Board, perspective: Color) -> EvaluationResult {
    let opponent = perspective.opponent();

    let material = material_balance(board, perspective);
    let own_mobility = mobility(board, perspective);
    let opp_mobility = mobility(board, opponent);
    let own_king = king_safety(board, perspective);
    let opp_king = king_safety(board, opponent);
    let own_center = center_control(board, perspective);
    let opp_center = center_control(board, opponent);

    let score = MATERIAL_WEIGHT * material
        + MOBILITY_WEIGHT * (own_mobility - opp_mobility)
        + CENTER_WEIGHT * (own_center - opp_center)
        - own_king.penalty()
        + opp_king.penalty();

    EvaluationResult {
        perspective,
        material,
        mobility: own_mobility,
        opponent_mobility: opp_mobility,
        king_safety: own_king,
        opponent_king_safety: opp_king,
        center_control: own_center,
        opponent_center_control: opp_center,
        score,
    }
}

impl EvaluationResult {
    /// True when the perspective side's king is attacked.
    pub fn in_check(&self) -> bool {
        self.king_safety == KingSafety::InCheck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_squares_standard() {
        let board = Board::standard();
        assert_eq!(
            center_squares(&board),
            vec![Square::new(2, 1), Square::new(2, 2)]
        );

        let even = Board::empty(4, 4, Color::White).unwrap();
        assert_eq!(center_squares(&even).len(), 4);
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::standard();
        let result = evaluate(&board, Color::White);
        assert_eq!(result.material, 0);
        assert_eq!(result.mobility, result.opponent_mobility);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let layouts = [
            "nqkb/pppp/4/PPPP/NQKB w - -",
            "nqkb/p1pp/pN2/1PPP/1QKB b P -",
            "k3/4/3Q/4/1R1K b",
            "k3/4/4/4/R2K b",
            "1qk1/p3/2N1/P3/2K1 w",
        ];
        for text in layouts {
            let board = Board::from_text(text).unwrap();
            let white = evaluate(&board, Color::White);
            let black = evaluate(&board, Color::Black);
            assert_eq!(white.score, -black.score, "{}", text);
            assert_eq!(white.material, -black.material);
        }
    }

    #[test]
    fn test_material_dominates() {
        let board = Board::from_text("k3/4/4/4/QR1K w").unwrap();
        let result = evaluate(&board, Color::White);
        assert_eq!(result.material, 14);
        assert!(result.score > 1000);
        assert!(evaluate(&board, Color::Black).score < -1000);
    }

    #[test]
    fn test_check_reported() {
        let board = Board::from_text("k3/4/4/4/R2K b").unwrap();
        let result = evaluate(&board, Color::Black);
        assert!(result.in_check());
        assert_eq!(result.opponent_king_safety, KingSafety::Safe);
    }

    #[test]
    fn test_center_control_counts_occupation_and_attack() {
        // White knight on b3 occupies a center square; its pawn on a2 attacks b3
        let board = Board::from_text("k3/4/1N2/P3/3K w").unwrap();
        assert!(center_control(&board, Color::White) >= CENTER_OCCUPY_POINTS + CENTER_ATTACK_POINTS);
        assert_eq!(center_control(&board, Color::Black), 0);
    }
}
