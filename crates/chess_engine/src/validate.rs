//! Move validation
//!
//! [`validate`] is a pure function of the board and the proposed move. It
//! runs a fixed pipeline and stops at the first failing stage:
//!
//! 1. both squares lie on the board
//! 2. a piece of the side to move stands on `from`
//! 3. `to` does not hold a piece of the same colour
//! 4. the piece's movement shape allows `from → to` (path checked for sliders)
//! 5. the promotion field fits the move
//! 6. on a cloned board with the move applied, the mover's king is not attacked
//!
//! Each failure carries its own [`IllegalMove`] reason so callers can tell
//! *why* a move was refused.

use crate::board::Board;
use crate::error::IllegalMove;
use crate::move_gen::{check_shape, is_in_check};
use crate::types::*;

/// Decide whether `mv` is legal on `board` for the side to move.
pub fn validate(board: &Board, mv: &Move) -> Result<(), IllegalMove> {
    if !board.contains(mv.from) || !board.contains(mv.to) {
        return Err(IllegalMove::OutOfBounds);
    }

    let piece = board
        .piece_at(mv.from)
        .ok_or(IllegalMove::NoPieceAtSource)?;
    if piece.color != board.side_to_move() {
        return Err(IllegalMove::WrongTurn);
    }

    if board
        .piece_at(mv.to)
        .is_some_and(|target| target.color == piece.color)
    {
        return Err(IllegalMove::SelfCapture);
    }

    check_shape(board, piece, mv.from, mv.to)?;
    check_promotion(board, piece, mv)?;

    let after = board.with_move(mv);
    if is_in_check(&after, piece.color) {
        return Err(IllegalMove::KingWouldBeExposed);
    }

    Ok(())
}

/// Convenience wrapper returning a plain bool.
pub fn is_legal(board: &Board, mv: &Move) -> bool {
    validate(board, mv).is_ok()
}

fn check_promotion(board: &Board, piece: Piece, mv: &Move) -> Result<(), IllegalMove> {
    let promotes = piece.kind == PieceKind::Pawn && mv.to.row == board.last_rank(piece.color);
    match mv.promotion {
        None => Ok(()),
        Some(kind) if promotes && kind.is_promotion_target() => Ok(()),
        Some(_) => Err(IllegalMove::InvalidPromotion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(fr: u8, fc: u8, tr: u8, tc: u8) -> Move {
        Move::new(Square::new(fr, fc), Square::new(tr, tc))
    }

    #[test]
    fn test_single_pawn_push_is_legal() {
        let board = Board::standard();
        assert_eq!(validate(&board, &mv(3, 0, 2, 0)), Ok(()));

        let after = board.with_move(&mv(3, 0, 2, 0));
        assert_eq!(after.piece_at(Square::new(3, 0)), None);
        assert_eq!(
            after.piece_at(Square::new(2, 0)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(after.side_to_move(), Color::Black);
    }

    #[test]
    fn test_double_pawn_push_is_illegal_shape() {
        let board = Board::standard();
        assert_eq!(
            validate(&board, &mv(3, 0, 1, 0)),
            Err(IllegalMove::IllegalShapeForPiece)
        );

        let open = Board::from_text("nqkb/4/4/PPPP/NQKB w").unwrap();
        assert_eq!(
            validate(&open, &mv(3, 0, 1, 0)),
            Err(IllegalMove::IllegalShapeForPiece)
        );
    }

    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let board = Board::from_text("r2k/4/4/R3/K3 w").unwrap();
        let before = board.clone();

        assert_eq!(
            validate(&board, &mv(3, 0, 3, 1)),
            Err(IllegalMove::KingWouldBeExposed)
        );
        assert_eq!(board, before);

        // Moving along the pin line is fine
        assert_eq!(validate(&board, &mv(3, 0, 1, 0)), Ok(()));
    }

    #[test]
    fn test_pipeline_reasons() {
        let board = Board::standard();
        assert_eq!(
            validate(&board, &mv(3, 0, 9, 0)),
            Err(IllegalMove::OutOfBounds)
        );
        assert_eq!(
            validate(&board, &mv(2, 0, 1, 0)),
            Err(IllegalMove::NoPieceAtSource)
        );
        assert_eq!(
            validate(&board, &mv(1, 0, 2, 0)),
            Err(IllegalMove::WrongTurn)
        );
        assert_eq!(
            validate(&board, &mv(4, 1, 3, 1)),
            Err(IllegalMove::SelfCapture)
        );
        assert_eq!(
            validate(&board, &mv(3, 1, 2, 2)),
            Err(IllegalMove::IllegalShapeForPiece)
        );

        let blocked = Board::from_text("k3/4/1p2/4/1R1K w").unwrap();
        assert_eq!(
            validate(&blocked, &mv(4, 1, 1, 1)),
            Err(IllegalMove::PathBlocked)
        );
    }

    #[test]
    fn test_promotion_field() {
        let board = Board::from_text("3k/P3/4/4/K3 w").unwrap();
        let to_queen = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::Queen);
        assert_eq!(validate(&board, &to_queen), Ok(()));
        assert_eq!(validate(&board, &mv(1, 0, 0, 0)), Ok(()));

        let to_king = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::King);
        assert_eq!(
            validate(&board, &to_king),
            Err(IllegalMove::InvalidPromotion)
        );

        let king_step = Move::with_promotion(Square::new(4, 0), Square::new(3, 0), PieceKind::Queen);
        assert_eq!(
            validate(&board, &king_step),
            Err(IllegalMove::InvalidPromotion)
        );
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let board = Board::from_text("k3/4/4/3r/K3 w").unwrap();
        assert_eq!(
            validate(&board, &mv(4, 0, 3, 0)),
            Err(IllegalMove::KingWouldBeExposed)
        );
        assert_eq!(validate(&board, &mv(4, 0, 4, 1)), Ok(()));
    }

    #[test]
    fn test_validate_is_pure() {
        let board = Board::from_text("r2k/4/4/R3/K3 w").unwrap();
        for candidate in [mv(3, 0, 3, 1), mv(3, 0, 1, 0), mv(4, 0, 4, 1), mv(0, 0, 1, 0)] {
            assert_eq!(validate(&board, &candidate), validate(&board, &candidate));
        }
    }
}
