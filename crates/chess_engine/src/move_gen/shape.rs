//! Per-piece movement shapes
//!
//! Shape legality is dispatched through [`SHAPE_RULES`], a table of plain
//! functions indexed by [`PieceKind::index`]. Each rule answers one question:
//! can this piece travel from `from` to `to` on this board, ignoring whose
//! turn it is and whether the own king ends up attacked?
//!
//! ## Sliding pieces
//!
//! Bishops, rooks and queens share [`slide`], which walks every square
//! strictly between `from` and `to` and reports `PathBlocked` on the first
//! occupied one. The destination itself is never inspected here.

use crate::board::Board;
use crate::error::IllegalMove;
use crate::types::*;

/// Shape check for one piece kind.
pub type ShapeRule = fn(&Board, Piece, Square, Square) -> Result<(), IllegalMove>;

/// Shape rules indexed by [`PieceKind::index`].
pub const SHAPE_RULES: [ShapeRule; 6] = [
    pawn_shape,
    knight_shape,
    bishop_shape,
    rook_shape,
    queen_shape,
    king_shape,
];

/// Knight jumps as `(row, col)` deltas.
pub const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight unit steps, orthogonals first.
pub const KING_OFFSETS: [(i16, i16); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const ROOK_DIRS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Check the movement shape of `piece` from `from` to `to`.
#[inline]
pub fn check_shape(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    SHAPE_RULES[piece.kind.index()](board, piece, from, to)
}

#[inline]
fn delta(from: Square, to: Square) -> (i16, i16) {
    (
        to.row as i16 - from.row as i16,
        to.col as i16 - from.col as i16,
    )
}

fn pawn_shape(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    // A pawn on its last rank has already promoted; it never advances further
    if from.row == board.last_rank(piece.color) {
        return Err(IllegalMove::IllegalShapeForPiece);
    }

    let (dr, dc) = delta(from, to);
    if dr != piece.color.forward() {
        return Err(IllegalMove::IllegalShapeForPiece);
    }

    match (dc.abs(), board.piece_at(to)) {
        (0, None) => Ok(()),
        (1, Some(target)) if target.color != piece.color => Ok(()),
        _ => Err(IllegalMove::IllegalShapeForPiece),
    }
}

fn knight_shape(_board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    match (dr.abs(), dc.abs()) {
        (1, 2) | (2, 1) => Ok(()),
        _ => Err(IllegalMove::IllegalShapeForPiece),
    }
}

fn bishop_shape(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    if dr == 0 || dr.abs() != dc.abs() {
        return Err(IllegalMove::IllegalShapeForPiece);
    }
    slide(board, from, to)
}

fn rook_shape(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    if (dr == 0) == (dc == 0) {
        return Err(IllegalMove::IllegalShapeForPiece);
    }
    slide(board, from, to)
}

fn queen_shape(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    if dr.abs() == dc.abs() {
        bishop_shape(board, piece, from, to)
    } else {
        rook_shape(board, piece, from, to)
    }
}

fn king_shape(_board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    if dr.abs().max(dc.abs()) == 1 {
        Ok(())
    } else {
        Err(IllegalMove::IllegalShapeForPiece)
    }
}

/// Walk the squares strictly between `from` and `to` on a straight or
/// diagonal line.
fn slide(board: &Board, from: Square, to: Square) -> Result<(), IllegalMove> {
    let (dr, dc) = delta(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from;

    loop {
        current = current
            .offset(step_r, step_c)
            .ok_or(IllegalMove::OutOfBounds)?;
        if current == to {
            return Ok(());
        }
        if board.piece_at(current).is_some() {
            return Err(IllegalMove::PathBlocked);
        }
    }
}
