//! Move generation
//!
//! Enumerates candidate destinations per piece from fixed offset tables and
//! sliding rays, then keeps exactly the moves [`validate`] accepts. Nothing
//! leaves this module that the validator would reject.
//!
//! Generation order is deterministic: pieces in row-major order, targets in
//! offset-table order, promotions strongest first.
//!
//! ## Module Organization
//!
//! - `shape` - Per-piece movement shapes, dispatched by piece kind
//! - `attack` - Attack detection and check queries

pub mod attack;
pub mod shape;

pub use attack::{attacks, count_attackers, is_in_check, is_square_attacked};
pub use shape::check_shape;

use crate::board::Board;
use crate::types::*;
use crate::validate::validate;
use shape::{BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};

/// On-board squares `piece` on `from` could conceivably reach. Sliding rays
/// stop on (and include) the first occupied square.
pub fn candidate_targets(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    let mut targets = Vec::with_capacity(16);

    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            for dc in [0, -1, 1] {
                push_step(board, from, forward, dc, &mut targets);
            }
        }
        PieceKind::Knight => {
            for (dr, dc) in KNIGHT_OFFSETS {
                push_step(board, from, dr, dc, &mut targets);
            }
        }
        PieceKind::King => {
            for (dr, dc) in KING_OFFSETS {
                push_step(board, from, dr, dc, &mut targets);
            }
        }
        PieceKind::Bishop => push_rays(board, from, &BISHOP_DIRS, &mut targets),
        PieceKind::Rook => push_rays(board, from, &ROOK_DIRS, &mut targets),
        PieceKind::Queen => {
            push_rays(board, from, &ROOK_DIRS, &mut targets);
            push_rays(board, from, &BISHOP_DIRS, &mut targets);
        }
    }

    targets
}

fn push_step(board: &Board, from: Square, dr: i16, dc: i16, out: &mut Vec<Square>) {
    if let Some(to) = from.offset(dr, dc) {
        if board.contains(to) {
            out.push(to);
        }
    }
}

fn push_rays(board: &Board, from: Square, dirs: &[(i16, i16)], out: &mut Vec<Square>) {
    for &(dr, dc) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            if !board.contains(next) {
                break;
            }
            out.push(next);
            if board.piece_at(next).is_some() {
                break;
            }
            current = next;
        }
    }
}

/// Moves from `from` to `to`, expanded into every promotion choice when a
/// pawn lands on its last rank.
fn expand_promotions(board: &Board, from: Square, to: Square, piece: Piece) -> Vec<Move> {
    if piece.kind == PieceKind::Pawn && to.row == board.last_rank(piece.color) {
        PieceKind::PROMOTIONS
            .iter()
            .map(|kind| Move::with_promotion(from, to, *kind))
            .collect()
    } else {
        vec![Move::new(from, to)]
    }
}

/// All legal moves for the side to move.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move();
    let mut moves = Vec::with_capacity(32);

    for (from, piece) in board.pieces_of(side) {
        for to in candidate_targets(board, from, piece) {
            for mv in expand_promotions(board, from, to, piece) {
                if validate(board, &mv).is_ok() {
                    moves.push(mv);
                }
            }
        }
    }

    moves
}

/// Does the side to move have at least one legal move?
pub fn has_legal_move(board: &Board) -> bool {
    let side = board.side_to_move();

    board.pieces_of(side).any(|(from, piece)| {
        candidate_targets(board, from, piece)
            .into_iter()
            .flat_map(|to| expand_promotions(board, from, to, piece))
            .any(|mv| validate(board, &mv).is_ok())
    })
}

/// Number of pseudo-legal destination squares for `color`: shape-legal and
/// not onto an own piece, regardless of whose turn it is or of check.
pub fn pseudo_legal_count(board: &Board, color: Color) -> usize {
    board
        .pieces_of(color)
        .map(|(from, piece)| {
            candidate_targets(board, from, piece)
                .into_iter()
                .filter(|to| match board.piece_at(*to) {
                    Some(target) => target.color != color,
                    None => true,
                })
                .filter(|to| check_shape(board, piece, from, *to).is_ok())
                .count()
        })
        .sum()
}
