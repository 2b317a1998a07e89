//! # Engine Constants - Piece Values, Evaluation Weights & Search Bounds
//!
//! ## Piece Valuation
//!
//! Material is counted in whole pawns using the classic 1/3/3/5/9 scheme.
//! The king carries no material value: losing it is not a trade, it is the
//! end of the game, and the search handles that through mate scores instead.
//!
//! The evaluator converts pawn units into **centipawns** (1/100th of a pawn)
//! before combining them with the positional terms, so every weight below is
//! expressed in centipawns.
//!
//! ## Mate Scores
//!
//! A side with no legal moves while in check scores `-MATE_SCORE + ply`. Adding
//! the ply makes a mate found closer to the root worth more than a distant one,
//! which keeps the engine from dawdling when a quick mate exists. Any score
//! whose magnitude exceeds `MATE_THRESHOLD` is a forced mate.

use crate::types::PieceKind;

/// Material value in pawns, indexed by [`PieceKind::index`].
pub const PIECE_VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];

/// Centipawns per pawn of material.
pub const MATERIAL_WEIGHT: i32 = 100;

/// Centipawns per pseudo-legal destination square.
pub const MOBILITY_WEIGHT: i32 = 5;

/// Centipawns per point of center control.
pub const CENTER_WEIGHT: i32 = 10;

/// Center-control points for occupying a central square.
pub const CENTER_OCCUPY_POINTS: i32 = 2;

/// Center-control points for attacking a central square.
pub const CENTER_ATTACK_POINTS: i32 = 1;

/// King-safety penalty for an exposed king, in centipawns.
pub const KING_EXPOSED_PENALTY: i32 = 30;

/// King-safety penalty for a king in check, in centipawns.
pub const KING_IN_CHECK_PENALTY: i32 = 60;

pub const MATE_SCORE: i32 = 100_000;
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;
pub const DRAW_SCORE: i32 = 0;

/// Alpha-beta window bound. Strictly larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Default tie window for randomised move choice, in centipawns.
pub const DEFAULT_TIE_EPSILON: i32 = 10;

/// Nodes searched between two deadline checks.
pub const DEADLINE_CHECK_INTERVAL: u64 = 64;

/// Largest supported board edge, in squares.
pub const MAX_DIMENSION: u8 = 16;

pub const STANDARD_ROWS: u8 = 5;
pub const STANDARD_COLS: u8 = 4;

/// Back rank of the standard opening, left to right, for both colours.
pub const STANDARD_BACK_RANK: [PieceKind; STANDARD_COLS as usize] = [
    PieceKind::Knight,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
];

/// Text form of the standard opening layout.
pub const STANDARD_LAYOUT: &str = "nqkb/pppp/4/PPPP/NQKB w - -";

/// Material value of a piece kind in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}
