//! Error types for the chess engine
//!
//! Provides the reasons a move can be rejected and the ways a textual board
//! layout can be malformed. Both are recoverable by the caller.

use crate::types::Color;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a proposed move was rejected.
///
/// Variants are listed in the order the validator checks them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    /// Source or destination lies outside the board
    #[error("square is outside the board")]
    OutOfBounds,

    #[error("no piece at source square")]
    NoPieceAtSource,

    /// Piece at source belongs to the side not on move
    #[error("piece does not belong to the side to move")]
    WrongTurn,

    #[error("destination holds a piece of the same colour")]
    SelfCapture,

    #[error("piece cannot move in that shape")]
    IllegalShapeForPiece,

    /// A sliding piece would pass through an occupied square
    #[error("path to destination is blocked")]
    PathBlocked,

    /// Promotion piece given where none applies, or an invalid promotion kind
    #[error("invalid promotion")]
    InvalidPromotion,

    #[error("move would leave own king in check")]
    KingWouldBeExposed,
}

impl IllegalMove {
    /// Stable machine-readable reason code.
    pub fn code(self) -> &'static str {
        match self {
            IllegalMove::OutOfBounds => "OUT_OF_BOUNDS",
            IllegalMove::NoPieceAtSource => "NO_PIECE_AT_SOURCE",
            IllegalMove::WrongTurn => "WRONG_TURN",
            IllegalMove::SelfCapture => "SELF_CAPTURE",
            IllegalMove::IllegalShapeForPiece => "ILLEGAL_SHAPE_FOR_PIECE",
            IllegalMove::PathBlocked => "PATH_BLOCKED",
            IllegalMove::InvalidPromotion => "INVALID_PROMOTION",
            IllegalMove::KingWouldBeExposed => "KING_WOULD_BE_EXPOSED",
        }
    }
}

impl Serialize for IllegalMove {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Errors raised while parsing or checking a board layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("layout is missing the {0} field")]
    MissingField(&'static str),

    /// Board exceeds the supported dimensions
    #[error("board of {rows}x{cols} exceeds the supported size")]
    TooLarge { rows: usize, cols: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid piece code '{0}'")]
    InvalidPieceCode(char),

    #[error("invalid side to move '{0}'")]
    InvalidTurn(String),

    #[error("invalid capture list '{0}'")]
    InvalidCaptureList(String),

    #[error("unexpected trailing field '{0}'")]
    UnexpectedField(String),

    /// Each side needs exactly one king to be playable
    #[error("{color} has {found} kings, expected exactly one")]
    KingCount { color: Color, found: usize },

    #[error("pawn on its last rank at ({row},{col})")]
    PawnOnLastRank { row: u8, col: u8 },

    /// The side that just moved may not be left in check
    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Result type alias for layout parsing
pub type LayoutResult<T> = Result<T, LayoutError>;
