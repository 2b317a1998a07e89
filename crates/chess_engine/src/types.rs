//! # Core Types - Colours, Pieces, Squares and Moves
//!
//! ## Coordinates
//!
//! Squares are addressed as `(row, col)` with row 0 at the top of the board,
//! which is Black's back rank. White pawns travel toward row 0 and Black
//! pawns toward the last row. Coordinates are unsigned: a caller-supplied
//! square may still lie outside a particular board, and the validator is the
//! boundary that rejects it.
//!
//! ## Closed Piece Set
//!
//! `PieceKind` is a closed enum. Per-kind behaviour (movement shape, value,
//! notation letter) is looked up by [`PieceKind::index`] rather than through
//! trait objects, so the rule set stays a handful of pure functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a single forward pawn step.
    #[inline]
    pub fn forward(self) -> i16 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Single-letter code used by the text layout (`w` / `b`).
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            other => Err(format!("unknown colour '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case notation letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parse a notation letter, ignoring case.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Layout code: upper case for White, lower case for Black.
    pub fn code(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_code(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

/// A board coordinate, `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// Shift by a signed delta. `None` when either coordinate goes negative
    /// or past `u8`; the upper board edge is checked by the caller.
    pub fn offset(self, d_row: i16, d_col: i16) -> Option<Square> {
        let row = u8::try_from(self.row as i16 + d_row).ok()?;
        let col = u8::try_from(self.col as i16 + d_col).ok()?;
        Some(Square { row, col })
    }

    /// Algebraic name on a board with `rows` rows: files `a..`, ranks counted
    /// from the bottom.
    pub fn algebraic(self, rows: u8) -> String {
        let file = (b'a' + self.col) as char;
        let rank = rows as i16 - self.row as i16;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Long algebraic notation, e.g. `a2-a3`, `b3xc4`, `a4-a5=Q`.
    pub fn notation(&self, rows: u8, capture: bool, promoted: Option<PieceKind>) -> String {
        let sep = if capture { 'x' } else { '-' };
        let mut out = format!(
            "{}{}{}",
            self.from.algebraic(rows),
            sep,
            self.to.algebraic(rows)
        );
        if let Some(kind) = promoted {
            out.push('=');
            out.push(kind.letter());
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_code_round_trip() {
        for kind in PieceKind::ALL {
            for color in Color::BOTH {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
        assert_eq!(Piece::from_code('x'), None);
    }

    #[test]
    fn test_square_offset_rejects_negative() {
        let sq = Square::new(0, 2);
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(1, -2), Some(Square::new(1, 0)));
    }

    #[test]
    fn test_move_notation() {
        let mv = Move::new(Square::new(3, 0), Square::new(2, 0));
        assert_eq!(mv.notation(5, false, None), "a2-a3");

        let capture = Move::new(Square::new(2, 1), Square::new(1, 2));
        assert_eq!(capture.notation(5, true, None), "b3xc4");

        let promo = Move::with_promotion(Square::new(1, 0), Square::new(0, 0), PieceKind::Queen);
        assert_eq!(
            promo.notation(5, false, Some(PieceKind::Queen)),
            "a4-a5=Q"
        );
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!("B".parse::<Color>(), Ok(Color::Black));
        assert!("green".parse::<Color>().is_err());
    }
}
