//! Board state model
//!
//! Holds piece placement on an R×C grid, the side to move, and the pieces
//! each colour has lost. The board applies moves without checking them: the
//! validator is the only gate in front of [`Board::apply_move`].
//!
//! ## Text layout
//!
//! The compact textual form reads
//!
//! ```text
//! nqkb/pppp/4/PPPP/NQKB w - -
//! ```
//!
//! rows from the top separated by `/`, upper case for White, lower case for
//! Black, digits for runs of empty squares, then the side to move and the
//! pieces lost by White and by Black in capture order (`-` when none).
//! Parsing and printing round-trip exactly.

use crate::constants::*;
use crate::error::{LayoutError, LayoutResult};
use crate::types::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    squares: Vec<Option<Piece>>,
    side_to_move: Color,
    /// Pieces lost by each colour, indexed by [`Color::index`]
    lost: [Vec<PieceKind>; 2],
}

/// Outcome of [`Board::apply_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: Option<PieceKind>,
}

impl Board {
    /// Standard 5×4 opening layout, White to move.
    pub fn standard() -> Board {
        let mut board = Board::blank(STANDARD_ROWS, STANDARD_COLS, Color::White);
        let last = STANDARD_ROWS - 1;

        for (col, kind) in STANDARD_BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.place(Square::new(0, col), Some(Piece::new(*kind, Color::Black)));
            board.place(
                Square::new(1, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            board.place(
                Square::new(last - 1, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.place(Square::new(last, col), Some(Piece::new(*kind, Color::White)));
        }

        board
    }

    /// Empty board of the given size.
    pub fn empty(rows: u8, cols: u8, side_to_move: Color) -> LayoutResult<Board> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::Empty);
        }
        if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(LayoutError::TooLarge {
                rows: rows as usize,
                cols: cols as usize,
            });
        }
        Ok(Board::blank(rows, cols, side_to_move))
    }

    fn blank(rows: u8, cols: u8, side_to_move: Color) -> Board {
        Board {
            rows,
            cols,
            squares: vec![None; rows as usize * cols as usize],
            side_to_move,
            lost: [Vec::new(), Vec::new()],
        }
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Pieces `color` has lost so far, in capture order.
    pub fn lost_pieces(&self, color: Color) -> &[PieceKind] {
        &self.lost[color.index()]
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        sq.row < self.rows && sq.col < self.cols
    }

    #[inline]
    fn index_of(&self, sq: Square) -> Option<usize> {
        if self.contains(sq) {
            Some(sq.row as usize * self.cols as usize + sq.col as usize)
        } else {
            None
        }
    }

    #[inline]
    fn square_of(&self, index: usize) -> Square {
        let cols = self.cols as usize;
        Square::new((index / cols) as u8, (index % cols) as u8)
    }

    /// Piece on `sq`; `None` for empty or off-board squares.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.index_of(sq).and_then(|i| self.squares[i])
    }

    /// Put `piece` on `sq` (or clear it). Off-board squares are ignored.
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(i) = self.index_of(sq) {
            self.squares[i] = piece;
        }
    }

    /// Every coordinate, row-major from the top left.
    pub fn all_squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..self.squares.len()).map(move |i| self.square_of(i))
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(i, p)| p.map(|p| (self.square_of(i), p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Row a pawn of `color` promotes on.
    #[inline]
    pub fn last_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => 0,
            Color::Black => self.rows - 1,
        }
    }

    /// Grid of squares, top row first.
    pub fn grid(&self) -> Vec<Vec<Option<Piece>>> {
        self.squares
            .chunks(self.cols as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Apply an already validated move and flip the turn.
    ///
    /// Removes the mover from `from`, drops whatever stood on `to` into the
    /// owner's lost list, and places the piece (promoted when a pawn reaches
    /// its last rank, queen by default). Returns `None` without touching the
    /// board when `from` is empty or either square is off the board.
    pub fn apply_move(&mut self, mv: &Move) -> Option<AppliedMove> {
        let from = self.index_of(mv.from)?;
        let to = self.index_of(mv.to)?;
        let piece = self.squares[from].take()?;

        let promoted = if piece.kind == PieceKind::Pawn && mv.to.row == self.last_rank(piece.color)
        {
            Some(mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            None
        };

        let placed = Piece::new(promoted.unwrap_or(piece.kind), piece.color);
        let captured = self.squares[to].replace(placed);
        if let Some(victim) = captured {
            self.lost[victim.color.index()].push(victim.kind);
        }
        self.side_to_move = self.side_to_move.opponent();

        Some(AppliedMove {
            piece,
            captured,
            promoted,
        })
    }

    /// Copy of the board with `mv` applied.
    pub fn with_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    /// Check that the position can be played: one king per side, no pawn
    /// stranded on its promotion rank, and the side not to move out of check.
    pub fn check_playable(&self) -> LayoutResult<()> {
        for color in Color::BOTH {
            let found = self
                .pieces_of(color)
                .filter(|(_, p)| p.kind == PieceKind::King)
                .count();
            if found != 1 {
                return Err(LayoutError::KingCount { color, found });
            }
        }

        for (sq, piece) in self.pieces() {
            if piece.kind == PieceKind::Pawn && sq.row == self.last_rank(piece.color) {
                return Err(LayoutError::PawnOnLastRank {
                    row: sq.row,
                    col: sq.col,
                });
            }
        }

        let waiting = self.side_to_move.opponent();
        if crate::move_gen::is_in_check(self, waiting) {
            return Err(LayoutError::OpponentInCheck(waiting));
        }

        Ok(())
    }

    /// Compact text form (see module docs).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.squares.len() + 16);

        for (row_idx, row) in self.squares.chunks(self.cols as usize).enumerate() {
            if row_idx > 0 {
                out.push('/');
            }
            let mut run = 0usize;
            for square in row {
                match square {
                    Some(piece) => {
                        if run > 0 {
                            out.push_str(&run.to_string());
                            run = 0;
                        }
                        out.push(piece.code());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push_str(&run.to_string());
            }
        }

        out.push(' ');
        out.push(self.side_to_move.code());

        for color in Color::BOTH {
            out.push(' ');
            let lost = &self.lost[color.index()];
            if lost.is_empty() {
                out.push('-');
            } else {
                out.extend(lost.iter().map(|kind| Piece::new(*kind, color).code()));
            }
        }

        out
    }

    /// Parse the compact text form. The capture fields may be omitted.
    ///
    /// Only structure is checked here; use [`Board::check_playable`] before
    /// starting a game from the result.
    pub fn from_text(text: &str) -> LayoutResult<Board> {
        let mut fields = text.split_whitespace();
        let placement = fields.next().ok_or(LayoutError::Empty)?;
        let turn = fields
            .next()
            .ok_or(LayoutError::MissingField("side to move"))?;
        let white_lost = fields.next().unwrap_or("-");
        let black_lost = fields.next().unwrap_or("-");
        if let Some(extra) = fields.next() {
            return Err(LayoutError::UnexpectedField(extra.to_string()));
        }

        let mut grid: Vec<Vec<Option<Piece>>> = Vec::new();
        for (row_idx, row_text) in placement.split('/').enumerate() {
            let row = parse_row(row_text, row_idx)?;
            if row.is_empty() {
                return Err(LayoutError::Empty);
            }
            if let Some(first) = grid.first() {
                if row.len() != first.len() {
                    return Err(LayoutError::RaggedRow {
                        row: row_idx,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            grid.push(row);
        }

        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows > MAX_DIMENSION as usize || cols > MAX_DIMENSION as usize {
            return Err(LayoutError::TooLarge { rows, cols });
        }

        let side_to_move = match turn {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(LayoutError::InvalidTurn(other.to_string())),
        };

        let mut board = Board::blank(rows as u8, cols as u8, side_to_move);
        board.squares = grid.into_iter().flatten().collect();
        board.lost[Color::White.index()] = parse_lost(white_lost, Color::White)?;
        board.lost[Color::Black.index()] = parse_lost(black_lost, Color::Black)?;

        Ok(board)
    }
}

fn parse_row(text: &str, row_idx: usize) -> LayoutResult<Vec<Option<Piece>>> {
    let mut row = Vec::new();
    let mut run = 0usize;

    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            run = run * 10 + digit as usize;
            if run > MAX_DIMENSION as usize {
                return Err(LayoutError::TooLarge {
                    rows: row_idx + 1,
                    cols: run,
                });
            }
            continue;
        }
        row.resize(row.len() + run, None);
        run = 0;
        let piece = Piece::from_code(c).ok_or(LayoutError::InvalidPieceCode(c))?;
        row.push(Some(piece));
    }
    row.resize(row.len() + run, None);

    if row.len() > MAX_DIMENSION as usize {
        return Err(LayoutError::TooLarge {
            rows: row_idx + 1,
            cols: row.len(),
        });
    }
    Ok(row)
}

fn parse_lost(field: &str, color: Color) -> LayoutResult<Vec<PieceKind>> {
    if field == "-" {
        return Ok(Vec::new());
    }
    field
        .chars()
        .map(|c| match Piece::from_code(c) {
            Some(piece) if piece.color == color && piece.kind != PieceKind::King => Ok(piece.kind),
            _ => Err(LayoutError::InvalidCaptureList(field.to_string())),
        })
        .collect()
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl FromStr for Board {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_text(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "{:>2} ", self.rows - row)?;
            for col in 0..self.cols {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map_or('.', Piece::code);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.cols {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        writeln!(f)?;
        write!(f, "{} to move", self.side_to_move)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Board::from_text(&text).map_err(serde::de::Error::custom)
    }
}
