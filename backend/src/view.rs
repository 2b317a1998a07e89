//! Read-only snapshot of a session returned by every manager operation

use crate::session::{GameSession, MoveRecord, SessionStatus};
use chrono::{DateTime, Utc};
use minichess_engine::{is_in_check, Color, Difficulty, Piece, PieceKind};
use serde::Serialize;
use uuid::Uuid;

/// Pieces each side has lost, in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedPieces {
    pub white: Vec<PieceKind>,
    pub black: Vec<PieceKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub rows: u8,
    pub cols: u8,
    /// Compact text form of the board
    pub layout: String,
    /// Row-major grid, row 0 first
    pub squares: Vec<Vec<Option<Piece>>>,
    pub side_to_move: Color,
    pub in_check: bool,
    pub status: SessionStatus,
    pub human_color: Color,
    pub difficulty: Difficulty,
    pub captured: CapturedPieces,
    pub history: Vec<MoveRecord>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionView {
    pub fn from_session(session: &GameSession, last_active_at: DateTime<Utc>) -> Self {
        let board = &session.board;
        let side = board.side_to_move();

        SessionView {
            id: session.id,
            rows: board.rows(),
            cols: board.cols(),
            layout: board.to_text(),
            squares: board.grid(),
            side_to_move: side,
            in_check: is_in_check(board, side),
            status: session.status,
            human_color: session.human_color,
            difficulty: session.difficulty,
            captured: CapturedPieces {
                white: board.lost_pieces(Color::White).to_vec(),
                black: board.lost_pieces(Color::Black).to_vec(),
            },
            history: session.history.clone(),
            created_at: session.created_at,
            last_active_at,
        }
    }

    pub fn is_humans_turn(&self) -> bool {
        self.side_to_move == self.human_color
    }
}
