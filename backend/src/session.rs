//! A single game between a human and the AI
//!
//! `GameSession` owns the board and history of one game. It is only ever
//! touched through the manager, which wraps each session in its own lock.

use crate::error::{SessionError, SessionResult};
use chrono::{DateTime, Utc};
use minichess_engine::{
    do_move, game_status, Board, Color, Difficulty, GameStatus, Move, Piece, PieceKind,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a session: `Active → Completed | Expired`.
///
/// Creation is not a state of its own: a session is built already `Active`,
/// or `Completed` when its starting position is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed { result: GameResult },
    Expired,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed { .. } | SessionStatus::Expired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Checkmate { winner: Color },
    Stalemate,
}

/// One entry of the append-only move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// 1-based ply number
    pub seq: u32,
    #[serde(rename = "move")]
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: Option<PieceKind>,
    pub notation: String,
    pub at: DateTime<Utc>,
}

/// Parameters for a new session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewSession {
    pub difficulty: Difficulty,
    pub human_color: Color,
    /// Custom layout in the compact text form; standard opening when absent
    pub layout: Option<String>,
}

impl Default for NewSession {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_color: Color::White,
            layout: None,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    pub id: Uuid,
    pub board: Board,
    pub status: SessionStatus,
    pub difficulty: Difficulty,
    pub human_color: Color,
    pub created_at: DateTime<Utc>,
    pub history: Vec<MoveRecord>,
    /// Tie-break randomness for Easy searches
    pub rng: StdRng,
}

impl GameSession {
    /// Build a session with its status taken from the starting position.
    pub fn start(
        id: Uuid,
        board: Board,
        difficulty: Difficulty,
        human_color: Color,
        rng: StdRng,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            status: status_of(&board),
            board,
            difficulty,
            human_color,
            created_at: now,
            history: Vec::new(),
            rng,
        }
    }

    pub fn ai_color(&self) -> Color {
        self.human_color.opponent()
    }

    pub fn is_humans_turn(&self) -> bool {
        self.board.side_to_move() == self.human_color
    }

    /// Moves are only accepted while the game is running.
    pub fn ensure_active(&self) -> SessionResult<()> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Expired => Err(SessionError::NotFound(self.id)),
            SessionStatus::Completed { .. } => Err(SessionError::NotActive(self.id)),
        }
    }

    /// Validate and apply `mv`, append it to the history, and complete the
    /// game if it ended. Nothing changes when the move is rejected.
    pub fn play(&mut self, mv: Move, at: DateTime<Utc>) -> SessionResult<MoveRecord> {
        let applied = do_move(&mut self.board, &mv)?;
        let notation = mv.notation(
            self.board.rows(),
            applied.captured.is_some(),
            applied.promoted,
        );

        let record = MoveRecord {
            seq: self.history.len() as u32 + 1,
            mv,
            piece: applied.piece,
            captured: applied.captured,
            promoted: applied.promoted,
            notation,
            at,
        };
        self.history.push(record.clone());
        self.status = status_of(&self.board);

        Ok(record)
    }
}

fn status_of(board: &Board) -> SessionStatus {
    match game_status(board) {
        GameStatus::Ongoing => SessionStatus::Active,
        GameStatus::Checkmate { winner } => SessionStatus::Completed {
            result: GameResult::Checkmate { winner },
        },
        GameStatus::Stalemate => SessionStatus::Completed {
            result: GameResult::Stalemate,
        },
    }
}
