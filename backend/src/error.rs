//! Session error types

use minichess_engine::{IllegalMove, LayoutError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown id, deleted, or expired by the sweep
    #[error("session {0} not found")]
    NotFound(Uuid),

    /// The game is already over
    #[error("session {0} is not active")]
    NotActive(Uuid),

    #[error("it is not the AI's turn")]
    NotAisTurn,

    #[error("it is not the human player's turn")]
    NotHumansTurn,

    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),

    /// The side to move has no legal move; the game should already be over
    #[error("no legal moves available")]
    NoLegalMoves,

    /// The search task panicked or was cancelled before returning a move
    #[error("AI search failed")]
    SearchFailed,
}

impl SessionError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "SESSION_NOT_FOUND",
            SessionError::NotActive(_) => "SESSION_NOT_ACTIVE",
            SessionError::NotAisTurn => "NOT_AIS_TURN",
            SessionError::NotHumansTurn => "NOT_HUMANS_TURN",
            SessionError::IllegalMove(reason) => reason.code(),
            SessionError::InvalidLayout(_) => "INVALID_LAYOUT",
            SessionError::NoLegalMoves => "NO_LEGAL_MOVES",
            SessionError::SearchFailed => "SEARCH_FAILED",
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SessionError::NotAisTurn.code(), "NOT_AIS_TURN");
        assert_eq!(
            SessionError::from(IllegalMove::PathBlocked).code(),
            "PATH_BLOCKED"
        );
        assert_eq!(
            SessionError::NotFound(Uuid::nil()).to_string(),
            "session 00000000-0000-0000-0000-000000000000 not found"
        );
    }
}
