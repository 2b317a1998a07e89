//! Game state queries
//!
//! Decides whether the side to move is checkmated, stalemated, or still
//! playing.

use crate::board::Board;
use crate::move_gen::{has_legal_move, is_in_check};
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Get current game state (playing, checkmate, stalemate)
pub fn game_status(board: &Board) -> GameStatus {
    if has_legal_move(board) {
        return GameStatus::Ongoing;
    }

    let side = board.side_to_move();
    if is_in_check(board, side) {
        GameStatus::Checkmate {
            winner: side.opponent(),
        }
    } else {
        GameStatus::Stalemate
    }
}
