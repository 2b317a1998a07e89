//! King safety classification
//!
//! The king zone is the king's square plus its on-board neighbours. A king
//! is `InCheck` when attacked, `Exposed` when two or more enemy pieces bear
//! on its zone (or one does and it has no escape square), and `Safe`
//! otherwise.

use crate::board::Board;
use crate::constants::{KING_EXPOSED_PENALTY, KING_IN_CHECK_PENALTY};
use crate::move_gen::attack::{attacks, is_square_attacked};
use crate::move_gen::shape::KING_OFFSETS;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KingSafety {
    Safe,
    Exposed,
    InCheck,
}

impl KingSafety {
    /// Penalty in centipawns charged to the owning side.
    pub fn penalty(self) -> i32 {
        match self {
            KingSafety::Safe => 0,
            KingSafety::Exposed => KING_EXPOSED_PENALTY,
            KingSafety::InCheck => KING_IN_CHECK_PENALTY,
        }
    }
}

fn king_zone(board: &Board, king: Square) -> Vec<Square> {
    KING_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| king.offset(dr, dc))
        .filter(|sq| board.contains(*sq))
        .collect()
}

/// Classify the safety of `color`'s king. A side without a king is `Safe`.
pub fn king_safety(board: &Board, color: Color) -> KingSafety {
    let Some(king) = board.king_square(color) else {
        return KingSafety::Safe;
    };
    let enemy = color.opponent();

    if is_square_attacked(board, king, enemy) {
        return KingSafety::InCheck;
    }

    let zone = king_zone(board, king);

    let attackers = board
        .pieces_of(enemy)
        .filter(|(from, piece)| {
            zone.iter()
                .any(|target| attacks(board, *piece, *from, *target))
        })
        .count();

    let escapes = zone
        .iter()
        .filter(|sq| !board.piece_at(**sq).is_some_and(|p| p.color == color))
        .filter(|sq| !is_square_attacked(board, **sq, enemy))
        .count();

    if attackers >= 2 || (attackers >= 1 && escapes == 0) {
        KingSafety::Exposed
    } else {
        KingSafety::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_kings_are_safe() {
        let board = Board::standard();
        assert_eq!(king_safety(&board, Color::White), KingSafety::Safe);
        assert_eq!(king_safety(&board, Color::Black), KingSafety::Safe);
    }

    #[test]
    fn test_king_in_check() {
        let board = Board::from_text("k3/4/4/4/R2K b").unwrap();
        assert_eq!(king_safety(&board, Color::Black), KingSafety::InCheck);
        assert_eq!(king_safety(&board, Color::White), KingSafety::Safe);
    }

    #[test]
    fn test_king_exposed_by_two_attackers() {
        // Rook on b-file and queen on row 2 both bear on squares next to the king
        let board = Board::from_text("k3/4/3Q/4/1R1K b").unwrap();
        assert_eq!(king_safety(&board, Color::Black), KingSafety::Exposed);
    }

    #[test]
    fn test_penalties() {
        assert_eq!(KingSafety::Safe.penalty(), 0);
        assert!(KingSafety::InCheck.penalty() > KingSafety::Exposed.penalty());
    }
}
