//! Alpha-beta search with negamax
//!
//! Scores are always from the point of view of the side to move at the node.
//! A side with no legal moves scores `-MATE_SCORE + ply` when in check and
//! `DRAW_SCORE` otherwise. Once the deadline passes, every frame unwinds
//! immediately and the partial result is discarded by the caller.

use super::ordering::order_moves;
use crate::board::Board;
use crate::constants::*;
use crate::evaluation::evaluate;
use crate::move_gen::{has_legal_move, is_in_check, legal_moves};
use crate::types::*;
use web_time::Instant;

/// Per-search bookkeeping shared by every node.
pub(crate) struct SearchContext {
    deadline: Instant,
    pub nodes: u64,
    pub aborted: bool,
}

impl SearchContext {
    pub fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            nodes: 0,
            aborted: false,
        }
    }

    /// Count a node and poll the clock every `DEADLINE_CHECK_INTERVAL` nodes.
    #[inline]
    fn tick(&mut self) -> bool {
        self.nodes += 1;
        if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= self.deadline {
            self.aborted = true;
        }
        self.aborted
    }
}

/// Result of one fully completed root iteration.
#[derive(Debug, Clone)]
pub(crate) struct RootResult {
    pub best_move: Move,
    pub score: i32,
    /// Exact score of every root move; only filled for full-window searches
    pub scored: Vec<(Move, i32)>,
}

fn terminal_score(board: &Board, ply: u32) -> i32 {
    if is_in_check(board, board.side_to_move()) {
        -MATE_SCORE + ply as i32
    } else {
        DRAW_SCORE
    }
}

/// Negamax with alpha-beta pruning.
pub(crate) fn alphabeta(
    board: &Board,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    if ctx.tick() {
        return 0;
    }

    if depth == 0 {
        if !has_legal_move(board) {
            return terminal_score(board, ply);
        }
        return evaluate(board, board.side_to_move()).score;
    }

    let mut moves = legal_moves(board);
    if moves.is_empty() {
        return terminal_score(board, ply);
    }
    order_moves(board, &mut moves);

    let mut best = -INFINITY;
    for mv in &moves {
        let child = board.with_move(mv);
        let score = -alphabeta(&child, depth - 1, ply + 1, -beta, -alpha, ctx);
        if ctx.aborted {
            return 0;
        }

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Search every root move to `depth`.
///
/// With `full_window` each root move gets an exact score (needed to find
/// all moves tied with the best); otherwise the root narrows alpha as it
/// goes. The first move wins ties either way. Returns `None` when the
/// deadline interrupted the iteration.
pub(crate) fn search_root(
    board: &Board,
    moves: &[Move],
    depth: u32,
    full_window: bool,
    ctx: &mut SearchContext,
) -> Option<RootResult> {
    let mut alpha = -INFINITY;
    let mut best: Option<(Move, i32)> = None;
    let mut scored = Vec::new();

    for mv in moves {
        let child = board.with_move(mv);
        let window_alpha = if full_window { -INFINITY } else { alpha };
        let score = -alphabeta(&child, depth - 1, 1, -INFINITY, -window_alpha, ctx);
        if ctx.aborted {
            return None;
        }

        if full_window {
            scored.push((*mv, score));
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((*mv, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    best.map(|(best_move, score)| RootResult {
        best_move,
        score,
        scored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[test]
    fn test_mated_side_scores_mate() {
        let board = Board::from_text("k2R/4/1K2/4/4 b").unwrap();
        let mut ctx = SearchContext::new(far_deadline());
        assert_eq!(alphabeta(&board, 2, 0, -INFINITY, INFINITY, &mut ctx), -MATE_SCORE);
    }

    #[test]
    fn test_stalemate_scores_draw() {
        let board = Board::from_text("k3/2Q1/4/4/3K b").unwrap();
        let mut ctx = SearchContext::new(far_deadline());
        assert_eq!(alphabeta(&board, 3, 0, -INFINITY, INFINITY, &mut ctx), DRAW_SCORE);
    }

    #[test]
    fn test_full_window_matches_pruned_best() {
        let board = Board::from_text("k3/4/q3/4/R2K w").unwrap();
        let moves = legal_moves(&board);

        let mut ctx = SearchContext::new(far_deadline());
        let pruned = search_root(&board, &moves, 2, false, &mut ctx).unwrap();
        let mut ctx = SearchContext::new(far_deadline());
        let full = search_root(&board, &moves, 2, true, &mut ctx).unwrap();

        assert_eq!(pruned.best_move, full.best_move);
        assert_eq!(pruned.score, full.score);
        assert_eq!(full.scored.len(), moves.len());
        assert!(pruned.scored.is_empty());
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let board = Board::standard();
        let moves = legal_moves(&board);
        let mut ctx = SearchContext::new(Instant::now());
        assert!(search_root(&board, &moves, 4, false, &mut ctx).is_none());
        assert!(ctx.aborted);
    }
}
