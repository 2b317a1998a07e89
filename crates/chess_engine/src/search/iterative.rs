//! Iterative deepening search
//!
//! Searches depth 1, 2, ... up to the difficulty's limit, keeping the result
//! of the deepest iteration that finished before the deadline. The search
//! yields to the executor between iterations only; a single iteration runs
//! to completion or to the deadline, so async callers should drive it from
//! a blocking thread.

use super::alphabeta::{search_root, RootResult, SearchContext};
use super::difficulty::Difficulty;
use super::ordering::order_moves;
use crate::board::Board;
use crate::constants::*;
use crate::evaluation::material_balance;
use crate::move_gen::legal_moves;
use crate::types::*;
use futures_lite::future::yield_now;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use web_time::Instant;

/// Inputs of a single search.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub difficulty: Difficulty,
    /// Hard wall-clock bound for the search
    pub deadline: Instant,
    /// Moves scoring within this many centipawns of the best count as tied
    pub tie_epsilon: i32,
}

impl SearchParams {
    pub fn new(difficulty: Difficulty, budget: Duration) -> Self {
        Self {
            difficulty,
            deadline: Instant::now() + budget,
            tie_epsilon: DEFAULT_TIE_EPSILON,
        }
    }

    pub fn with_tie_epsilon(mut self, tie_epsilon: i32) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }
}

/// Outcome of [`find_best_move`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score of `best_move` for the side to move, in centipawns
    pub score: i32,
    /// Deepest fully completed iteration; 0 when the fallback was used
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// True when no iteration completed and the material fallback was used
    pub fallback: bool,
}

/// Find the best move for the side to move.
///
/// Returns `None` only when the side to move has no legal move (checkmate or
/// stalemate). If the deadline passes before depth 1 completes the engine
/// logs a warning and falls back to the move with the best immediate
/// material balance.
///
/// # Examples
///
/// ```
/// use minichess_engine::{find_best_move, Board, Difficulty, SearchParams};
/// use rand::SeedableRng;
/// use std::time::Duration;
///
/// let board = Board::standard();
/// let params = SearchParams::new(Difficulty::Easy, Duration::from_secs(2));
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let report = futures_lite::future::block_on(find_best_move(&board, &params, &mut rng));
/// assert!(report.is_some());
/// ```
pub async fn find_best_move<R: Rng + ?Sized>(
    board: &Board,
    params: &SearchParams,
    rng: &mut R,
) -> Option<SearchReport> {
    let start = Instant::now();
    let generated = legal_moves(board);
    if generated.is_empty() {
        return None;
    }

    let mut ordered = generated.clone();
    order_moves(board, &mut ordered);

    let randomize = params.difficulty.randomizes_ties();
    let mut ctx = SearchContext::new(params.deadline);
    let mut completed: Option<(RootResult, u32)> = None;

    for depth in 1..=params.difficulty.max_depth() {
        if Instant::now() >= params.deadline {
            break;
        }

        let Some(result) = search_root(board, &ordered, depth, randomize, &mut ctx) else {
            debug!(depth, nodes = ctx.nodes, "search interrupted by deadline");
            break;
        };

        debug!(
            depth,
            score = result.score,
            best = %result.best_move,
            nodes = ctx.nodes,
            "search depth complete"
        );

        let decided = result.score.abs() >= MATE_THRESHOLD;
        completed = Some((result, depth));
        if decided {
            break;
        }

        yield_now().await;
    }

    let elapsed = start.elapsed();
    match completed {
        Some((result, depth)) => {
            let best_move = if randomize {
                pick_near_best(&result, params.tie_epsilon, rng)
            } else {
                result.best_move
            };
            Some(SearchReport {
                best_move,
                score: result.score,
                depth,
                nodes: ctx.nodes,
                elapsed,
                fallback: false,
            })
        }
        None => {
            let (best_move, material) = material_fallback(board, &generated)?;
            warn!(
                nodes = ctx.nodes,
                elapsed_ms = elapsed.as_millis() as u64,
                fallback = %best_move,
                "deadline expired before depth 1 completed; using material fallback"
            );
            Some(SearchReport {
                best_move,
                score: MATERIAL_WEIGHT * material,
                depth: 0,
                nodes: ctx.nodes,
                elapsed,
                fallback: true,
            })
        }
    }
}

/// Uniform choice among the root moves scoring within `epsilon` of the best.
fn pick_near_best<R: Rng + ?Sized>(result: &RootResult, epsilon: i32, rng: &mut R) -> Move {
    let threshold = result.score.saturating_sub(epsilon.max(0));
    let tied: Vec<Move> = result
        .scored
        .iter()
        .filter(|(_, score)| *score >= threshold)
        .map(|(mv, _)| *mv)
        .collect();

    tied.choose(rng).copied().unwrap_or(result.best_move)
}

/// Legal move with the best material balance after it is played; the first
/// in generation order wins ties.
fn material_fallback(board: &Board, moves: &[Move]) -> Option<(Move, i32)> {
    let side = board.side_to_move();
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let balance = material_balance(&board.with_move(mv), side);
        if best.is_none_or(|(_, best_balance)| balance > best_balance) {
            best = Some((*mv, balance));
        }
    }

    best
}

/// Best move for the side to move within `deadline`, breaking Easy ties
/// with OS entropy.
pub async fn best_move(board: &Board, difficulty: Difficulty, deadline: Instant) -> Option<Move> {
    let params = SearchParams {
        difficulty,
        deadline,
        tie_epsilon: DEFAULT_TIE_EPSILON,
    };
    let mut rng = StdRng::from_os_rng();
    find_best_move(board, &params, &mut rng)
        .await
        .map(|report| report.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use futures_lite::future::block_on;

    fn params(difficulty: Difficulty) -> SearchParams {
        SearchParams::new(difficulty, Duration::from_secs(30))
    }

    #[test]
    fn test_finds_mate_in_one() {
        let board = Board::from_text("k3/4/1K2/4/3R w").unwrap();
        let mate = Move::new(Square::new(4, 3), Square::new(0, 3));

        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let mut rng = StdRng::seed_from_u64(3);
            let report = block_on(find_best_move(&board, &params(difficulty), &mut rng)).unwrap();
            assert_eq!(report.best_move, mate, "{}", difficulty);
            assert!(report.score >= MATE_THRESHOLD);
            assert!(!report.fallback);
        }
    }

    #[test]
    fn test_takes_hanging_queen() {
        let board = Board::from_text("k3/4/q3/4/R2K w").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let report = block_on(find_best_move(&board, &params(Difficulty::Medium), &mut rng)).unwrap();
        assert_eq!(
            report.best_move,
            Move::new(Square::new(4, 0), Square::new(2, 0))
        );
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mated = Board::from_text("k2R/4/1K2/4/4 b").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(block_on(find_best_move(&mated, &params(Difficulty::Hard), &mut rng)).is_none());
    }

    #[test]
    fn test_expired_deadline_falls_back_to_material() {
        let board = Board::from_text("k3/4/q3/4/R2K w").unwrap();
        let params = SearchParams {
            difficulty: Difficulty::Hard,
            deadline: Instant::now(),
            tie_epsilon: DEFAULT_TIE_EPSILON,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let report = block_on(find_best_move(&board, &params, &mut rng)).unwrap();

        assert!(report.fallback);
        assert_eq!(report.depth, 0);
        assert_eq!(validate(&board, &report.best_move), Ok(()));
        assert_eq!(
            report.best_move,
            Move::new(Square::new(4, 0), Square::new(2, 0))
        );
    }

    #[test]
    fn test_deadline_cuts_deep_search_short() {
        // Open 8x8 position: far too wide for a full Hard search in the budget
        let board = Board::from_text("rnbqkbnr/8/8/8/8/8/8/RNBQKBNR w").unwrap();
        let budget = Duration::from_millis(400);
        let params = SearchParams::new(Difficulty::Hard, budget);
        let mut rng = StdRng::seed_from_u64(0);

        let started = Instant::now();
        let report = block_on(find_best_move(&board, &params, &mut rng)).unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed <= budget + Duration::from_millis(300), "took {:?}", elapsed);
        assert!(!report.fallback);
        assert!(report.depth >= 1);
        assert!(report.depth < Difficulty::Hard.max_depth());
        assert_eq!(validate(&board, &report.best_move), Ok(()));
    }

    #[test]
    fn test_deterministic_difficulties_repeat() {
        let board = Board::standard();
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let mut first_rng = StdRng::seed_from_u64(1);
            let mut second_rng = StdRng::seed_from_u64(2);
            let first = block_on(find_best_move(&board, &params(difficulty), &mut first_rng)).unwrap();
            let second = block_on(find_best_move(&board, &params(difficulty), &mut second_rng)).unwrap();
            assert_eq!(first.best_move, second.best_move);
            assert_eq!(first.score, second.score);
        }
    }

    #[test]
    fn test_seeded_easy_is_reproducible() {
        let board = Board::standard();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = block_on(find_best_move(&board, &params(Difficulty::Easy), &mut a)).unwrap();
        let second = block_on(find_best_move(&board, &params(Difficulty::Easy), &mut b)).unwrap();
        assert_eq!(first.best_move, second.best_move);
    }

    #[test]
    fn test_easy_only_picks_near_best_moves() {
        let result = RootResult {
            best_move: Move::new(Square::new(3, 0), Square::new(2, 0)),
            score: 50,
            scored: vec![
                (Move::new(Square::new(3, 0), Square::new(2, 0)), 50),
                (Move::new(Square::new(3, 1), Square::new(2, 1)), 45),
                (Move::new(Square::new(3, 2), Square::new(2, 2)), -200),
            ],
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let mv = pick_near_best(&result, 10, &mut rng);
            assert_ne!(mv, Move::new(Square::new(3, 2), Square::new(2, 2)));
        }
        assert_eq!(pick_near_best(&result, 0, &mut rng), result.best_move);
    }

    #[test]
    fn test_ai_never_plays_illegal_moves() {
        let mut rng = StdRng::seed_from_u64(2024);
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let mut board = Board::standard();
            for _ in 0..16 {
                let Some(report) = block_on(find_best_move(
                    &board,
                    &SearchParams::new(difficulty, Duration::from_secs(5)),
                    &mut rng,
                )) else {
                    break;
                };
                assert_eq!(validate(&board, &report.best_move), Ok(()));
                board.apply_move(&report.best_move);
            }
        }
    }

    #[test]
    fn test_best_move_convenience() {
        let board = Board::from_text("k3/4/1K2/4/3R w").unwrap();
        let deadline = Instant::now() + Duration::from_secs(30);
        let mv = block_on(best_move(&board, Difficulty::Medium, deadline));
        assert_eq!(mv, Some(Move::new(Square::new(4, 3), Square::new(0, 3))));
    }
}
