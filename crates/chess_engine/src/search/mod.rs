//! Alpha-beta search with iterative deepening
//!
//! This module implements the opponent AI using:
//! - Negamax variant of alpha-beta pruning (recursive; depths stay small)
//! - Iterative deepening for time management
//! - Move ordering for better pruning
//!
//! Every move searched comes from [`crate::move_gen::legal_moves`], so the
//! engine never proposes a move the validator would reject.
//!
//! ## Module Organization
//!
//! - `difficulty` - Difficulty levels and their depth limits
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `ordering` - Move ordering heuristics
//! - `iterative` - Iterative deepening wrapper, deadline handling, fallback

mod alphabeta;
mod difficulty;
mod iterative;
mod ordering;

pub use difficulty::Difficulty;
pub use iterative::{best_move, find_best_move, SearchParams, SearchReport};
