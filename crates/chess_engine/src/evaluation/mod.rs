//! Position evaluation
//!
//! Scores a board for one side using four independent terms:
//! - Material balance (piece values)
//! - Piece activity (pseudo-legal destination squares)
//! - King safety (safe / exposed / in check)
//! - Center control (occupying or attacking the central squares)
//!
//! The terms are combined into a single centipawn score. Every term is
//! antisymmetric between the two colours, so evaluating the same board from
//! the other side negates the score.
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `king_safety` - King safety classification
//! - `position` - Activity, center control, and the combined evaluation

mod king_safety;
mod material;
mod position;

pub use king_safety::{king_safety, KingSafety};
pub use material::{material_balance, material_of};
pub use position::{center_control, center_squares, evaluate, mobility, EvaluationResult};
