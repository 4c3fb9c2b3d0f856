//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate(hole, community) -> Result<EvaluatedHand, EvalError>`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, EvalError};
pub use hand_rank::{EvaluatedHand, HandCategory};
