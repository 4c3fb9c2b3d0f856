//! Инфраструктура вокруг движка:
//! - генерация ID;
//! - RNG-реализации для колоды.

pub mod ids;
pub mod rng;

pub use ids::IdGenerator;
pub use rng::{DeterministicRng, StackedRng, SystemRng};
