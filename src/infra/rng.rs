use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::domain::card::Card;
use crate::engine::RandomSource;

/// Боевой RNG: thread-local генератор `rand`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut Vec<Card>) {
        cards.shuffle(&mut thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed – одинаковые раздачи.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle(&mut self, cards: &mut Vec<Card>) {
        cards.shuffle(&mut self.inner);
    }
}

/// "Подтасованная" колода для сценарных тестов.
///
/// Карты из `top` выходят первыми в заданном порядке (`top[0]` – первая
/// сданная карта), остальная колода идёт в стандартном порядке.
#[derive(Clone, Debug, Default)]
pub struct StackedRng {
    top: Vec<Card>,
}

impl StackedRng {
    pub fn new(top: Vec<Card>) -> Self {
        Self { top }
    }

    /// Колода под Hold'em: `hole[i]` – карты i-го игрока в порядке хода
    /// (слева от кнопки), затем 5 карт борда.
    pub fn holdem(hole: &[[Card; 2]], board: &[Card]) -> Self {
        let mut top = Vec::with_capacity(hole.len() * 2 + board.len());
        for round in 0..2 {
            for cards in hole {
                top.push(cards[round]);
            }
        }
        top.extend_from_slice(board);
        Self { top }
    }
}

impl RandomSource for StackedRng {
    fn shuffle(&mut self, cards: &mut Vec<Card>) {
        cards.retain(|c| !self.top.contains(c));
        // Верх колоды – конец вектора.
        cards.extend(self.top.iter().rev().copied());
    }
}
