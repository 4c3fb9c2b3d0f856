use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Категория покерной руки по силе (0 = старшая карта .. 9 = роял-флеш).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        }
    }
}

/// Оценённая рука: категория + ключ тай-брейка + выбранные 5 карт.
///
/// Сравнение (`Ord`, `Eq`) идёт ТОЛЬКО по `(category, tie_break)`:
/// две руки с разными мастями, но одинаковым ключом равны.
/// Ключ – ранги 2..14 в порядке значимости; в стрите-колесе туз = 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    pub tie_break: Vec<u8>,
    pub cards: Vec<Card>,
}

impl EvaluatedHand {
    pub fn new(category: HandCategory, tie_break: Vec<u8>, cards: Vec<Card>) -> Self {
        Self {
            category,
            tie_break,
            cards,
        }
    }

    /// Человекочитаемое описание, например `Full house, Kings full of Nines`.
    pub fn describe(&self) -> String {
        let r = |i: usize| {
            self.tie_break
                .get(i)
                .copied()
                .map(rank_name)
                .unwrap_or("?")
        };
        let p = |i: usize| {
            self.tie_break
                .get(i)
                .copied()
                .map(rank_plural)
                .unwrap_or("?")
        };

        match self.category {
            HandCategory::HighCard => format!("High card, {}", r(0)),
            HandCategory::OnePair => format!("One pair, {}", p(0)),
            HandCategory::TwoPair => format!("Two pair, {} and {}", p(0), p(1)),
            HandCategory::ThreeOfAKind => format!("Three of a kind, {}", p(0)),
            HandCategory::Straight => format!("Straight, {} high", r(0)),
            HandCategory::Flush => format!("Flush, {} high", r(0)),
            HandCategory::FullHouse => format!("Full house, {} full of {}", p(0), p(1)),
            HandCategory::FourOfAKind => format!("Four of a kind, {}", p(0)),
            HandCategory::StraightFlush => format!("Straight flush, {} high", r(0)),
            HandCategory::RoyalFlush => "Royal flush".to_string(),
        }
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.tie_break == other.tie_break
    }
}

impl Eq for EvaluatedHand {}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tie_break.cmp(&other.tie_break))
    }
}

fn rank_name(v: u8) -> &'static str {
    // 1 – туз в колесе
    match v {
        1 | 14 => "Ace",
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Jack",
        12 => "Queen",
        13 => "King",
        _ => "?",
    }
}

fn rank_plural(v: u8) -> &'static str {
    match v {
        1 | 14 => "Aces",
        2 => "Twos",
        3 => "Threes",
        4 => "Fours",
        5 => "Fives",
        6 => "Sixes",
        7 => "Sevens",
        8 => "Eights",
        9 => "Nines",
        10 => "Tens",
        11 => "Jacks",
        12 => "Queens",
        13 => "Kings",
        _ => "?",
    }
}
