use std::collections::HashSet;

use thiserror::Error;

use crate::domain::card::{Card, Rank};

use super::hand_rank::{EvaluatedHand, HandCategory};
use super::lookup_tables::{detect_straight, rank_to_bit, straight_tie_break, RankMask};

/// Нарушение контракта `evaluate`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("нужно ровно 2 карманные карты, получено {0}")]
    WrongHoleCount(usize),

    #[error("общих карт не может быть больше 5, получено {0}")]
    TooManyCommunityCards(usize),

    #[error("карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Лучшая 5-карточная рука из 2 карманных + 0..=5 общих карт.
///
/// Перебираются все 5-карточные подмножества (21 для 7 карт), максимум
/// берётся по `Ord` для `EvaluatedHand`. Вход сначала сортируется,
/// поэтому результат (включая выбранные карты) не зависит от порядка карт.
/// Если карт меньше пяти, оцениваются все имеющиеся карты.
pub fn evaluate(hole: &[Card], community: &[Card]) -> Result<EvaluatedHand, EvalError> {
    if hole.len() != 2 {
        return Err(EvalError::WrongHoleCount(hole.len()));
    }
    if community.len() > 5 {
        return Err(EvalError::TooManyCommunityCards(community.len()));
    }

    let mut all_cards: Vec<Card> = Vec::with_capacity(hole.len() + community.len());
    let mut seen = HashSet::new();
    for &card in hole.iter().chain(community.iter()) {
        if !seen.insert(card) {
            return Err(EvalError::DuplicateCard(card));
        }
        all_cards.push(card);
    }

    // Каноничный порядок: по убыванию ранга, затем по масти.
    all_cards.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| b.suit.cmp(&a.suit)));

    if all_cards.len() <= 5 {
        return Ok(evaluate_cards(&all_cards));
    }

    Ok(best_of_all_5card_combinations(&all_cards))
}

/// Перебор всех C(n, 5) комбинаций (n = 6..=7), берём строгий максимум.
fn best_of_all_5card_combinations(cards: &[Card]) -> EvaluatedHand {
    let n = cards.len();
    let mut best: Option<EvaluatedHand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let hand = evaluate_cards(&five);
                        if best.as_ref().map_or(true, |cur| hand > *cur) {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }

    // n >= 6, значит хотя бы одна комбинация есть
    best.unwrap_or_else(|| evaluate_cards(&cards[..5]))
}

/// Оценка набора из не более чем 5 карт, отсортированных по убыванию ранга.
/// Стрит и флеш возможны только при ровно 5 картах.
fn evaluate_cards(cards: &[Card]) -> EvaluatedHand {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;

    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let five = cards.len() == 5;
    let is_flush = five && suit_counts.iter().any(|&c| c == 5);
    let straight_high = if five && rank_mask.count_ones() == 5 {
        detect_straight(rank_mask)
    } else {
        None
    };

    // (count, rank) по убыванию количества, затем ранга.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let group_ranks: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let chosen = cards.to_vec();

    if let (true, Some(high)) = (is_flush, straight_high) {
        let category = if high == Rank::Ace.value() {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return EvaluatedHand::new(category, straight_tie_break(high), chosen);
    }

    let category = match pattern.as_slice() {
        [4, ..] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        [3, ..] => HandCategory::ThreeOfAKind,
        [2, 2, ..] => HandCategory::TwoPair,
        [2, ..] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    let tie_break = match (category, straight_high) {
        (HandCategory::Straight, Some(high)) => straight_tie_break(high),
        // флеш и старшая карта: все ранги по убыванию
        (HandCategory::Flush, _) | (HandCategory::HighCard, _) => {
            cards.iter().map(|c| c.rank.value()).collect()
        }
        // каре [q, k], фулл-хаус [t, p], сет [t, k1, k2], две пары [hi, lo, k], пара [p, k1, k2, k3]
        _ => group_ranks,
    };

    EvaluatedHand::new(category, tie_break, chosen)
}
