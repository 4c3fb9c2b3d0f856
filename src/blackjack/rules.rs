//! Правила Blackjack: очки руки, натуральный блэкджек, выплаты.

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;

/// Дилер добирает, пока очков меньше этого порога.
pub const DEALER_STANDS_ON: u8 = 17;
pub const BLACKJACK: u8 = 21;

/// Очки одной карты (туз считается как 1, мягкость учитывает `hand_value`).
pub fn card_points(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 1,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        other => other.value(),
    }
}

/// Лучшие очки руки: туз = 11, если это не даёт перебор, иначе 1.
pub fn hand_value(cards: &[Card]) -> u8 {
    let hard: u32 = cards.iter().map(|c| card_points(c.rank) as u32).sum();
    let has_ace = cards.iter().any(|c| c.rank == Rank::Ace);
    let best = if has_ace && hard + 10 <= BLACKJACK as u32 {
        hard + 10
    } else {
        hard
    };
    best.min(u8::MAX as u32) as u8
}

/// Натуральный блэкджек: ровно две карты, туз + десятка.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > BLACKJACK
}

/// Итог руки игрока против дилера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    /// Натуральный блэкджек, выплата 3:2.
    Blackjack,
    Win,
    Push,
    Lose,
    Bust,
}

/// Определить итог руки. `player` и `dealer` – полные руки.
pub fn judge(player: &[Card], dealer: &[Card]) -> HandOutcome {
    let player_natural = is_natural(player);
    let dealer_natural = is_natural(dealer);

    if is_bust(player) {
        return HandOutcome::Bust;
    }
    match (player_natural, dealer_natural) {
        (true, true) => return HandOutcome::Push,
        (true, false) => return HandOutcome::Blackjack,
        (false, true) => return HandOutcome::Lose,
        (false, false) => {}
    }
    if is_bust(dealer) {
        return HandOutcome::Win;
    }

    let (p, d) = (hand_value(player), hand_value(dealer));
    match p.cmp(&d) {
        std::cmp::Ordering::Greater => HandOutcome::Win,
        std::cmp::Ordering::Equal => HandOutcome::Push,
        std::cmp::Ordering::Less => HandOutcome::Lose,
    }
}

/// Сколько фишек вернуть на стек за основную ставку (ставка уже списана).
pub fn payout(outcome: HandOutcome, bet: Chips) -> Chips {
    match outcome {
        // 3:2, дробная часть отбрасывается
        HandOutcome::Blackjack => bet + Chips(bet.0 * 3 / 2),
        HandOutcome::Win => bet + bet,
        HandOutcome::Push => bet,
        HandOutcome::Lose | HandOutcome::Bust => Chips::ZERO,
    }
}

/// Возврат по страховке: 2:1 плюс сама ставка, если у дилера натуральный.
pub fn insurance_payout(insurance_bet: Chips, dealer: &[Card]) -> Chips {
    if is_natural(dealer) {
        Chips(insurance_bet.0 * 3)
    } else {
        Chips::ZERO
    }
}
