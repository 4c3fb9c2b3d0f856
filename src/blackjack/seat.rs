use serde::{Deserialize, Serialize};

use crate::blackjack::rules::{hand_value, is_bust, is_natural};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Место за Blackjack-столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackSeat {
    pub player_id: PlayerId,
    pub display_name: String,
    pub stack: Chips,
    pub hand: Vec<Card>,
    /// Основная ставка, уже списанная со стека.
    pub bet: Chips,
    /// Участвует в текущем раунде.
    pub in_round: bool,
    pub has_bet: bool,
    /// Решение по страховке (`None` – ещё не принято или не предлагалась).
    pub insurance: Option<bool>,
    pub insurance_bet: Chips,
    pub doubled: bool,
    /// Ход закончен: stand, double, перебор или натуральный блэкджек.
    pub finished: bool,
    pub disconnected: bool,
}

impl BlackjackSeat {
    pub fn new(player_id: PlayerId, display_name: String, stack: Chips) -> Self {
        Self {
            player_id,
            display_name,
            stack,
            hand: Vec::new(),
            bet: Chips::ZERO,
            in_round: false,
            has_bet: false,
            insurance: None,
            insurance_bet: Chips::ZERO,
            doubled: false,
            finished: false,
            disconnected: false,
        }
    }

    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.bet = Chips::ZERO;
        self.in_round = false;
        self.has_bet = false;
        self.insurance = None;
        self.insurance_bet = Chips::ZERO;
        self.doubled = false;
        self.finished = false;
    }

    pub fn total(&self) -> u8 {
        hand_value(&self.hand)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.hand)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.hand)
    }

    /// Ждёт ли игрок своего хода.
    pub fn awaits_turn(&self) -> bool {
        self.in_round && !self.finished
    }
}
