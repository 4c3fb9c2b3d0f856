use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Место игрока в комнате.
///
/// Живёт, пока игрок сидит в комнате (а не только в раздаче):
/// создаётся при join, удаляется при leave.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub player_id: PlayerId,
    pub display_name: String,
    /// Стек за столом.
    pub stack: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Ставка на текущей улице.
    pub street_bet: Chips,
    /// Всего внесено в банк за раздачу.
    pub total_bet: Chips,
    /// Участвует в текущей раздаче (не сфолдил).
    pub in_hand: bool,
    pub all_in: bool,
    /// Уже действовал на этой улице.
    pub has_acted: bool,
    /// Временно отключился. Место и карты сохраняются.
    pub disconnected: bool,
}

impl Seat {
    pub fn new(player_id: PlayerId, display_name: String, stack: Chips) -> Self {
        Self {
            player_id,
            display_name,
            stack,
            hole_cards: Vec::new(),
            street_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            in_hand: false,
            all_in: false,
            has_acted: false,
            disconnected: false,
        }
    }

    /// Может ли игрок ещё принимать решения (в раздаче и не в олл-ине).
    pub fn can_act(&self) -> bool {
        self.in_hand && !self.all_in
    }

    /// Сколько нужно доплатить до `current_bet`.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.street_bet)
    }

    /// Должен ли игрок ещё походить на этой улице.
    pub fn needs_to_act(&self, current_bet: Chips) -> bool {
        self.can_act() && (!self.has_acted || self.street_bet < current_bet)
    }

    /// Сброс полей перед новой раздачей.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.street_bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.in_hand = false;
        self.all_in = false;
        self.has_acted = false;
    }

    /// Сброс полей перед новой улицей.
    pub fn reset_for_street(&mut self) {
        self.street_bet = Chips::ZERO;
        self.has_acted = false;
    }

    /// Снять со стека не более `amount` в ставку. Возвращает реально снятое.
    /// Обнулённый стек у игрока в раздаче = олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.street_bet += real;
        self.total_bet += real;
        if self.stack.is_zero() && self.in_hand {
            self.all_in = true;
        }
        real
    }
}

/// Имя по умолчанию: `Player_` + первые 4 символа id.
pub fn default_display_name(player_id: &str) -> String {
    let prefix: String = player_id.chars().take(4).collect();
    format!("Player_{prefix}")
}

/// Пустое имя заменяется именем по умолчанию.
pub fn normalize_display_name(player_id: &str, name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        default_display_name(player_id)
    } else {
        trimmed.to_string()
    }
}
