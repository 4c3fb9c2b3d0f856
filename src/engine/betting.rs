use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::PlayerId;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Последний агрессор (bet/raise).
    pub last_aggressor: Option<PlayerId>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
        }
    }

    /// Новая улица: ставки обнуляются, минимальный рейз = BB.
    pub fn for_new_street(street: Street, big_blind: Chips) -> Self {
        Self::new(street, Chips::ZERO, big_blind)
    }

    /// Полный bet/raise: новая цель и новый минимальный шаг.
    pub fn on_full_raise(&mut self, player_id: &str, new_bet: Chips, raise_size: Chips) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(player_id.to_string());
    }

    /// Неполный олл-ин рейз: цель растёт, минимальный шаг прежний.
    pub fn on_short_raise(&mut self, player_id: &str, new_bet: Chips) {
        self.current_bet = new_bet;
        self.last_aggressor = Some(player_id.to_string());
    }
}
