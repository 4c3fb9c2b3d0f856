use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId};
use crate::eval::EvaluatedHand;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица. После ривера – шоудаун.
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Сколько общих карт открывается при переходе НА эту улицу.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Как закончилась раздача.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WinReason {
    /// Все, кроме одного, сбросили карты.
    LastStanding,
    Showdown,
}

/// Оценка руки одного игрока на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownEntry {
    pub player_id: PlayerId,
    pub hole_cards: Vec<Card>,
    pub hand: EvaluatedHand,
    pub description: String,
}

/// Победитель (или один из победителей при сплите).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerInfo {
    pub player_id: PlayerId,
    pub display_name: String,
    pub amount: Chips,
    /// Открытые карты – только для шоудауна.
    pub hole_cards: Option<Vec<Card>>,
    pub best_hand: Option<EvaluatedHand>,
    pub description: Option<String>,
}

/// Итог раздачи для коллабораторов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub hand_id: HandId,
    pub reason: WinReason,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub winners: Vec<WinnerInfo>,
    /// Все руки, дошедшие до вскрытия (пусто при LastStanding).
    pub showdown: Vec<ShowdownEntry>,
}

impl HandResult {
    pub fn total_awarded(&self) -> Chips {
        self.winners.iter().map(|w| w.amount).sum()
    }

    pub fn amount_for(&self, player_id: &str) -> Chips {
        self.winners
            .iter()
            .filter(|w| w.player_id == player_id)
            .map(|w| w.amount)
            .sum()
    }
}
