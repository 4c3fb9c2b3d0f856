use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::EngineError;

/// Действие игрока в Blackjack.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackAction {
    /// Основная ставка раунда.
    Bet(Chips),
    /// Решение по страховке: `true` – взять (стоимость = ставка / 2).
    Insurance(bool),
    Hit,
    Stand,
    /// Удвоить ставку, взять ровно одну карту и закончить ход.
    Double,
}

impl BlackjackAction {
    /// `("bet", Some(50))`, `("insurance", Some(1))`, `("hit", None)` ...
    pub fn parse(name: &str, amount: Option<u64>) -> Result<BlackjackAction, EngineError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bet" => match amount {
                Some(a) if a > 0 => Ok(BlackjackAction::Bet(Chips(a))),
                _ => Err(EngineError::IllegalAmount(
                    "для `bet` нужна положительная сумма".into(),
                )),
            },
            "insurance" => match amount {
                Some(1) => Ok(BlackjackAction::Insurance(true)),
                Some(0) | None => Ok(BlackjackAction::Insurance(false)),
                Some(other) => Err(EngineError::IllegalAmount(format!(
                    "insurance принимает 1 (взять) или 0 (отказ), получено {other}"
                ))),
            },
            "hit" => Ok(BlackjackAction::Hit),
            "stand" => Ok(BlackjackAction::Stand),
            "double" => Ok(BlackjackAction::Double),
            _ => Err(EngineError::InvalidAction(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlackjackAction::Bet(_) => "bet",
            BlackjackAction::Insurance(_) => "insurance",
            BlackjackAction::Hit => "hit",
            BlackjackAction::Stand => "stand",
            BlackjackAction::Double => "double",
        }
    }
}
