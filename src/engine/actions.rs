use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::errors::EngineError;

/// Тип действия игрока в Hold'em.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    /// Bet на улице без ставки. Сумма = сколько ставим.
    Bet(Chips),
    /// Raise существующей ставки. Сумма = НОВАЯ общая ставка на улице.
    Raise(Chips),
}

impl ActionKind {
    /// Разбор именованного действия из запроса (`"raise"`, `Some(120)`).
    pub fn parse(name: &str, amount: Option<u64>) -> Result<ActionKind, EngineError> {
        let positive = |kind: &str| match amount {
            Some(a) if a > 0 => Ok(Chips(a)),
            _ => Err(EngineError::IllegalAmount(format!(
                "для `{kind}` нужна положительная сумма"
            ))),
        };

        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" => Ok(ActionKind::Check),
            "call" => Ok(ActionKind::Call),
            "bet" => positive("bet").map(ActionKind::Bet),
            "raise" => positive("raise").map(ActionKind::Raise),
            _ => Err(EngineError::InvalidAction(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet(_) => "bet",
            ActionKind::Raise(_) => "raise",
        }
    }
}
