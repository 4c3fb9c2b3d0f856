use serde::{Deserialize, Serialize};

use crate::blackjack::BlackjackAction;
use crate::domain::PlayerId;
use crate::engine::{ActionKind, EngineError};

/// Именованное действие от игрока: `{"action": "raise", "amount": 120}`.
///
/// Для `raise` сумма – новая общая ставка на улице, а не прибавка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub amount: Option<u64>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, amount: Option<u64>) -> Self {
        Self {
            action: action.into(),
            amount,
        }
    }

    /// Разобрать в действие Hold'em.
    pub fn to_holdem(&self) -> Result<ActionKind, EngineError> {
        ActionKind::parse(&self.action, self.amount)
    }

    /// Разобрать в действие Blackjack.
    pub fn to_blackjack(&self) -> Result<BlackjackAction, EngineError> {
        BlackjackAction::parse(&self.action, self.amount)
    }
}

/// Запрос на посадку (или повторный вход).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinRequest {
    pub player_id: PlayerId,
    #[serde(default)]
    pub display_name: String,
}
