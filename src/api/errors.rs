use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Сигнал об отклонённом действии. Уходит только отправителю;
/// состояние комнаты при этом не меняется.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("действие `{action}` отклонено: {reason}")]
pub struct ActionRejected {
    pub action: String,
    /// Машинно-читаемый код (`OutOfTurn`, `IllegalAmount`, ...).
    pub code: String,
    pub reason: String,
}

impl ActionRejected {
    pub fn new(action: impl Into<String>, err: &EngineError) -> Self {
        Self {
            action: action.into(),
            code: error_code(err).to_string(),
            reason: err.to_string(),
        }
    }
}

fn error_code(err: &EngineError) -> &'static str {
    match err {
        EngineError::OutOfTurn(_) => "OutOfTurn",
        EngineError::InvalidAction(_) => "InvalidAction",
        EngineError::IllegalAmount(_) => "IllegalAmount",
        EngineError::InsufficientFunds { .. } => "InsufficientFunds",
        EngineError::NotEnoughPlayers => "NotEnoughPlayers",
        EngineError::GameAlreadyInProgress => "GameAlreadyInProgress",
        EngineError::NoActiveHand => "NoActiveHand",
        EngineError::NotInHand(_) => "NotInHand",
        EngineError::UnknownPlayer(_) => "UnknownPlayer",
        EngineError::RoomFull => "RoomFull",
        EngineError::RoomClosed => "RoomClosed",
    }
}
