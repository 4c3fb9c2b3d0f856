use thiserror::Error;

use crate::domain::PlayerId;

/// Ошибки движка комнаты. Все восстановимые: отклонённая команда
/// не меняет состояние и сообщается только отправителю.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("сейчас не ход игрока {0}")]
    OutOfTurn(PlayerId),

    #[error("неизвестное действие `{0}`")]
    InvalidAction(String),

    #[error("недопустимая сумма или действие: {0}")]
    IllegalAmount(String),

    #[error("недостаточно фишек: нужно {needed}, есть {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("недостаточно игроков с фишками для старта")]
    NotEnoughPlayers,

    #[error("раздача уже идёт")]
    GameAlreadyInProgress,

    #[error("раздача не активна")]
    NoActiveHand,

    #[error("игрок {0} не участвует в раздаче")]
    NotInHand(PlayerId),

    #[error("игрок {0} не сидит в комнате")]
    UnknownPlayer(PlayerId),

    #[error("все места заняты")]
    RoomFull,

    #[error("комната закрыта")]
    RoomClosed,
}
