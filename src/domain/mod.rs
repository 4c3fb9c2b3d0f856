//! Доменная модель комнаты: карты, колода, фишки, места, улицы, результаты раздачи.
//!
//! Здесь только данные и простые инварианты. Логика ставок живёт в `engine`.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod room;
pub mod seat;

/// Стабильный идентификатор игрока. Приходит снаружи (слой аутентификации),
/// для движка это непрозрачная строка.
pub type PlayerId = String;
pub type RoomId = u64;
pub type HandId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use room::*;
pub use seat::*;
