//! Комната как актор: один владелец состояния на комнату,
//! сериализованная очередь команд и таймеров.

pub mod actor;
pub mod game;
pub mod holdem;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use game::CardGame;
pub use holdem::HoldemRoom;
pub use messages::{Reply, RoomMessage, RoomUpdate};
