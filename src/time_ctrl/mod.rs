// src/time_ctrl/mod.rs
//! Контроль времени хода.
//!
//! - `TimeRules` – сколько секунд на решение;
//! - `TurnTimer` – какой таймер сейчас взведён и какие срабатывания устарели.
//!
//! Сам сон (`tokio::time::sleep`) живёт в акторе комнаты, здесь только учёт.

pub mod clock;
pub mod time_rules;

pub use clock::{TimerTicket, TurnTimer};
pub use time_rules::TimeRules;
