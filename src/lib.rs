//! Движок карточных комнат реального времени (Texas Hold'em и Blackjack).
//!
//! Слои (снизу вверх):
//!   - `domain` – карты, колода, фишки, места, состояние комнаты;
//!   - `eval` – оценка лучшей 5-карточной руки из 7;
//!   - `engine` – машина ставок Hold'em, учёт мест, шоудаун;
//!   - `time_ctrl` – таймер хода с защитой от устаревших срабатываний;
//!   - `blackjack` – вариант Blackjack;
//!   - `room` – актор комнаты на tokio, рассылка обновлений подписчикам;
//!   - `api` – запросы, per-seat представления, сигнал об отклонении.

pub mod api;
pub mod blackjack;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod room;
pub mod time_ctrl;

pub use api::{ActionRejected, ActionRequest, HoldemView};
pub use blackjack::{BlackjackRoom, BlackjackView};
pub use config::{BlackjackConfig, ConfigError, RoomConfig, Stakes};
pub use engine::{EngineError, RandomSource, RoomEvent};
pub use infra::{DeterministicRng, StackedRng, SystemRng};
pub use room::{CardGame, HoldemRoom, RoomActor, RoomHandle, RoomUpdate};
pub use time_ctrl::TimeRules;
