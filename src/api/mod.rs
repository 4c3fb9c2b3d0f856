//! Внешний интерфейс комнаты для коллабораторов (транспорт, лобби).
//!
//! - запросы (commands.rs) – то, что приходит от игрока;
//! - DTO (dto.rs) – per-seat представление состояния;
//! - сборка представлений (queries.rs) – только чтение;
//! - ошибки (errors.rs) – сигнал об отклонённом действии.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
