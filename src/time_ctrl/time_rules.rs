// src/time_ctrl/time_rules.rs
//! Правила тайминга хода. Только конфигурация, без состояния.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Правила тайминга для одной комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Сколько секунд даётся на одно решение.
    pub action_timeout_secs: u64,
}

impl TimeRules {
    pub const fn new(action_timeout_secs: u64) -> Self {
        Self { action_timeout_secs }
    }

    /// Стандартный профиль: 30 сек на ход.
    pub const fn standard() -> Self {
        Self::new(30)
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "action_timeout_secs должен быть > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
