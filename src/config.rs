//! Конфигурация комнат (Hold'em и Blackjack).
//!
//! Все поля имеют значения по умолчанию, поэтому JSON может быть частичным:
//! `{"stakes": {"big_blind": 50}}` – валидный конфиг.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::time_ctrl::TimeRules;

/// Ошибки разбора / валидации конфига.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось разобрать JSON конфига: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("некорректный конфиг: {0}")]
    Invalid(String),
}

/// Блайнды Hold'em-комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Stakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl Default for Stakes {
    fn default() -> Self {
        Self {
            small_blind: Chips(10),
            big_blind: Chips(20),
        }
    }
}

impl Stakes {
    pub fn new(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind: Chips(small_blind),
            big_blind: Chips(big_blind),
        }
    }
}

/// Конфиг Hold'em-комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoomConfig {
    /// Максимум мест (2..=10).
    pub max_seats: u8,
    pub stakes: Stakes,
    /// Стартовый стек при первом входе.
    pub buy_in: Chips,
    /// Минимум игроков с фишками для старта раздачи.
    pub min_players: usize,
    pub time: TimeRules,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_seats: 9,
            stakes: Stakes::default(),
            buy_in: Chips(1000),
            min_players: 2,
            time: TimeRules::default(),
        }
    }
}

impl RoomConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: RoomConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=10).contains(&self.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats должен быть 2..=10, получено {}",
                self.max_seats
            )));
        }
        if self.stakes.big_blind.is_zero() {
            return Err(ConfigError::Invalid("big_blind должен быть > 0".into()));
        }
        if self.stakes.small_blind > self.stakes.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind ({}) больше big_blind ({})",
                self.stakes.small_blind, self.stakes.big_blind
            )));
        }
        if self.buy_in.is_zero() {
            return Err(ConfigError::Invalid("buy_in должен быть > 0".into()));
        }
        if self.min_players < 2 || self.min_players > self.max_seats as usize {
            return Err(ConfigError::Invalid(format!(
                "min_players должен быть 2..={}, получено {}",
                self.max_seats, self.min_players
            )));
        }
        self.time.validate()
    }
}

/// Конфиг Blackjack-комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlackjackConfig {
    pub max_seats: u8,
    pub buy_in: Chips,
    pub min_bet: Chips,
    pub max_bet: Chips,
    pub min_players: usize,
    pub time: TimeRules,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            max_seats: 7,
            buy_in: Chips(1000),
            min_bet: Chips(10),
            max_bet: Chips(500),
            min_players: 1,
            time: TimeRules::default(),
        }
    }
}

impl BlackjackConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: BlackjackConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=10).contains(&self.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats должен быть 1..=10, получено {}",
                self.max_seats
            )));
        }
        if self.min_bet.is_zero() || self.min_bet > self.max_bet {
            return Err(ConfigError::Invalid(format!(
                "нужно 0 < min_bet <= max_bet, получено {}..{}",
                self.min_bet, self.max_bet
            )));
        }
        if self.min_players == 0 || self.min_players > self.max_seats as usize {
            return Err(ConfigError::Invalid(format!(
                "min_players должен быть 1..={}",
                self.max_seats
            )));
        }
        self.time.validate()
    }
}
