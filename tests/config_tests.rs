//! Конфиги комнат: частичный JSON, значения по умолчанию, валидация.

use card_room_engine::config::{BlackjackConfig, ConfigError, RoomConfig, Stakes};
use card_room_engine::domain::chips::Chips;
use card_room_engine::time_ctrl::TimeRules;

fn invalid(result: Result<(), ConfigError>) -> bool {
    matches!(result, Err(ConfigError::Invalid(_)))
}

// ===== ТЕСТ 1: Hold'em =====

#[test]
fn holdem_defaults() {
    let cfg = RoomConfig::default();
    assert_eq!(cfg.max_seats, 9);
    assert_eq!(cfg.stakes, Stakes::new(10, 20));
    assert_eq!(cfg.buy_in, Chips(1000));
    assert_eq!(cfg.min_players, 2);
    assert_eq!(cfg.time, TimeRules::standard());
    assert!(cfg.validate().is_ok());
}

#[test]
fn holdem_partial_json_fills_defaults() {
    let cfg = RoomConfig::from_json_str(r#"{"stakes": {"big_blind": 50}}"#).unwrap();
    assert_eq!(cfg.stakes.small_blind, Chips(10));
    assert_eq!(cfg.stakes.big_blind, Chips(50));
    assert_eq!(cfg.max_seats, 9);

    let cfg = RoomConfig::from_json_str(
        r#"{"max_seats": 6, "buy_in": 500, "time": {"action_timeout_secs": 15}}"#,
    )
    .unwrap();
    assert_eq!(cfg.max_seats, 6);
    assert_eq!(cfg.buy_in, Chips(500));
    assert_eq!(cfg.time.action_timeout().as_secs(), 15);

    assert_eq!(RoomConfig::from_json_str("{}").unwrap(), RoomConfig::default());
}

#[test]
fn holdem_validation_errors() {
    let base = RoomConfig::default();

    let cfg = RoomConfig {
        stakes: Stakes::new(30, 20),
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = RoomConfig {
        stakes: Stakes::new(0, 0),
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    for max_seats in [1, 11] {
        let cfg = RoomConfig {
            max_seats,
            ..base.clone()
        };
        assert!(invalid(cfg.validate()), "max_seats {max_seats}");
    }

    let cfg = RoomConfig {
        max_seats: 4,
        min_players: 5,
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = RoomConfig {
        buy_in: Chips::ZERO,
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = RoomConfig {
        time: TimeRules::new(0),
        ..base
    };
    assert!(invalid(cfg.validate()));
}

#[test]
fn from_json_str_validates() {
    let err = RoomConfig::from_json_str(r#"{"stakes": {"small_blind": 100}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn broken_json_is_parse_error() {
    let err = RoomConfig::from_json_str("{max_seats: 6").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = BlackjackConfig::from_json_str(r#"{"min_bet": "ten"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ===== ТЕСТ 2: Blackjack =====

#[test]
fn blackjack_defaults_and_partial_json() {
    let cfg = BlackjackConfig::default();
    assert_eq!(cfg.max_seats, 7);
    assert_eq!(cfg.min_players, 1);
    assert_eq!((cfg.min_bet, cfg.max_bet), (Chips(10), Chips(500)));
    assert!(cfg.validate().is_ok());

    let cfg = BlackjackConfig::from_json_str(r#"{"max_bet": 1000, "max_seats": 3}"#).unwrap();
    assert_eq!(cfg.max_bet, Chips(1000));
    assert_eq!(cfg.max_seats, 3);
    assert_eq!(cfg.buy_in, Chips(1000));
}

#[test]
fn blackjack_validation_errors() {
    let base = BlackjackConfig::default();

    let cfg = BlackjackConfig {
        min_bet: Chips(600),
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = BlackjackConfig {
        min_bet: Chips::ZERO,
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = BlackjackConfig {
        max_seats: 0,
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = BlackjackConfig {
        min_players: 0,
        ..base.clone()
    };
    assert!(invalid(cfg.validate()));

    let cfg = BlackjackConfig {
        time: TimeRules::new(0),
        ..base
    };
    assert!(invalid(cfg.validate()));
}
