use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::{normalize_display_name, Seat};
use crate::domain::Room;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{fold_out_of_turn, HandEngine, HandStatus};

/// Результат join.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Новое место со стартовым стеком.
    Seated { stack: Chips },
    /// Игрок уже сидел: обновлено только имя, флаг отключения снят.
    Rejoined { was_disconnected: bool },
}

/// Результат leave для внешнего слоя лобби.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    /// В комнате никого не осталось – лобби может её удалить.
    RoomEmpty,
}

/// Посадить игрока или обновить данные уже сидящего.
///
/// Повторный join не трогает стек и карты и не возвращает в раздачу
/// уже сброшенную руку.
pub fn join_player(
    room: &mut Room,
    player_id: &str,
    display_name: &str,
) -> Result<JoinOutcome, EngineError> {
    if let Some(seat) = room.seat_mut(player_id) {
        if !display_name.trim().is_empty() {
            seat.display_name = display_name.trim().to_string();
        }
        let was_disconnected = seat.disconnected;
        seat.disconnected = false;
        info!("room {}: {} rejoined", room.id, player_id);
        return Ok(JoinOutcome::Rejoined { was_disconnected });
    }

    if room.is_full() {
        return Err(EngineError::RoomFull);
    }

    let stack = room.config.buy_in;
    let name = normalize_display_name(player_id, display_name);
    room.seats
        .push(Seat::new(player_id.to_string(), name, stack));
    info!(
        "room {}: {} seated with {} ({} seats)",
        room.id,
        player_id,
        stack,
        room.seated_count()
    );
    Ok(JoinOutcome::Seated { stack })
}

/// Временное отключение: место и рука сохраняются, fold не форсируется.
pub fn disconnect_player(room: &mut Room, player_id: &str) -> Result<(), EngineError> {
    let seat = room
        .seat_mut(player_id)
        .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
    seat.disconnected = true;
    info!("room {}: {} disconnected", room.id, player_id);
    Ok(())
}

/// Уход из комнаты: место удаляется целиком.
///
/// Во время раздачи это fold (с передачей хода, если ходил он).
/// Внесённые в банк фишки остаются в банке.
pub fn leave_player(
    room: &mut Room,
    engine: Option<&mut HandEngine>,
    player_id: &str,
) -> Result<(Seat, Option<HandStatus>), EngineError> {
    if room.seat(player_id).is_none() {
        return Err(EngineError::UnknownPlayer(player_id.to_string()));
    }

    let status = engine.and_then(|engine| fold_out_of_turn(room, engine, player_id));

    let idx = room
        .seats
        .iter()
        .position(|s| s.player_id == player_id)
        .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
    let seat = room.seats.remove(idx);
    info!(
        "room {}: {} left with {} ({} seats)",
        room.id,
        player_id,
        seat.stack,
        room.seated_count()
    );
    Ok((seat, status))
}
