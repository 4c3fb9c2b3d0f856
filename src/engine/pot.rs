use crate::domain::chips::Chips;
use crate::domain::{PlayerId, Room};

/// Перенести до `amount` фишек из стека игрока в единый банк.
/// Возвращает реально внесённое (меньше, если стек кончился).
pub fn commit_chips(room: &mut Room, player_id: &str, amount: Chips) -> Chips {
    let paid = match room.seat_mut(player_id) {
        Some(seat) => seat.commit(amount),
        None => Chips::ZERO,
    };
    room.pot += paid;
    paid
}

/// Разделить банк между победителями (в порядке хода).
/// Остаток от деления получают первые победители по одной фишке.
pub fn split_pot(pot: Chips, winners: &[PlayerId]) -> Vec<(PlayerId, Chips)> {
    let (share, remainder) = pot.split(winners.len());
    winners
        .iter()
        .enumerate()
        .map(|(i, pid)| {
            let extra = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
            (pid.clone(), share + extra)
        })
        .collect()
}

/// Зачислить выигрыш на стек и списать его из банка.
pub fn award(room: &mut Room, player_id: &str, amount: Chips) {
    if let Some(seat) = room.seat_mut(player_id) {
        seat.stack += amount;
        room.pot -= amount;
    }
}
