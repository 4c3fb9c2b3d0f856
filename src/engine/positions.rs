use crate::domain::chips::Chips;
use crate::domain::{PlayerId, Room};

/// Следующая позиция кнопки в списке игроков с фишками.
/// Первая раздача – индекс 0, дальше `(prev + 1) mod n`.
pub fn next_button(prev: Option<usize>, eligible_count: usize) -> usize {
    if eligible_count == 0 {
        return 0;
    }
    match prev {
        Some(p) => (p + 1) % eligible_count,
        None => 0,
    }
}

/// Порядок мест по кругу, начиная слева от кнопки. Кнопка – последняя.
pub fn rotation_from_button(eligible: &[PlayerId], button: usize) -> Vec<PlayerId> {
    let n = eligible.len();
    (0..n)
        .map(|i| eligible[(button + 1 + i) % n].clone())
        .collect()
}

/// Индексы (small blind, big blind) в ротации.
///
/// Хедз-ап: кнопка (последний в ротации) ставит SB, второй игрок – BB.
/// 3+ игроков: SB слева от кнопки, BB следующий.
pub fn blind_indices(rotation_len: usize) -> (usize, usize) {
    if rotation_len == 2 {
        (1, 0)
    } else {
        (0, 1 % rotation_len.max(1))
    }
}

/// Первый игрок после позиции `after` (по кругу, включая самого `after` в конце),
/// которому ещё нужно действовать.
pub fn next_to_act(
    room: &Room,
    rotation: &[PlayerId],
    after: usize,
    current_bet: Chips,
) -> Option<PlayerId> {
    let n = rotation.len();
    (0..n)
        .map(|i| &rotation[(after + 1 + i) % n])
        .find(|pid| {
            room.seat(pid)
                .map(|s| s.needs_to_act(current_bet))
                .unwrap_or(false)
        })
        .cloned()
}

/// Первый игрок слева от кнопки, которому нужно действовать (постфлоп).
pub fn first_to_act_postflop(
    room: &Room,
    rotation: &[PlayerId],
    current_bet: Chips,
) -> Option<PlayerId> {
    match rotation.len() {
        0 => None,
        n => next_to_act(room, rotation, n - 1, current_bet),
    }
}
