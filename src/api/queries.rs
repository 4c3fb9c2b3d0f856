use crate::domain::chips::Chips;
use crate::domain::Room;
use crate::engine::{legal_actions, HandEngine};

use super::dto::{HoldemView, SeatView};

/// Собрать представление комнаты для зрителя `viewer` (`None` – наблюдатель).
///
/// Карманные карты видны владельцу, пока они у него есть, и всем –
/// для мест, вскрытых на последнем шоудауне.
pub fn build_holdem_view(
    room: &Room,
    engine: Option<&HandEngine>,
    viewer: Option<&str>,
) -> HoldemView {
    let seats = room
        .seats
        .iter()
        .map(|s| {
            let is_owner = viewer == Some(s.player_id.as_str());
            let revealed = room.revealed.iter().any(|p| *p == s.player_id);
            let show = !s.hole_cards.is_empty() && (is_owner || revealed);
            SeatView {
                player_id: s.player_id.clone(),
                display_name: s.display_name.clone(),
                stack: s.stack,
                street_bet: s.street_bet,
                total_bet: s.total_bet,
                in_hand: s.in_hand,
                all_in: s.all_in,
                has_acted: s.has_acted,
                disconnected: s.disconnected,
                card_count: s.hole_cards.len(),
                hole_cards: show.then(|| s.hole_cards.clone()),
            }
        })
        .collect();

    // Движок есть только во время раздачи.
    let engine = engine.filter(|_| room.hand_in_progress);
    let (current_bet, min_raise) = engine
        .map(|e| (e.betting.current_bet, e.betting.min_raise))
        .unwrap_or((Chips::ZERO, room.config.stakes.big_blind));
    let current_actor = engine.and_then(|e| e.current_actor.clone());

    let viewer_seat = viewer.and_then(|v| room.seat(v));
    let to_call = viewer_seat
        .filter(|s| s.in_hand)
        .map(|s| s.to_call(current_bet).min(s.stack));
    let legal = match (engine, viewer_seat) {
        (Some(e), Some(seat)) if current_actor.as_deref() == Some(seat.player_id.as_str()) => {
            Some(legal_actions(seat, &e.betting, room.config.stakes.big_blind))
        }
        _ => None,
    };

    HoldemView {
        room_id: room.id,
        viewer: viewer.map(str::to_string),
        hand_in_progress: room.hand_in_progress,
        street: room.street,
        board: room.board.clone(),
        pot: room.pot,
        current_bet,
        min_raise,
        small_blind: room.config.stakes.small_blind,
        big_blind: room.config.stakes.big_blind,
        button: room.button_player.clone(),
        current_actor,
        seats,
        to_call,
        legal_actions: legal,
    }
}
