//! Завершение раздачи: единственный оставшийся игрок или вскрытие.
//!
//! Банк всегда один: олл-ины разной глубины разыгрываются против всего банка
//! (сайд-потов нет), поэтому короткий олл-ин может выиграть больше,
//! чем по классическим правилам.

use log::{info, warn};

use crate::domain::hand::{HandResult, ShowdownEntry, WinReason, WinnerInfo};
use crate::domain::{PlayerId, Room};
use crate::engine::game_loop::HandEngine;
use crate::engine::pot::{award, split_pot};
use crate::eval::evaluate;

/// Все, кроме одного, сбросили: банк целиком ему, карты не открываются.
pub fn finish_last_standing(room: &mut Room, engine: &HandEngine) -> HandResult {
    let pot = room.pot;
    let mut winners = Vec::new();

    let survivor = room
        .seats
        .iter()
        .find(|s| s.in_hand)
        .map(|s| (s.player_id.clone(), s.display_name.clone()));

    match survivor {
        Some((player_id, display_name)) => {
            award(room, &player_id, pot);
            info!(
                "hand {}: {} wins {} uncontested",
                engine.hand_id, player_id, pot
            );
            winners.push(WinnerInfo {
                player_id,
                display_name,
                amount: pot,
                hole_cards: None,
                best_hand: None,
                description: None,
            });
        }
        None => warn!("hand {}: no seat left in hand, pot {} unclaimed", engine.hand_id, pot),
    }

    room.revealed.clear();

    HandResult {
        hand_id: engine.hand_id,
        reason: WinReason::LastStanding,
        board: room.board.clone(),
        pot,
        winners,
        showdown: Vec::new(),
    }
}

/// Вскрытие: оцениваем каждого оставшегося, делим банк между лучшими.
/// Порядок победителей (и получателей остатка) – порядок хода от кнопки.
pub fn finish_showdown(room: &mut Room, engine: &HandEngine) -> HandResult {
    let pot = room.pot;

    let mut entries: Vec<ShowdownEntry> = Vec::new();
    for pid in &engine.rotation {
        let Some(seat) = room.seat(pid) else { continue };
        if !seat.in_hand {
            continue;
        }
        match evaluate(&seat.hole_cards, &room.board) {
            Ok(hand) => entries.push(ShowdownEntry {
                player_id: seat.player_id.clone(),
                hole_cards: seat.hole_cards.clone(),
                description: hand.describe(),
                hand,
            }),
            Err(e) => warn!("hand {}: cannot evaluate {}: {e}", engine.hand_id, pid),
        }
    }

    let best = entries.iter().map(|e| &e.hand).max().cloned();
    let winner_ids: Vec<PlayerId> = match &best {
        Some(best) => entries
            .iter()
            .filter(|e| e.hand == *best)
            .map(|e| e.player_id.clone())
            .collect(),
        None => Vec::new(),
    };

    let mut winners = Vec::new();
    for (player_id, amount) in split_pot(pot, &winner_ids) {
        award(room, &player_id, amount);
        let entry = entries.iter().find(|e| e.player_id == player_id);
        let display_name = room
            .seat(&player_id)
            .map(|s| s.display_name.clone())
            .unwrap_or_default();
        winners.push(WinnerInfo {
            player_id,
            display_name,
            amount,
            hole_cards: entry.map(|e| e.hole_cards.clone()),
            best_hand: entry.map(|e| e.hand.clone()),
            description: entry.map(|e| e.description.clone()),
        });
    }

    if winners.is_empty() && !pot.is_zero() {
        warn!("hand {}: showdown without winners, pot {} unclaimed", engine.hand_id, pot);
    }

    room.revealed = entries.iter().map(|e| e.player_id.clone()).collect();

    info!(
        "hand {}: showdown, {} split {} way(s): {}",
        engine.hand_id,
        pot,
        winners.len().max(1),
        winners
            .iter()
            .map(|w| format!("{}={}", w.player_id, w.amount))
            .collect::<Vec<_>>()
            .join(", ")
    );

    HandResult {
        hand_id: engine.hand_id,
        reason: WinReason::Showdown,
        board: room.board.clone(),
        pot,
        winners,
        showdown: entries,
    }
}
