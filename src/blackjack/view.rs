use serde::{Deserialize, Serialize};

use crate::blackjack::events::RoundSettlement;
use crate::blackjack::game::Phase;
use crate::blackjack::rules::hand_value;
use crate::blackjack::seat::BlackjackSeat;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, RoomId};

/// Место глазами зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackSeatView {
    pub player_id: PlayerId,
    pub display_name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub in_round: bool,
    pub has_bet: bool,
    pub insurance: Option<bool>,
    pub insurance_bet: Chips,
    pub doubled: bool,
    pub finished: bool,
    pub disconnected: bool,
    pub card_count: usize,
    /// Видимые зрителю карты: свои целиком, чужие – только первая
    /// до хода дилера.
    pub cards: Vec<Card>,
    /// Очки по видимым картам.
    pub visible_total: Option<u8>,
}

/// Состояние Blackjack-комнаты для одного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackView {
    pub room_id: RoomId,
    pub viewer: Option<PlayerId>,
    pub round_id: Option<HandId>,
    pub phase: Phase,
    pub min_bet: Chips,
    pub max_bet: Chips,
    pub seats: Vec<BlackjackSeatView>,
    /// До хода дилера видна только открытая карта.
    pub dealer_cards: Vec<Card>,
    pub dealer_total: Option<u8>,
    pub current_turn: Option<PlayerId>,
    /// Что зритель может сделать прямо сейчас.
    pub available_actions: Vec<String>,
    pub last_settlement: Option<RoundSettlement>,
}

fn visible_total(cards: &[Card]) -> Option<u8> {
    if cards.is_empty() {
        None
    } else {
        Some(hand_value(cards))
    }
}

pub(crate) fn seat_view(
    seat: &BlackjackSeat,
    viewer: Option<&str>,
    reveal_all: bool,
) -> BlackjackSeatView {
    let own = viewer == Some(seat.player_id.as_str());
    let cards: Vec<Card> = if own || reveal_all {
        seat.hand.clone()
    } else {
        seat.hand.iter().take(1).copied().collect()
    };

    BlackjackSeatView {
        player_id: seat.player_id.clone(),
        display_name: seat.display_name.clone(),
        stack: seat.stack,
        bet: seat.bet,
        in_round: seat.in_round,
        has_bet: seat.has_bet,
        insurance: seat.insurance,
        insurance_bet: seat.insurance_bet,
        doubled: seat.doubled,
        finished: seat.finished,
        disconnected: seat.disconnected,
        card_count: seat.hand.len(),
        visible_total: visible_total(&cards),
        cards,
    }
}

pub(crate) fn dealer_view(dealer: &[Card], reveal_all: bool) -> (Vec<Card>, Option<u8>) {
    let cards: Vec<Card> = if reveal_all {
        dealer.to_vec()
    } else {
        dealer.iter().take(1).copied().collect()
    };
    let total = visible_total(&cards);
    (cards, total)
}
