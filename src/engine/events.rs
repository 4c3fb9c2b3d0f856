use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandResult, Street};
use crate::domain::{HandId, PlayerId};
use crate::engine::actions::ActionKind;

/// Публичное событие Hold'em-комнаты.
///
/// Рассылается всем подписчикам, поэтому закрытых карманных карт здесь нет:
/// открытые карты появляются только внутри `HandResult` на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomEvent {
    PlayerJoined {
        player_id: PlayerId,
        display_name: String,
        stack: Chips,
    },

    /// Повторный join: обновлено имя и/или снят флаг отключения.
    PlayerReconnected {
        player_id: PlayerId,
        display_name: String,
    },

    PlayerDisconnected {
        player_id: PlayerId,
    },

    PlayerLeft {
        player_id: PlayerId,
        stack: Chips,
    },

    HandStarted {
        hand_id: HandId,
        button: PlayerId,
        /// Участники в порядке хода, начиная слева от кнопки.
        players: Vec<PlayerId>,
    },

    BlindsPosted {
        small_blind: (PlayerId, Chips),
        big_blind: (PlayerId, Chips),
    },

    PlayerActed {
        player_id: PlayerId,
        action: ActionKind,
        /// Сколько фишек реально ушло в банк этим действием.
        amount: Chips,
        street_bet: Chips,
        stack_after: Chips,
        pot_after: Chips,
        all_in: bool,
    },

    /// Таймер хода истёк, игрок сброшен автоматически.
    TurnTimedOut {
        player_id: PlayerId,
    },

    StreetDealt {
        street: Street,
        cards: Vec<Card>,
        board: Vec<Card>,
    },

    HandFinished(HandResult),
}
