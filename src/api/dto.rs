use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{PlayerId, RoomId};
use crate::engine::LegalActions;

/// Место глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub player_id: PlayerId,
    pub display_name: String,
    pub stack: Chips,
    pub street_bet: Chips,
    pub total_bet: Chips,
    pub in_hand: bool,
    pub all_in: bool,
    pub has_acted: bool,
    pub disconnected: bool,
    /// Сколько карт на руках (видно всем).
    pub card_count: usize,
    /// Сами карты – только владельцу или после вскрытия.
    pub hole_cards: Option<Vec<Card>>,
}

/// Состояние Hold'em-комнаты для одного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoldemView {
    pub room_id: RoomId,
    pub viewer: Option<PlayerId>,
    pub hand_in_progress: bool,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub button: Option<PlayerId>,
    pub current_actor: Option<PlayerId>,
    pub seats: Vec<SeatView>,
    /// Сколько зрителю нужно доставить (если он в раздаче).
    pub to_call: Option<Chips>,
    /// Доступные действия – только когда ход зрителя.
    pub legal_actions: Option<LegalActions>,
}
