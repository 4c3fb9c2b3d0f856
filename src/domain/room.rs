use serde::{Deserialize, Serialize};

use crate::config::RoomConfig;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::seat::Seat;
use crate::domain::{HandId, PlayerId, RoomId};

/// Состояние Hold'em-комнаты.
///
/// Места хранятся в порядке посадки; этот порядок и есть "порядок мест за столом".
/// Поля раздачи (board, pot, street) сбрасываются при старте следующей раздачи,
/// места переживают раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub config: RoomConfig,
    pub seats: Vec<Seat>,
    /// Общие карты (0, 3, 4 или 5).
    pub board: Vec<Card>,
    /// Единый банк (без сайд-потов).
    pub pot: Chips,
    pub street: Street,
    pub hand_in_progress: bool,
    pub current_hand_id: Option<HandId>,
    /// Индекс кнопки в списке мест с фишками (None до первой раздачи).
    pub button: Option<usize>,
    /// Игрок на кнопке в текущей/последней раздаче.
    pub button_player: Option<PlayerId>,
    /// Чьи карты открыты на последнем шоудауне.
    pub revealed: Vec<PlayerId>,
}

impl Room {
    pub fn new(id: RoomId, config: RoomConfig) -> Self {
        Self {
            id,
            config,
            seats: Vec::new(),
            board: Vec::new(),
            pot: Chips::ZERO,
            street: Street::Preflop,
            hand_in_progress: false,
            current_hand_id: None,
            button: None,
            button_player: None,
            revealed: Vec::new(),
        }
    }

    pub fn seat(&self, player_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    pub fn seat_mut(&mut self, player_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.player_id == player_id)
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.config.max_seats as usize
    }

    /// Игроки с положительным стеком, в порядке мест.
    pub fn eligible_players(&self) -> Vec<PlayerId> {
        self.seats
            .iter()
            .filter(|s| !s.stack.is_zero())
            .map(|s| s.player_id.clone())
            .collect()
    }

    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand).count()
    }

    /// Сколько игроков ещё могут ставить (в раздаче и не в олл-ине).
    pub fn can_act_count(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }

    /// Сумма стеков + банк. Сохраняется в течение раздачи.
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().map(|s| s.stack).sum::<Chips>() + self.pot
    }
}
