use serde::{Deserialize, Serialize};

use crate::blackjack::rules::HandOutcome;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId};

/// Итог одного игрока в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementLine {
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
    pub total: u8,
    pub outcome: HandOutcome,
    /// Основная ставка (с учётом double).
    pub bet: Chips,
    pub insurance_bet: Chips,
    /// Сколько вернулось на стек (ставка + выигрыш + страховка).
    pub returned: Chips,
    /// Чистый результат раунда для игрока.
    pub net: i64,
}

/// Расчёт раунда: рука дилера и итог каждого игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSettlement {
    pub round_id: HandId,
    pub dealer_cards: Vec<Card>,
    pub dealer_total: u8,
    pub lines: Vec<SettlementLine>,
}

impl RoundSettlement {
    pub fn line_for(&self, player_id: &str) -> Option<&SettlementLine> {
        self.lines.iter().find(|l| l.player_id == player_id)
    }
}

/// Публичное событие Blackjack-комнаты.
///
/// Карты игроков до хода дилера не раскрываются, только их количество.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackEvent {
    PlayerJoined {
        player_id: PlayerId,
        display_name: String,
        stack: Chips,
    },

    PlayerReconnected {
        player_id: PlayerId,
        display_name: String,
    },

    PlayerDisconnected {
        player_id: PlayerId,
    },

    /// Ставка ушедшего игрока в текущем раунде сгорает.
    PlayerLeft {
        player_id: PlayerId,
        stack: Chips,
        forfeited: Chips,
    },

    RoundStarted {
        round_id: HandId,
        players: Vec<PlayerId>,
    },

    BetPlaced {
        player_id: PlayerId,
        amount: Chips,
    },

    /// Раздача: по две карты каждому, дилер показывает одну.
    CardsDealt {
        dealer_up: Card,
        insurance_offered: bool,
    },

    InsuranceDecided {
        player_id: PlayerId,
        taken: bool,
        cost: Chips,
    },

    PlayerHit {
        player_id: PlayerId,
        card_count: usize,
        busted: bool,
    },

    PlayerStood {
        player_id: PlayerId,
    },

    PlayerDoubled {
        player_id: PlayerId,
        bet: Chips,
        busted: bool,
    },

    TurnTimedOut {
        player_id: PlayerId,
    },

    DealerPlayed {
        cards: Vec<Card>,
        total: u8,
    },

    RoundSettled(RoundSettlement),
}
