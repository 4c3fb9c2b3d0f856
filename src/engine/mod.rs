//! Движок Hold'em: блайнды, очередь хода, ставки, переход улиц, шоудаун.
//!
//! Состояние делится на `Room` (места, борд, банк) и `HandEngine`
//! (колода, ставки улицы, чей ход). Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `fold_out_of_turn` – сбросить уходящего игрока
//!   - `join_player` / `leave_player` / `disconnect_player` – учёт мест

pub mod actions;
pub mod betting;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod ledger;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod validation;

pub use actions::ActionKind;
pub use betting::BettingState;
pub use errors::EngineError;
pub use events::RoomEvent;
pub use game_loop::{
    apply_action, check_can_start, fold_out_of_turn, start_hand, HandEngine, HandStatus,
};
pub use ledger::{disconnect_player, join_player, leave_player, JoinOutcome, LeaveOutcome};
pub use validation::{legal_actions, validate_action, LegalActions};

use crate::domain::card::Card;

/// Источник перемешивания колоды. Реализации – в `infra::rng`.
pub trait RandomSource {
    fn shuffle(&mut self, cards: &mut Vec<Card>);
}
