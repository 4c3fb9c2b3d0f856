//! Blackjack: линейный раунд против дилера поверх того же актора комнаты.

pub mod actions;
pub mod events;
pub mod game;
pub mod rules;
pub mod seat;
pub mod view;

pub use actions::BlackjackAction;
pub use events::{BlackjackEvent, RoundSettlement, SettlementLine};
pub use game::{BlackjackRoom, Phase};
pub use rules::{hand_value, is_natural, HandOutcome};
pub use seat::BlackjackSeat;
pub use view::{BlackjackSeatView, BlackjackView};
