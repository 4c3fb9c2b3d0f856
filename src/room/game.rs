use std::fmt::Debug;
use std::time::Duration;

use crate::api::ActionRequest;
use crate::engine::{EngineError, JoinOutcome, LeaveOutcome, RandomSource};
use crate::time_ctrl::TimerTicket;

/// Игра, которой владеет актор комнаты (Hold'em, Blackjack).
///
/// Все методы синхронные и вызываются строго по одному из цикла актора.
/// Отклонённая операция (`Err`) не должна менять состояние.
pub trait CardGame: Send + 'static {
    /// Представление состояния для одного зрителя.
    type View: Clone + Debug + Send + 'static;
    /// Публичное событие для рассылки подписчикам.
    type Event: Clone + Debug + Send + 'static;

    fn join(&mut self, player_id: &str, display_name: &str) -> Result<JoinOutcome, EngineError>;

    fn leave(&mut self, player_id: &str) -> Result<LeaveOutcome, EngineError>;

    fn disconnect(&mut self, player_id: &str) -> Result<(), EngineError>;

    /// Начать раздачу / раунд.
    fn start_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError>;

    fn handle_action(
        &mut self,
        player_id: &str,
        request: &ActionRequest,
    ) -> Result<(), EngineError>;

    /// Сработал таймер хода. `false` – билет устарел, ничего не изменилось.
    fn on_timeout(&mut self, ticket: &TimerTicket) -> bool;

    fn view_for(&self, viewer: Option<&str>) -> Self::View;

    /// События, накопленные с прошлого вызова.
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// Какой таймер сейчас должен тикать.
    fn armed_timer(&self) -> Option<&TimerTicket>;

    fn action_timeout(&self) -> Duration;
}
