use std::time::Duration;

use log::{debug, warn};

use crate::api::{build_holdem_view, ActionRequest, HoldemView};
use crate::config::RoomConfig;
use crate::domain::hand::HandResult;
use crate::domain::{Room, RoomId};
use crate::engine::{
    apply_action, check_can_start, disconnect_player, join_player, leave_player, start_hand,
    ActionKind, EngineError, HandEngine, HandStatus, JoinOutcome, LeaveOutcome, RandomSource,
    RoomEvent,
};
use crate::infra::IdGenerator;
use crate::room::game::CardGame;
use crate::time_ctrl::{TimerTicket, TurnTimer};

/// Hold'em-комната: места + текущая раздача + таймер хода.
#[derive(Debug)]
pub struct HoldemRoom {
    room: Room,
    hand: Option<HandEngine>,
    timer: TurnTimer,
    ids: IdGenerator,
    events: Vec<RoomEvent>,
    last_result: Option<HandResult>,
}

impl HoldemRoom {
    pub fn new(id: RoomId, config: RoomConfig) -> Self {
        Self {
            room: Room::new(id, config),
            hand: None,
            timer: TurnTimer::new(),
            ids: IdGenerator::new(),
            events: Vec::new(),
            last_result: None,
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref()
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// Результат последней завершённой раздачи.
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    pub fn current_actor(&self) -> Option<&str> {
        self.hand.as_ref().and_then(|h| h.current_actor.as_deref())
    }

    /// Забрать события движка и обработать статус раздачи.
    fn settle(&mut self, status: Option<HandStatus>) {
        if let Some(hand) = self.hand.as_mut() {
            self.events.extend(hand.take_events());
        }

        match status {
            Some(HandStatus::Finished(result)) => {
                // Конец раздачи: все таймеры снимаются до публикации результата.
                self.timer.disarm_all();
                self.last_result = Some(result);
                self.hand = None;
            }
            _ => {
                let actor = self.hand.as_ref().and_then(|h| h.current_actor.clone());
                self.timer.follow(actor.as_deref());
            }
        }
    }
}

impl CardGame for HoldemRoom {
    type View = HoldemView;
    type Event = RoomEvent;

    fn join(&mut self, player_id: &str, display_name: &str) -> Result<JoinOutcome, EngineError> {
        let outcome = join_player(&mut self.room, player_id, display_name)?;
        let seat = self.room.seat(player_id);
        let name = seat.map(|s| s.display_name.clone()).unwrap_or_default();
        match outcome {
            JoinOutcome::Seated { stack } => self.events.push(RoomEvent::PlayerJoined {
                player_id: player_id.to_string(),
                display_name: name,
                stack,
            }),
            JoinOutcome::Rejoined { .. } => self.events.push(RoomEvent::PlayerReconnected {
                player_id: player_id.to_string(),
                display_name: name,
            }),
        }
        Ok(outcome)
    }

    fn leave(&mut self, player_id: &str) -> Result<LeaveOutcome, EngineError> {
        let (seat, status) = leave_player(&mut self.room, self.hand.as_mut(), player_id)?;
        self.timer.forget(player_id);
        self.settle(status);
        self.events.push(RoomEvent::PlayerLeft {
            player_id: seat.player_id,
            stack: seat.stack,
        });

        if self.room.seats.is_empty() {
            Ok(LeaveOutcome::RoomEmpty)
        } else {
            Ok(LeaveOutcome::Left)
        }
    }

    fn disconnect(&mut self, player_id: &str) -> Result<(), EngineError> {
        disconnect_player(&mut self.room, player_id)?;
        self.events.push(RoomEvent::PlayerDisconnected {
            player_id: player_id.to_string(),
        });
        Ok(())
    }

    fn start_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        // Номер раздачи тратится только на реально начатую раздачу.
        check_can_start(&self.room)?;
        let hand_id = self.ids.next_hand_id();
        let (engine, status) = start_hand(&mut self.room, rng, hand_id)?;
        self.hand = Some(engine);
        self.last_result = None;
        self.settle(Some(status));
        Ok(())
    }

    fn handle_action(
        &mut self,
        player_id: &str,
        request: &ActionRequest,
    ) -> Result<(), EngineError> {
        let action = request.to_holdem()?;
        let engine = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;
        let status = apply_action(&mut self.room, engine, player_id, action)?;
        // Действие принято: таймер этого хода больше не нужен.
        self.timer.cancel(player_id);
        self.settle(Some(status));
        Ok(())
    }

    fn on_timeout(&mut self, ticket: &TimerTicket) -> bool {
        if !self.timer.is_live(ticket) {
            debug!(
                "room {}: stale timer {}#{} ignored",
                self.room.id, ticket.player_id, ticket.instance
            );
            return false;
        }
        let Some(engine) = self.hand.as_mut() else {
            self.timer.disarm_all();
            return false;
        };
        if engine.current_actor.as_deref() != Some(ticket.player_id.as_str()) {
            self.timer.cancel(&ticket.player_id);
            return false;
        }

        warn!(
            "room {}: {} timed out, auto-fold",
            self.room.id, ticket.player_id
        );
        self.events.push(RoomEvent::TurnTimedOut {
            player_id: ticket.player_id.clone(),
        });
        self.timer.cancel(&ticket.player_id);

        match apply_action(&mut self.room, engine, &ticket.player_id, ActionKind::Fold) {
            Ok(status) => self.settle(Some(status)),
            Err(e) => {
                warn!("room {}: auto-fold rejected: {e}", self.room.id);
                self.settle(None);
            }
        }
        true
    }

    fn view_for(&self, viewer: Option<&str>) -> HoldemView {
        build_holdem_view(&self.room, self.hand.as_ref(), viewer)
    }

    fn take_events(&mut self) -> Vec<RoomEvent> {
        std::mem::take(&mut self.events)
    }

    fn armed_timer(&self) -> Option<&TimerTicket> {
        self.timer.armed()
    }

    fn action_timeout(&self) -> Duration {
        self.room.config.time.action_timeout()
    }
}
