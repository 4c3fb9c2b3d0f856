//! Актор комнаты: единственный владелец состояния.
//!
//! Команды и срабатывания таймера обрабатываются строго по одной из одного
//! цикла, поэтому блокировок нет. Таймер хода – отдельная задача со `sleep`,
//! которая присылает свой билет обратно в актор; отмена = `abort` задачи
//! плюс проверка номера билета в игре.

use std::collections::HashMap;

use log::{debug, info, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::api::{ActionRejected, ActionRequest};
use crate::domain::{PlayerId, RoomId};
use crate::engine::{EngineError, JoinOutcome, LeaveOutcome, RandomSource};
use crate::room::game::CardGame;
use crate::room::messages::{RoomMessage, RoomUpdate};
use crate::time_ctrl::TimerTicket;

const INBOX_CAPACITY: usize = 100;

/// Хэндл для отправки сообщений актору. Дешёво клонируется.
pub struct RoomHandle<G: CardGame> {
    sender: mpsc::Sender<RoomMessage<G>>,
    room_id: RoomId,
}

impl<G: CardGame> Clone for RoomHandle<G> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            room_id: self.room_id,
        }
    }
}

impl<G: CardGame> RoomHandle<G> {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Отправить сообщение актору.
    pub async fn send(&self, message: RoomMessage<G>) -> Result<(), ActionRejected> {
        self.sender
            .send(message)
            .await
            .map_err(|_| closed("send"))
    }

    async fn request<T>(
        &self,
        name: &str,
        build: impl FnOnce(oneshot::Sender<Result<T, ActionRejected>>) -> RoomMessage<G>,
    ) -> Result<T, ActionRejected> {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| closed(name))?
    }

    pub async fn join(
        &self,
        player_id: &str,
        display_name: &str,
    ) -> Result<JoinOutcome, ActionRejected> {
        self.request("join", |reply| RoomMessage::Join {
            player_id: player_id.to_string(),
            display_name: display_name.to_string(),
            reply,
        })
        .await
    }

    pub async fn leave(&self, player_id: &str) -> Result<LeaveOutcome, ActionRejected> {
        self.request("leave", |reply| RoomMessage::Leave {
            player_id: player_id.to_string(),
            reply,
        })
        .await
    }

    pub async fn disconnect(&self, player_id: &str) -> Result<(), ActionRejected> {
        self.request("disconnect", |reply| RoomMessage::Disconnect {
            player_id: player_id.to_string(),
            reply,
        })
        .await
    }

    pub async fn start_hand(&self) -> Result<(), ActionRejected> {
        self.request("start", |reply| RoomMessage::StartHand { reply })
            .await
    }

    pub async fn act(&self, player_id: &str, request: ActionRequest) -> Result<(), ActionRejected> {
        self.request("action", |reply| RoomMessage::Action {
            player_id: player_id.to_string(),
            request,
            reply,
        })
        .await
    }

    pub async fn view(&self, viewer: Option<&str>) -> Result<G::View, ActionRejected> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetView {
            viewer: viewer.map(str::to_string),
            reply: tx,
        })
        .await?;
        rx.await.map_err(|_| closed("view"))
    }

    pub async fn subscribe(
        &self,
        subscriber: &str,
        buffer: usize,
    ) -> Result<mpsc::Receiver<RoomUpdate<G::View, G::Event>>, ActionRejected> {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        self.send(RoomMessage::Subscribe {
            subscriber: subscriber.to_string(),
            sender: tx,
        })
        .await?;
        Ok(rx)
    }

    pub async fn unsubscribe(&self, subscriber: &str) -> Result<(), ActionRejected> {
        self.send(RoomMessage::Unsubscribe {
            subscriber: subscriber.to_string(),
        })
        .await
    }

    pub async fn close(&self) -> Result<(), ActionRejected> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::Close { reply: tx }).await?;
        rx.await.map_err(|_| closed("close"))
    }
}

fn closed(action: &str) -> ActionRejected {
    ActionRejected::new(action, &EngineError::RoomClosed)
}

/// Запущенный таймер хода.
struct ScheduledTimer {
    ticket: TimerTicket,
    task: JoinHandle<()>,
}

/// Актор одной комнаты.
pub struct RoomActor<G: CardGame, R: RandomSource> {
    id: RoomId,
    game: G,
    rng: R,
    inbox: mpsc::Receiver<RoomMessage<G>>,
    timer_tx: mpsc::UnboundedSender<TimerTicket>,
    timer_rx: mpsc::UnboundedReceiver<TimerTicket>,
    scheduled: Option<ScheduledTimer>,
    subscribers: HashMap<PlayerId, mpsc::Sender<RoomUpdate<G::View, G::Event>>>,
}

impl<G, R> RoomActor<G, R>
where
    G: CardGame,
    R: RandomSource + Send + 'static,
{
    pub fn new(id: RoomId, game: G, rng: R) -> (Self, RoomHandle<G>) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        let actor = Self {
            id,
            game,
            rng,
            inbox,
            timer_tx,
            timer_rx,
            scheduled: None,
            subscribers: HashMap::new(),
        };

        (actor, RoomHandle { sender, room_id: id })
    }

    /// Создать актор и запустить его на текущем tokio-рантайме.
    pub fn spawn(id: RoomId, game: G, rng: R) -> RoomHandle<G> {
        let (actor, handle) = Self::new(id, game, rng);
        tokio::spawn(actor.run());
        handle
    }

    /// Цикл актора. Завершается по `Close` или когда все хэндлы удалены.
    pub async fn run(mut self) {
        info!("room {} actor started", self.id);

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else { break };
                    if !self.handle_message(message) {
                        break;
                    }
                }

                Some(ticket) = self.timer_rx.recv() => {
                    if self.game.on_timeout(&ticket) {
                        self.broadcast();
                    }
                }
            }

            self.sync_timer();
        }

        if let Some(timer) = self.scheduled.take() {
            timer.task.abort();
        }
        info!("room {} actor stopped", self.id);
    }

    /// Обработать одно сообщение. `false` – актор должен остановиться.
    fn handle_message(&mut self, message: RoomMessage<G>) -> bool {
        match message {
            RoomMessage::Join {
                player_id,
                display_name,
                reply,
            } => {
                let result = self
                    .game
                    .join(&player_id, &display_name)
                    .map_err(|e| rejected("join", &player_id, &e));
                let _ = reply.send(result);
            }

            RoomMessage::Leave { player_id, reply } => {
                let result = self
                    .game
                    .leave(&player_id)
                    .map_err(|e| rejected("leave", &player_id, &e));
                self.subscribers.remove(&player_id);
                let _ = reply.send(result);
            }

            RoomMessage::Disconnect { player_id, reply } => {
                let result = self
                    .game
                    .disconnect(&player_id)
                    .map_err(|e| rejected("disconnect", &player_id, &e));
                let _ = reply.send(result);
            }

            RoomMessage::StartHand { reply } => {
                let result = self
                    .game
                    .start_round(&mut self.rng)
                    .map_err(|e| rejected("start", "-", &e));
                let _ = reply.send(result);
            }

            RoomMessage::Action {
                player_id,
                request,
                reply,
            } => {
                let result = self
                    .game
                    .handle_action(&player_id, &request)
                    .map_err(|e| rejected(&request.action, &player_id, &e));
                let _ = reply.send(result);
            }

            RoomMessage::GetView { viewer, reply } => {
                let _ = reply.send(self.game.view_for(viewer.as_deref()));
            }

            RoomMessage::Subscribe { subscriber, sender } => {
                debug!("room {}: {} subscribed", self.id, subscriber);
                self.subscribers.insert(subscriber, sender);
            }

            RoomMessage::Unsubscribe { subscriber } => {
                self.subscribers.remove(&subscriber);
            }

            RoomMessage::Close { reply } => {
                info!("room {}: close requested", self.id);
                let _ = reply.send(());
                return false;
            }
        }

        self.broadcast();
        true
    }

    /// Разослать накопленные события каждому подписчику с его личным view.
    fn broadcast(&mut self) {
        let events = self.game.take_events();
        if events.is_empty() {
            return;
        }

        let mut gone = Vec::new();
        for (subscriber, sender) in &self.subscribers {
            let update = RoomUpdate {
                room_id: self.id,
                events: events.clone(),
                view: self.game.view_for(Some(subscriber)),
            };
            match sender.try_send(update) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("room {}: update for {} dropped, buffer full", self.id, subscriber);
                }
                Err(TrySendError::Closed(_)) => gone.push(subscriber.clone()),
            }
        }
        for subscriber in gone {
            self.subscribers.remove(&subscriber);
        }
    }

    /// Привести запущенную задачу-таймер в соответствие с игрой.
    fn sync_timer(&mut self) {
        let wanted = self.game.armed_timer().cloned();
        if self.scheduled.as_ref().map(|t| &t.ticket) == wanted.as_ref() {
            return;
        }

        if let Some(old) = self.scheduled.take() {
            old.task.abort();
        }

        if let Some(ticket) = wanted {
            let delay = self.game.action_timeout();
            let tx = self.timer_tx.clone();
            let fired = ticket.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(fired);
            });
            debug!(
                "room {}: timer armed for {}#{} ({:?})",
                self.id, ticket.player_id, ticket.instance, delay
            );
            self.scheduled = Some(ScheduledTimer { ticket, task });
        }
    }
}

fn rejected(action: &str, player_id: &str, err: &EngineError) -> ActionRejected {
    warn!("{player_id}: {action} rejected: {err}");
    ActionRejected::new(action, err)
}
