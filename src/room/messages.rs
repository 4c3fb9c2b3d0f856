//! Сообщения актора комнаты.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::api::{ActionRejected, ActionRequest};
use crate::domain::{PlayerId, RoomId};
use crate::engine::{JoinOutcome, LeaveOutcome};
use crate::room::game::CardGame;

/// Ответ на команду: успех или сигнал об отклонении (только отправителю).
pub type Reply<T> = oneshot::Sender<Result<T, ActionRejected>>;

/// Сообщения, которые можно отправить актору комнаты.
pub enum RoomMessage<G: CardGame> {
    Join {
        player_id: PlayerId,
        display_name: String,
        reply: Reply<JoinOutcome>,
    },

    Leave {
        player_id: PlayerId,
        reply: Reply<LeaveOutcome>,
    },

    /// Транспорт потерял соединение игрока.
    Disconnect {
        player_id: PlayerId,
        reply: Reply<()>,
    },

    StartHand {
        reply: Reply<()>,
    },

    Action {
        player_id: PlayerId,
        request: ActionRequest,
        reply: Reply<()>,
    },

    GetView {
        viewer: Option<PlayerId>,
        reply: oneshot::Sender<G::View>,
    },

    /// Подписка на обновления (per-seat view после каждого изменения).
    Subscribe {
        subscriber: PlayerId,
        sender: mpsc::Sender<RoomUpdate<G::View, G::Event>>,
    },

    Unsubscribe {
        subscriber: PlayerId,
    },

    Close {
        reply: oneshot::Sender<()>,
    },
}

/// Обновление для одного подписчика: публичные события + его личный view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomUpdate<V, E> {
    pub room_id: RoomId,
    pub events: Vec<E>,
    pub view: V,
}
