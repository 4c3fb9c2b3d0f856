// src/time_ctrl/clock.rs
//! Таймер хода с защитой от устаревших срабатываний.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Билет одного запланированного таймера.
///
/// `instance` растёт монотонно для каждого игрока; срабатывание со старым
/// номером считается устаревшим и игнорируется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerTicket {
    pub player_id: PlayerId,
    pub instance: u64,
}

/// Учёт таймеров хода внутри комнаты. Одновременно взведён не больше одного.
#[derive(Clone, Debug, Default)]
pub struct TurnTimer {
    /// Последний выданный номер для каждого игрока.
    latest: HashMap<PlayerId, u64>,
    armed: Option<TimerTicket>,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Взвести таймер для игрока. Предыдущий таймер (любого игрока) отменяется.
    pub fn arm(&mut self, player_id: &str) -> TimerTicket {
        self.disarm_all();
        let counter = self.latest.entry(player_id.to_string()).or_insert(0);
        *counter += 1;
        let ticket = TimerTicket {
            player_id: player_id.to_string(),
            instance: *counter,
        };
        self.armed = Some(ticket.clone());
        ticket
    }

    /// Отменить таймер игрока, если он взведён.
    pub fn cancel(&mut self, player_id: &str) {
        if self
            .armed
            .as_ref()
            .map_or(false, |t| t.player_id == player_id)
        {
            self.disarm_all();
        }
    }

    /// Снять все таймеры (конец раздачи / раунда).
    pub fn disarm_all(&mut self) {
        if let Some(ticket) = self.armed.take() {
            // Сдвигаем номер, чтобы уже летящее срабатывание стало устаревшим.
            if let Some(counter) = self.latest.get_mut(&ticket.player_id) {
                *counter += 1;
            }
        }
    }

    /// Актуален ли билет: он взведён и его номер последний для игрока.
    pub fn is_live(&self, ticket: &TimerTicket) -> bool {
        self.armed.as_ref() == Some(ticket)
            && self.latest.get(&ticket.player_id) == Some(&ticket.instance)
    }

    /// Текущий взведённый билет.
    pub fn armed(&self) -> Option<&TimerTicket> {
        self.armed.as_ref()
    }

    /// Взвести таймер для `actor`, если он ещё не взведён именно на него.
    /// `None` – снять всё.
    pub fn follow(&mut self, actor: Option<&str>) {
        match actor {
            Some(pid) => {
                if self.armed.as_ref().map(|t| t.player_id.as_str()) != Some(pid) {
                    self.arm(pid);
                }
            }
            None => self.disarm_all(),
        }
    }

    /// Игрок ушёл из комнаты: таймер снимается, счётчик остаётся.
    ///
    /// После повторного входа номера билетов продолжают расти, поэтому
    /// билет, выданный до ухода, уже не станет актуальным.
    pub fn forget(&mut self, player_id: &str) {
        self.cancel(player_id);
    }
}
