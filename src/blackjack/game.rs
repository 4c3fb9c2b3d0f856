//! Blackjack-комната: один раунд против дилера.
//!
//! Фазы идут строго по порядку:
//! `Betting → Insurance (если дилер показывает туза) → PlayerTurns → DealerTurn → Settled`.
//! Ставки списываются со стека сразу, расчёт возвращает выигрыш на стек.
//! Таймер хода работает только в `PlayerTurns`; тайм-аут = `stand`.

use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::ActionRequest;
use crate::blackjack::actions::BlackjackAction;
use crate::blackjack::events::{BlackjackEvent, RoundSettlement, SettlementLine};
use crate::blackjack::rules::{
    hand_value, insurance_payout, is_natural, judge, payout, DEALER_STANDS_ON,
};
use crate::blackjack::seat::BlackjackSeat;
use crate::blackjack::view::{dealer_view, seat_view, BlackjackView};
use crate::config::BlackjackConfig;
use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::seat::normalize_display_name;
use crate::domain::{HandId, PlayerId, RoomId};
use crate::engine::{EngineError, JoinOutcome, LeaveOutcome, RandomSource};
use crate::infra::IdGenerator;
use crate::room::game::CardGame;
use crate::time_ctrl::{TimerTicket, TurnTimer};

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    /// Раунд ещё ни разу не запускался.
    Waiting,
    Betting,
    Insurance,
    PlayerTurns,
    DealerTurn,
    Settled,
}

impl Phase {
    pub fn round_active(self) -> bool {
        matches!(
            self,
            Phase::Betting | Phase::Insurance | Phase::PlayerTurns | Phase::DealerTurn
        )
    }

    /// Карты игроков и дилера открыты всем.
    pub fn cards_revealed(self) -> bool {
        matches!(self, Phase::DealerTurn | Phase::Settled)
    }
}

#[derive(Debug)]
pub struct BlackjackRoom {
    id: RoomId,
    config: BlackjackConfig,
    seats: Vec<BlackjackSeat>,
    phase: Phase,
    deck: Deck,
    /// Вторая перемешанная колода на случай, если первая кончится.
    reserve: Deck,
    dealer: Vec<Card>,
    /// Участники раунда в порядке мест.
    order: Vec<PlayerId>,
    turn: Option<PlayerId>,
    round_id: Option<HandId>,
    timer: TurnTimer,
    ids: IdGenerator,
    events: Vec<BlackjackEvent>,
    last_settlement: Option<RoundSettlement>,
}

impl BlackjackRoom {
    pub fn new(id: RoomId, config: BlackjackConfig) -> Self {
        Self {
            id,
            config,
            seats: Vec::new(),
            phase: Phase::Waiting,
            deck: Deck { cards: Vec::new() },
            reserve: Deck { cards: Vec::new() },
            dealer: Vec::new(),
            order: Vec::new(),
            turn: None,
            round_id: None,
            timer: TurnTimer::new(),
            ids: IdGenerator::new(),
            events: Vec::new(),
            last_settlement: None,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn config(&self) -> &BlackjackConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seats(&self) -> &[BlackjackSeat] {
        &self.seats
    }

    pub fn seat(&self, player_id: &str) -> Option<&BlackjackSeat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    fn seat_mut(&mut self, player_id: &str) -> Option<&mut BlackjackSeat> {
        self.seats.iter_mut().find(|s| s.player_id == player_id)
    }

    /// Все карты дилера (включая закрытую).
    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer
    }

    pub fn current_turn(&self) -> Option<&str> {
        self.turn.as_deref()
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn last_settlement(&self) -> Option<&RoundSettlement> {
        self.last_settlement.as_ref()
    }

    /// Место участника раунда или ошибка.
    fn round_seat(&self, player_id: &str) -> Result<&BlackjackSeat, EngineError> {
        let seat = self
            .seat(player_id)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
        if !seat.in_round {
            return Err(EngineError::NotInHand(player_id.to_string()));
        }
        Ok(seat)
    }

    fn expect_phase(&self, phase: Phase, action: &str) -> Result<(), EngineError> {
        if !self.phase.round_active() {
            return Err(EngineError::NoActiveHand);
        }
        if self.phase != phase {
            return Err(EngineError::IllegalAmount(format!(
                "`{action}` недоступно в фазе {:?}",
                self.phase
            )));
        }
        Ok(())
    }

    fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.deck.draw_one() {
                return card;
            }
            if let Some(card) = self.reserve.draw_one() {
                return card;
            }
            warn!("room {}: shoe exhausted, opening a fresh deck", self.id);
            self.deck = Deck::standard_52();
        }
    }

    // ===== Ставки =====

    fn place_bet(&mut self, player_id: &str, amount: Chips) -> Result<(), EngineError> {
        self.expect_phase(Phase::Betting, "bet")?;
        let seat = self.round_seat(player_id)?;
        if seat.has_bet {
            return Err(EngineError::IllegalAmount("ставка уже сделана".into()));
        }
        if amount < self.config.min_bet || amount > self.config.max_bet {
            return Err(EngineError::IllegalAmount(format!(
                "ставка {amount} вне диапазона {}..={}",
                self.config.min_bet, self.config.max_bet
            )));
        }
        if amount > seat.stack {
            return Err(EngineError::InsufficientFunds {
                needed: amount.0,
                available: seat.stack.0,
            });
        }

        if let Some(seat) = self.seat_mut(player_id) {
            seat.stack -= amount;
            seat.bet = amount;
            seat.has_bet = true;
        }
        debug!("room {}: {} bets {}", self.id, player_id, amount);
        self.events.push(BlackjackEvent::BetPlaced {
            player_id: player_id.to_string(),
            amount,
        });
        Ok(())
    }

    fn decide_insurance(&mut self, player_id: &str, take: bool) -> Result<(), EngineError> {
        self.expect_phase(Phase::Insurance, "insurance")?;
        let seat = self.round_seat(player_id)?;
        if seat.insurance.is_some() {
            return Err(EngineError::IllegalAmount("решение по страховке уже принято".into()));
        }
        let cost = if take { Chips(seat.bet.0 / 2) } else { Chips::ZERO };
        if cost > seat.stack {
            return Err(EngineError::InsufficientFunds {
                needed: cost.0,
                available: seat.stack.0,
            });
        }

        if let Some(seat) = self.seat_mut(player_id) {
            seat.stack -= cost;
            seat.insurance_bet = cost;
            seat.insurance = Some(take);
        }
        debug!("room {}: {} insurance {} ({})", self.id, player_id, take, cost);
        self.events.push(BlackjackEvent::InsuranceDecided {
            player_id: player_id.to_string(),
            taken: take,
            cost,
        });
        Ok(())
    }

    // ===== Ходы игроков =====

    fn play_turn(&mut self, player_id: &str, action: BlackjackAction) -> Result<(), EngineError> {
        self.expect_phase(Phase::PlayerTurns, action.name())?;
        let seat = self.round_seat(player_id)?;
        if self.turn.as_deref() != Some(player_id) {
            return Err(EngineError::OutOfTurn(player_id.to_string()));
        }

        match action {
            BlackjackAction::Hit => {
                let card = self.draw();
                let (card_count, busted) = match self.seat_mut(player_id) {
                    Some(seat) => {
                        seat.hand.push(card);
                        let busted = seat.is_bust();
                        seat.finished = busted;
                        (seat.hand.len(), busted)
                    }
                    None => return Err(EngineError::UnknownPlayer(player_id.to_string())),
                };
                debug!("room {}: {} hits ({} cards, bust={})", self.id, player_id, card_count, busted);
                self.events.push(BlackjackEvent::PlayerHit {
                    player_id: player_id.to_string(),
                    card_count,
                    busted,
                });
            }

            BlackjackAction::Stand => {
                if let Some(seat) = self.seat_mut(player_id) {
                    seat.finished = true;
                }
                debug!("room {}: {} stands", self.id, player_id);
                self.events.push(BlackjackEvent::PlayerStood {
                    player_id: player_id.to_string(),
                });
            }

            BlackjackAction::Double => {
                if seat.hand.len() != 2 {
                    return Err(EngineError::IllegalAmount(
                        "double возможен только на двух картах".into(),
                    ));
                }
                if seat.bet > seat.stack {
                    return Err(EngineError::InsufficientFunds {
                        needed: seat.bet.0,
                        available: seat.stack.0,
                    });
                }

                let card = self.draw();
                let (bet, busted) = match self.seat_mut(player_id) {
                    Some(seat) => {
                        let extra = seat.bet;
                        seat.stack -= extra;
                        seat.bet += extra;
                        seat.doubled = true;
                        seat.hand.push(card);
                        seat.finished = true;
                        (seat.bet, seat.is_bust())
                    }
                    None => return Err(EngineError::UnknownPlayer(player_id.to_string())),
                };
                debug!("room {}: {} doubles to {}", self.id, player_id, bet);
                self.events.push(BlackjackEvent::PlayerDoubled {
                    player_id: player_id.to_string(),
                    bet,
                    busted,
                });
            }

            BlackjackAction::Bet(_) | BlackjackAction::Insurance(_) => {
                return Err(EngineError::IllegalAmount(format!(
                    "`{}` недоступно в фазе {:?}",
                    action.name(),
                    self.phase
                )));
            }
        }
        Ok(())
    }

    // ===== Переходы фаз =====

    /// Продвинуть раунд, пока очередной шаг не требует решения игрока.
    fn progress(&mut self) {
        loop {
            match self.phase {
                Phase::Betting => {
                    let mut players = self.seats.iter().filter(|s| s.in_round).peekable();
                    if players.peek().is_none() {
                        self.settle();
                        return;
                    }
                    if !players.all(|s| s.has_bet) {
                        return;
                    }
                    self.deal_initial();
                }

                Phase::Insurance => {
                    if self
                        .seats
                        .iter()
                        .any(|s| s.in_round && s.insurance.is_none())
                    {
                        return;
                    }
                    self.after_insurance();
                }

                Phase::PlayerTurns => {
                    let on_turn = self
                        .turn
                        .as_deref()
                        .and_then(|pid| self.seat(pid))
                        .map_or(false, BlackjackSeat::awaits_turn);
                    if on_turn {
                        return;
                    }
                    self.turn = self
                        .order
                        .iter()
                        .find(|pid| self.seat(pid).map_or(false, BlackjackSeat::awaits_turn))
                        .cloned();
                    if self.turn.is_some() {
                        return;
                    }
                    self.phase = Phase::DealerTurn;
                }

                Phase::DealerTurn => {
                    self.play_dealer();
                    self.settle();
                    return;
                }

                Phase::Waiting | Phase::Settled => return,
            }
        }
    }

    /// По две карты каждому участнику, затем две дилеру.
    fn deal_initial(&mut self) {
        for pid in self.order.clone() {
            let cards = [self.draw(), self.draw()];
            if let Some(seat) = self.seat_mut(&pid) {
                seat.hand.extend_from_slice(&cards);
                // Натуральный блэкджек не ходит.
                seat.finished = seat.is_natural();
            }
        }
        self.dealer = vec![self.draw(), self.draw()];

        let dealer_up = self.dealer[0];
        let insurance_offered = dealer_up.rank == Rank::Ace;
        debug!("room {}: dealt, dealer shows {}", self.id, dealer_up);
        self.events.push(BlackjackEvent::CardsDealt {
            dealer_up,
            insurance_offered,
        });

        if insurance_offered {
            self.phase = Phase::Insurance;
        } else {
            self.after_insurance();
        }
    }

    /// Натуральный блэкджек у дилера сразу ведёт к расчёту.
    fn after_insurance(&mut self) {
        self.phase = if is_natural(&self.dealer) {
            info!("room {}: dealer has blackjack", self.id);
            Phase::DealerTurn
        } else {
            Phase::PlayerTurns
        };
        self.turn = None;
    }

    fn play_dealer(&mut self) {
        let anyone_alive = self.seats.iter().any(|s| s.in_round && !s.is_bust());
        if anyone_alive {
            while hand_value(&self.dealer) < DEALER_STANDS_ON {
                let card = self.draw();
                self.dealer.push(card);
            }
        }
        let total = hand_value(&self.dealer);
        debug!("room {}: dealer stands on {}", self.id, total);
        self.events.push(BlackjackEvent::DealerPlayed {
            cards: self.dealer.clone(),
            total,
        });
    }

    fn settle(&mut self) {
        let dealer = self.dealer.clone();
        let mut lines = Vec::new();

        for seat in self.seats.iter_mut().filter(|s| s.in_round) {
            let outcome = judge(&seat.hand, &dealer);
            let returned = payout(outcome, seat.bet) + insurance_payout(seat.insurance_bet, &dealer);
            seat.stack += returned;
            let staked = seat.bet + seat.insurance_bet;
            lines.push(SettlementLine {
                player_id: seat.player_id.clone(),
                cards: seat.hand.clone(),
                total: seat.total(),
                outcome,
                bet: seat.bet,
                insurance_bet: seat.insurance_bet,
                returned,
                net: returned.0 as i64 - staked.0 as i64,
            });
        }

        let settlement = RoundSettlement {
            round_id: self.round_id.unwrap_or_default(),
            dealer_total: hand_value(&dealer),
            dealer_cards: dealer,
            lines,
        };
        info!(
            "room {}: round {} settled, dealer {}: {}",
            self.id,
            settlement.round_id,
            settlement.dealer_total,
            settlement
                .lines
                .iter()
                .map(|l| format!("{}={:?}({:+})", l.player_id, l.outcome, l.net))
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.phase = Phase::Settled;
        self.turn = None;
        self.timer.disarm_all();
        self.events.push(BlackjackEvent::RoundSettled(settlement.clone()));
        self.last_settlement = Some(settlement);
    }

    /// Таймер тикает только игроку, который сейчас ходит.
    fn sync_timer(&mut self) {
        if self.phase == Phase::PlayerTurns {
            self.timer.follow(self.turn.as_deref());
        } else {
            self.timer.disarm_all();
        }
    }

    fn available_actions(&self, viewer: Option<&str>) -> Vec<String> {
        let Some(seat) = viewer.and_then(|v| self.seat(v)) else {
            return Vec::new();
        };
        if !seat.in_round {
            return Vec::new();
        }
        let names: Vec<&str> = match self.phase {
            Phase::Betting if !seat.has_bet => vec!["bet"],
            Phase::Insurance if seat.insurance.is_none() => vec!["insurance"],
            Phase::PlayerTurns if self.turn.as_deref() == Some(seat.player_id.as_str()) => {
                if seat.hand.len() == 2 && seat.bet <= seat.stack {
                    vec!["hit", "stand", "double"]
                } else {
                    vec!["hit", "stand"]
                }
            }
            _ => Vec::new(),
        };
        names.into_iter().map(str::to_string).collect()
    }
}

impl CardGame for BlackjackRoom {
    type View = BlackjackView;
    type Event = BlackjackEvent;

    fn join(&mut self, player_id: &str, display_name: &str) -> Result<JoinOutcome, EngineError> {
        if let Some(seat) = self.seat_mut(player_id) {
            if !display_name.trim().is_empty() {
                seat.display_name = display_name.trim().to_string();
            }
            let was_disconnected = seat.disconnected;
            seat.disconnected = false;
            let name = seat.display_name.clone();
            info!("room {}: {} rejoined", self.id, player_id);
            self.events.push(BlackjackEvent::PlayerReconnected {
                player_id: player_id.to_string(),
                display_name: name,
            });
            return Ok(JoinOutcome::Rejoined { was_disconnected });
        }

        if self.seats.len() >= self.config.max_seats as usize {
            return Err(EngineError::RoomFull);
        }

        let stack = self.config.buy_in;
        let name = normalize_display_name(player_id, display_name);
        self.seats
            .push(BlackjackSeat::new(player_id.to_string(), name.clone(), stack));
        info!("room {}: {} seated with {}", self.id, player_id, stack);
        self.events.push(BlackjackEvent::PlayerJoined {
            player_id: player_id.to_string(),
            display_name: name,
            stack,
        });
        Ok(JoinOutcome::Seated { stack })
    }

    fn leave(&mut self, player_id: &str) -> Result<LeaveOutcome, EngineError> {
        let idx = self
            .seats
            .iter()
            .position(|s| s.player_id == player_id)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
        let seat = self.seats.remove(idx);
        self.order.retain(|pid| pid != player_id);
        if self.turn.as_deref() == Some(player_id) {
            self.turn = None;
        }
        self.timer.forget(player_id);

        let forfeited = if self.phase.round_active() && seat.in_round {
            seat.bet + seat.insurance_bet
        } else {
            Chips::ZERO
        };
        info!(
            "room {}: {} left with {} (forfeited {})",
            self.id, player_id, seat.stack, forfeited
        );
        self.events.push(BlackjackEvent::PlayerLeft {
            player_id: seat.player_id,
            stack: seat.stack,
            forfeited,
        });

        self.progress();
        self.sync_timer();

        if self.seats.is_empty() {
            Ok(LeaveOutcome::RoomEmpty)
        } else {
            Ok(LeaveOutcome::Left)
        }
    }

    fn disconnect(&mut self, player_id: &str) -> Result<(), EngineError> {
        let seat = self
            .seat_mut(player_id)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
        seat.disconnected = true;
        info!("room {}: {} disconnected", self.id, player_id);
        self.events.push(BlackjackEvent::PlayerDisconnected {
            player_id: player_id.to_string(),
        });
        Ok(())
    }

    fn start_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        if self.phase.round_active() {
            return Err(EngineError::GameAlreadyInProgress);
        }
        let players: Vec<PlayerId> = self
            .seats
            .iter()
            .filter(|s| !s.stack.is_zero())
            .map(|s| s.player_id.clone())
            .collect();
        if players.len() < self.config.min_players.max(1) {
            return Err(EngineError::NotEnoughPlayers);
        }

        for seat in &mut self.seats {
            seat.reset_for_round();
            seat.in_round = players.contains(&seat.player_id);
        }

        let mut cards = Deck::standard_52().cards;
        rng.shuffle(&mut cards);
        self.deck = Deck { cards };
        let mut cards = Deck::standard_52().cards;
        rng.shuffle(&mut cards);
        self.reserve = Deck { cards };

        let round_id = self.ids.next_hand_id();
        self.round_id = Some(round_id);
        self.dealer.clear();
        self.order = players.clone();
        self.turn = None;
        self.last_settlement = None;
        self.phase = Phase::Betting;
        self.timer.disarm_all();

        info!(
            "room {}: round {} started with {} player(s)",
            self.id,
            round_id,
            players.len()
        );
        self.events.push(BlackjackEvent::RoundStarted { round_id, players });
        Ok(())
    }

    fn handle_action(
        &mut self,
        player_id: &str,
        request: &ActionRequest,
    ) -> Result<(), EngineError> {
        let action = request.to_blackjack()?;
        match action {
            BlackjackAction::Bet(amount) => self.place_bet(player_id, amount)?,
            BlackjackAction::Insurance(take) => self.decide_insurance(player_id, take)?,
            BlackjackAction::Hit | BlackjackAction::Stand | BlackjackAction::Double => {
                self.play_turn(player_id, action)?
            }
        }
        // Каждое принятое действие перезапускает таймер хода.
        self.timer.cancel(player_id);
        self.progress();
        self.sync_timer();
        Ok(())
    }

    fn on_timeout(&mut self, ticket: &TimerTicket) -> bool {
        if !self.timer.is_live(ticket) {
            debug!(
                "room {}: stale timer {}#{} ignored",
                self.id, ticket.player_id, ticket.instance
            );
            return false;
        }
        if self.phase != Phase::PlayerTurns
            || self.turn.as_deref() != Some(ticket.player_id.as_str())
        {
            self.timer.cancel(&ticket.player_id);
            return false;
        }

        warn!("room {}: {} timed out, auto-stand", self.id, ticket.player_id);
        self.events.push(BlackjackEvent::TurnTimedOut {
            player_id: ticket.player_id.clone(),
        });
        self.timer.cancel(&ticket.player_id);
        if let Err(e) = self.play_turn(&ticket.player_id, BlackjackAction::Stand) {
            warn!("room {}: auto-stand rejected: {e}", self.id);
        }
        self.progress();
        self.sync_timer();
        true
    }

    fn view_for(&self, viewer: Option<&str>) -> BlackjackView {
        let reveal_all = self.phase.cards_revealed();
        let (dealer_cards, dealer_total) = dealer_view(&self.dealer, reveal_all);

        BlackjackView {
            room_id: self.id,
            viewer: viewer.map(str::to_string),
            round_id: self.round_id,
            phase: self.phase,
            min_bet: self.config.min_bet,
            max_bet: self.config.max_bet,
            seats: self
                .seats
                .iter()
                .map(|s| seat_view(s, viewer, reveal_all))
                .collect(),
            dealer_cards,
            dealer_total,
            current_turn: self.turn.clone(),
            available_actions: self.available_actions(viewer),
            last_settlement: self.last_settlement.clone(),
        }
    }

    fn take_events(&mut self) -> Vec<BlackjackEvent> {
        std::mem::take(&mut self.events)
    }

    fn armed_timer(&self) -> Option<&TimerTicket> {
        self.timer.armed()
    }

    fn action_timeout(&self) -> Duration {
        self.config.time.action_timeout()
    }
}
