use log::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandResult, Street};
use crate::domain::{HandId, PlayerId, Room};
use crate::engine::actions::ActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::events::RoomEvent;
use crate::engine::positions::{
    blind_indices, first_to_act_postflop, next_button, next_to_act, rotation_from_button,
};
use crate::engine::pot::commit_chips;
use crate::engine::showdown::{finish_last_standing, finish_showdown};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandResult),
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished(_))
    }
}

/// Внутреннее состояние раздачи (то, чего нет в `Room`).
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    /// Чей сейчас ход.
    pub current_actor: Option<PlayerId>,
    /// Участники раздачи по кругу, начиная слева от кнопки (кнопка последняя).
    pub rotation: Vec<PlayerId>,
    pub small_blind: PlayerId,
    pub big_blind: PlayerId,
    /// Накопленные публичные события, забираются через `take_events`.
    events: Vec<RoomEvent>,
}

impl HandEngine {
    /// Забрать события, накопленные с прошлого вызова.
    pub fn take_events(&mut self) -> Vec<RoomEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push(&mut self, event: RoomEvent) {
        self.events.push(event);
    }

    fn rotation_index(&self, player_id: &str) -> Option<usize> {
        self.rotation.iter().position(|p| p == player_id)
    }
}

/// Можно ли начать раздачу: нет текущей и хватает игроков с фишками.
pub fn check_can_start(room: &Room) -> Result<(), EngineError> {
    if room.hand_in_progress {
        return Err(EngineError::GameAlreadyInProgress);
    }
    if room.eligible_players().len() < room.config.min_players.max(2) {
        return Err(EngineError::NotEnoughPlayers);
    }
    Ok(())
}

/// Старт новой раздачи:
/// - двигает кнопку;
/// - сбрасывает поля мест и комнаты;
/// - постит блайнды;
/// - раздаёт карманные карты;
/// - определяет первого ходящего.
///
/// Если после блайндов торговаться некому (олл-ины), раздача сразу
/// доигрывается до шоудауна и возвращается `HandStatus::Finished`.
pub fn start_hand<R: RandomSource>(
    room: &mut Room,
    rng: &mut R,
    hand_id: HandId,
) -> Result<(HandEngine, HandStatus), EngineError> {
    check_can_start(room)?;

    let eligible = room.eligible_players();

    let button = next_button(room.button, eligible.len());
    let rotation = rotation_from_button(&eligible, button);
    let button_player = eligible[button].clone();

    // Сброс полей раздачи.
    for seat in room.seats.iter_mut() {
        seat.reset_for_hand();
        seat.in_hand = eligible.contains(&seat.player_id);
    }
    room.board.clear();
    room.pot = Chips::ZERO;
    room.street = Street::Preflop;
    room.hand_in_progress = true;
    room.current_hand_id = Some(hand_id);
    room.button = Some(button);
    room.button_player = Some(button_player.clone());
    room.revealed.clear();

    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);

    let (sb_idx, bb_idx) = blind_indices(rotation.len());
    let stakes = room.config.stakes.clone();

    let mut engine = HandEngine {
        hand_id,
        deck,
        betting: BettingState::new(Street::Preflop, Chips::ZERO, stakes.big_blind),
        current_actor: None,
        small_blind: rotation[sb_idx].clone(),
        big_blind: rotation[bb_idx].clone(),
        rotation,
        events: Vec::new(),
    };

    info!(
        "room {}: hand {} started, button {}, players {:?}",
        room.id, hand_id, button_player, engine.rotation
    );
    engine.push(RoomEvent::HandStarted {
        hand_id,
        button: button_player,
        players: engine.rotation.clone(),
    });

    // Блайнды (урезаются до стека).
    let sb_paid = commit_chips(room, &engine.small_blind, stakes.small_blind);
    let bb_paid = commit_chips(room, &engine.big_blind, stakes.big_blind);
    engine.betting.current_bet = sb_paid.max(bb_paid);
    engine.betting.last_aggressor = Some(engine.big_blind.clone());
    engine.push(RoomEvent::BlindsPosted {
        small_blind: (engine.small_blind.clone(), sb_paid),
        big_blind: (engine.big_blind.clone(), bb_paid),
    });

    deal_hole_cards(room, &mut engine);

    let status = resolve_after(room, &mut engine, bb_idx);
    Ok((engine, status))
}

/// Карманные карты: по одной за круг, два круга, начиная слева от кнопки.
fn deal_hole_cards(room: &mut Room, engine: &mut HandEngine) {
    for _round in 0..2 {
        for pid in &engine.rotation {
            if let (Some(seat), Some(card)) = (room.seat_mut(pid), engine.deck.draw_one()) {
                seat.hole_cards.push(card);
            }
        }
    }
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Отклонённое действие не меняет ни комнату, ни движок.
pub fn apply_action(
    room: &mut Room,
    engine: &mut HandEngine,
    player_id: &str,
    action: ActionKind,
) -> Result<HandStatus, EngineError> {
    if !room.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }

    let seat = room
        .seat(player_id)
        .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;
    if !seat.in_hand {
        return Err(EngineError::NotInHand(player_id.to_string()));
    }
    if engine.current_actor.as_deref() != Some(player_id) {
        return Err(EngineError::OutOfTurn(player_id.to_string()));
    }

    let big_blind = room.config.stakes.big_blind;
    validate_action(seat, &action, &engine.betting, big_blind)?;

    let to_call = seat.to_call(engine.betting.current_bet);
    let street_bet_before = seat.street_bet;
    let current_bet_before = engine.betting.current_bet;

    let moved = match action {
        ActionKind::Fold => {
            if let Some(seat) = room.seat_mut(player_id) {
                seat.in_hand = false;
            }
            Chips::ZERO
        }

        ActionKind::Check => Chips::ZERO,

        // Call больше стека = олл-ин на остаток.
        ActionKind::Call => commit_chips(room, player_id, to_call),

        ActionKind::Bet(amount) => {
            let paid = commit_chips(room, player_id, amount);
            let new_bet = street_bet_before + paid;
            // Короткий олл-ин bet тоже открывает торговлю, шаг рейза не меньше BB.
            engine
                .betting
                .on_full_raise(player_id, new_bet, new_bet.max(big_blind));
            reopen_action(room, player_id);
            paid
        }

        ActionKind::Raise(total) => {
            let wanted = total.saturating_sub(street_bet_before);
            let paid = commit_chips(room, player_id, wanted);
            let new_bet = street_bet_before + paid;
            let raise_size = new_bet - current_bet_before;

            if raise_size >= engine.betting.min_raise {
                engine.betting.on_full_raise(player_id, new_bet, raise_size);
                reopen_action(room, player_id);
            } else {
                // Неполный олл-ин рейз: остальных не переоткрываем.
                engine.betting.on_short_raise(player_id, new_bet);
            }
            paid
        }
    };

    let (street_bet, stack_after, all_in) = match room.seat_mut(player_id) {
        Some(seat) => {
            seat.has_acted = true;
            (seat.street_bet, seat.stack, seat.all_in)
        }
        None => (Chips::ZERO, Chips::ZERO, false),
    };

    debug!(
        "room {}: hand {} {} {:?} moved={} pot={}",
        room.id, engine.hand_id, player_id, action, moved, room.pot
    );
    engine.push(RoomEvent::PlayerActed {
        player_id: player_id.to_string(),
        action,
        amount: moved,
        street_bet,
        stack_after,
        pot_after: room.pot,
        all_in,
    });

    let after = engine.rotation_index(player_id).unwrap_or(0);
    Ok(resolve_after(room, engine, after))
}

/// Снять отметку "походил" со всех, кто ещё может ставить, кроме агрессора.
fn reopen_action(room: &mut Room, aggressor: &str) {
    for seat in room.seats.iter_mut() {
        if seat.player_id != aggressor && seat.can_act() {
            seat.has_acted = false;
        }
    }
}

/// Сбросить игрока из раздачи вне очереди (уход из комнаты).
///
/// Если это был его ход – ход передаётся дальше, как после обычного fold.
/// Возвращает `None`, если игрок не участвовал в раздаче.
pub fn fold_out_of_turn(
    room: &mut Room,
    engine: &mut HandEngine,
    player_id: &str,
) -> Option<HandStatus> {
    if !room.hand_in_progress {
        return None;
    }
    let seat = room.seat_mut(player_id)?;
    if !seat.in_hand {
        return None;
    }
    seat.in_hand = false;
    seat.has_acted = true;
    let stack_after = seat.stack;
    let street_bet = seat.street_bet;

    engine.push(RoomEvent::PlayerActed {
        player_id: player_id.to_string(),
        action: ActionKind::Fold,
        amount: Chips::ZERO,
        street_bet,
        stack_after,
        pot_after: room.pot,
        all_in: false,
    });

    let was_turn = engine.current_actor.as_deref() == Some(player_id);
    if was_turn || room.in_hand_count() <= 1 {
        let after = engine.rotation_index(player_id).unwrap_or(0);
        return Some(resolve_after(room, engine, after));
    }

    // Ход остаётся у текущего игрока, но улица могла стать тривиальной.
    match engine.current_actor.clone() {
        Some(actor) if !street_is_settled_for(room, engine, &actor) => Some(HandStatus::Ongoing),
        _ => Some(finish_street(room, engine)),
    }
}

/// Выбрать следующего ходящего после позиции `after` или закрыть улицу.
fn resolve_after(room: &mut Room, engine: &mut HandEngine, after: usize) -> HandStatus {
    if room.in_hand_count() <= 1 {
        engine.current_actor = None;
        let result = finish_last_standing(room, engine);
        return end_hand(room, engine, result);
    }

    match next_to_act(room, &engine.rotation, after, engine.betting.current_bet) {
        Some(next) if !street_is_settled_for(room, engine, &next) => {
            engine.current_actor = Some(next);
            HandStatus::Ongoing
        }
        _ => finish_street(room, engine),
    }
}

/// Единственный, кто ещё может ставить, ничего не должен – торговаться не с кем.
fn street_is_settled_for(room: &Room, engine: &HandEngine, player_id: &str) -> bool {
    room.can_act_count() <= 1
        && room
            .seat(player_id)
            .map(|s| s.to_call(engine.betting.current_bet).is_zero())
            .unwrap_or(true)
}

/// Улица закрыта: следующая улица, автодокрутка борда или шоудаун.
fn finish_street(room: &mut Room, engine: &mut HandEngine) -> HandStatus {
    engine.current_actor = None;

    loop {
        // Ставить могут меньше двух – докручиваем борд без торговли.
        if room.can_act_count() < 2 {
            while room.street != Street::River {
                deal_next_street(room, engine);
            }
        }

        if room.street == Street::River {
            let result = finish_showdown(room, engine);
            return end_hand(room, engine, result);
        }

        deal_next_street(room, engine);

        if let Some(first) =
            first_to_act_postflop(room, &engine.rotation, engine.betting.current_bet)
        {
            engine.current_actor = Some(first);
            return HandStatus::Ongoing;
        }
    }
}

/// Открыть карты следующей улицы и сбросить ставки улицы.
fn deal_next_street(room: &mut Room, engine: &mut HandEngine) {
    let street = room.street.next();
    let cards = engine.deck.draw_n(street.cards_to_deal());
    room.board.extend_from_slice(&cards);
    room.street = street;

    for seat in room.seats.iter_mut() {
        seat.reset_for_street();
    }
    engine.betting = BettingState::for_new_street(street, room.config.stakes.big_blind);

    debug!(
        "room {}: hand {} {:?} dealt, board {:?}",
        room.id, engine.hand_id, street, room.board
    );
    engine.push(RoomEvent::StreetDealt {
        street,
        cards,
        board: room.board.clone(),
    });
}

/// Конец раздачи: сброс флагов, банк уже роздан.
fn end_hand(room: &mut Room, engine: &mut HandEngine, result: HandResult) -> HandStatus {
    room.street = Street::Showdown;
    room.hand_in_progress = false;
    room.pot = Chips::ZERO;
    for seat in room.seats.iter_mut() {
        seat.in_hand = false;
        seat.all_in = false;
        seat.has_acted = false;
        seat.street_bet = Chips::ZERO;
    }
    engine.current_actor = None;

    info!(
        "room {}: hand {} finished ({:?}), pot {}",
        room.id, result.hand_id, result.reason, result.pot
    );
    engine.push(RoomEvent::HandFinished(result.clone()));
    HandStatus::Finished(result)
}
