//! Интеграционные тесты машины ставок Hold'em.
//!
//! Проверяем:
//! - блайнды и первый ход (хедз-ап и 3 игрока);
//! - переход Preflop -> Flop после call/check;
//! - короткий call олл-ином и автодокрутку борда;
//! - полный рейз переоткрывает торговлю, неполный олл-ин рейз – нет;
//! - отклонённые действия (OutOfTurn, InvalidAction, IllegalAmount) не меняют состояние.

use card_room_engine::api::ActionRequest;
use card_room_engine::config::{RoomConfig, Stakes};
use card_room_engine::domain::card::parse_cards;
use card_room_engine::domain::chips::Chips;
use card_room_engine::domain::hand::Street;
use card_room_engine::domain::Room;
use card_room_engine::engine::{
    apply_action, join_player, legal_actions, start_hand, ActionKind, EngineError, HandEngine,
    HandStatus, RoomEvent,
};
use card_room_engine::infra::{DeterministicRng, StackedRng};
use card_room_engine::room::{CardGame, HoldemRoom};

/// Комната 10/20, стек 1000, игроки садятся в порядке `players`.
fn make_room(players: &[&str]) -> Room {
    let config = RoomConfig {
        stakes: Stakes::new(10, 20),
        buy_in: Chips(1000),
        ..RoomConfig::default()
    };
    let mut room = Room::new(1, config);
    for pid in players {
        join_player(&mut room, pid, "").expect("join");
    }
    room
}

fn start(room: &mut Room) -> (HandEngine, HandStatus) {
    let mut rng = DeterministicRng::from_u64(7);
    start_hand(room, &mut rng, 1).expect("start_hand")
}

fn act(room: &mut Room, engine: &mut HandEngine, pid: &str, action: ActionKind) -> HandStatus {
    apply_action(room, engine, pid, action)
        .unwrap_or_else(|e| panic!("{pid} {action:?} отклонено: {e}"))
}

fn stack(room: &Room, pid: &str) -> u64 {
    room.seat(pid).expect("seat").stack.0
}

// ===== ТЕСТ 1: хедз-ап, блайнды и первый ход =====

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut room = make_room(&["A", "B"]);
    let (engine, status) = start(&mut room);

    assert_eq!(status, HandStatus::Ongoing);
    assert_eq!(room.button_player.as_deref(), Some("A"));
    assert_eq!(engine.small_blind, "A");
    assert_eq!(engine.big_blind, "B");
    assert_eq!(engine.current_actor.as_deref(), Some("A"));

    assert_eq!(stack(&room, "A"), 990);
    assert_eq!(stack(&room, "B"), 980);
    assert_eq!(room.pot, Chips(30));
    assert_eq!(engine.betting.current_bet, Chips(20));
    assert_eq!(engine.betting.min_raise, Chips(20));

    for seat in &room.seats {
        assert_eq!(seat.hole_cards.len(), 2);
        assert!(seat.in_hand);
    }
    assert_eq!(engine.deck.len(), 48);
}

#[test]
fn heads_up_call_check_moves_to_flop() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);

    let status = act(&mut room, &mut engine, "A", ActionKind::Call);
    assert_eq!(status, HandStatus::Ongoing);
    assert_eq!(room.pot, Chips(40));
    assert_eq!(stack(&room, "A"), 980);
    // У большого блайнда остаётся опция.
    assert_eq!(engine.current_actor.as_deref(), Some("B"));

    act(&mut room, &mut engine, "B", ActionKind::Check);

    assert_eq!(room.street, Street::Flop);
    assert_eq!(room.board.len(), 3);
    assert_eq!(engine.betting.current_bet, Chips::ZERO);
    assert_eq!(engine.betting.min_raise, Chips(20));
    // Постфлоп первым ходит игрок слева от кнопки (BB в хедз-апе).
    assert_eq!(engine.current_actor.as_deref(), Some("B"));
    for seat in &room.seats {
        assert_eq!(seat.street_bet, Chips::ZERO);
        assert!(!seat.has_acted);
    }
}

#[test]
fn streets_advance_to_showdown_when_everyone_checks() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);

    act(&mut room, &mut engine, "A", ActionKind::Call);
    act(&mut room, &mut engine, "B", ActionKind::Check);

    let mut last = HandStatus::Ongoing;
    for (street, board_len) in [(Street::Flop, 3), (Street::Turn, 4), (Street::River, 5)] {
        assert_eq!(room.street, street);
        assert_eq!(room.board.len(), board_len);
        act(&mut room, &mut engine, "B", ActionKind::Check);
        last = act(&mut room, &mut engine, "A", ActionKind::Check);
    }

    let HandStatus::Finished(result) = last else {
        panic!("раздача должна закончиться после ривера");
    };
    assert_eq!(result.pot, Chips(40));
    assert_eq!(result.total_awarded(), Chips(40));
    assert!(!room.hand_in_progress);
    assert_eq!(room.total_chips(), Chips(2000));
}

// ===== ТЕСТ 2: три игрока =====

#[test]
fn three_handed_blinds_left_of_button_and_button_acts_first() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    let (engine, _) = start(&mut room);

    assert_eq!(room.button_player.as_deref(), Some("P1"));
    assert_eq!(engine.rotation, vec!["P2", "P3", "P1"]);
    assert_eq!(engine.small_blind, "P2");
    assert_eq!(engine.big_blind, "P3");
    assert_eq!(engine.current_actor.as_deref(), Some("P1"));
}

#[test]
fn button_moves_each_hand() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    let mut rng = DeterministicRng::from_u64(1);

    for (hand_id, expected) in [(1, "P1"), (2, "P2"), (3, "P3"), (4, "P1")] {
        let (mut engine, _) = start_hand(&mut room, &mut rng, hand_id).unwrap();
        assert_eq!(room.button_player.as_deref(), Some(expected));

        // Все сбрасывают до большого блайнда.
        while let Some(actor) = engine.current_actor.clone() {
            if apply_action(&mut room, &mut engine, &actor, ActionKind::Fold)
                .unwrap()
                .is_finished()
            {
                break;
            }
        }
        assert!(!room.hand_in_progress);
    }
}

#[test]
fn fold_to_big_blind_awards_pot_uncontested() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    let (mut engine, _) = start(&mut room);

    act(&mut room, &mut engine, "P1", ActionKind::Fold);
    let status = act(&mut room, &mut engine, "P2", ActionKind::Fold);

    let HandStatus::Finished(result) = status else {
        panic!("после двух фолдов раздача закончена");
    };
    assert_eq!(result.winners.len(), 1);
    assert_eq!(result.winners[0].player_id, "P3");
    assert_eq!(result.winners[0].amount, Chips(30));
    assert!(result.winners[0].hole_cards.is_none());
    assert!(result.showdown.is_empty());
    assert_eq!(stack(&room, "P3"), 1010);
    assert_eq!(stack(&room, "P2"), 990);
    assert!(room.revealed.is_empty());
}

// ===== ТЕСТ 3: короткий call олл-ином =====

#[test]
fn short_call_goes_all_in_and_runs_out_board() {
    let mut room = make_room(&["A", "B"]);
    room.seat_mut("A").unwrap().stack = Chips(35);
    let total = room.total_chips();

    let (mut engine, _) = start(&mut room);
    act(&mut room, &mut engine, "A", ActionKind::Call);
    act(&mut room, &mut engine, "B", ActionKind::Check);
    assert_eq!(stack(&room, "A"), 15);

    act(&mut room, &mut engine, "B", ActionKind::Bet(Chips(50)));
    let status = act(&mut room, &mut engine, "A", ActionKind::Call);

    // A вносит только 15 и идёт в олл-ин; торговаться дальше некому.
    let HandStatus::Finished(result) = status else {
        panic!("после олл-ина борд докручивается до шоудауна");
    };
    assert_eq!(result.pot, Chips(40 + 50 + 15));
    assert_eq!(result.board.len(), 5);
    assert_eq!(result.showdown.len(), 2);
    assert_eq!(room.total_chips(), total);

    let dealt: Vec<Street> = engine
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            RoomEvent::StreetDealt { street, .. } => Some(street),
            _ => None,
        })
        .collect();
    assert_eq!(dealt, vec![Street::Flop, Street::Turn, Street::River]);
}

#[test]
fn blind_is_capped_at_stack() {
    let mut room = make_room(&["A", "B"]);
    room.seat_mut("B").unwrap().stack = Chips(15);

    let (mut engine, status) = start(&mut room);
    assert_eq!(status, HandStatus::Ongoing);
    assert_eq!(engine.betting.current_bet, Chips(15));
    assert!(room.seat("B").unwrap().all_in);

    // A доставляет 5 – и доигрывать больше не с кем.
    let status = act(&mut room, &mut engine, "A", ActionKind::Call);
    assert!(status.is_finished());
    assert_eq!(room.board.len(), 5);
    assert_eq!(room.total_chips(), Chips(1015));
}

#[test]
fn preflop_all_in_and_call_runs_out() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);

    act(&mut room, &mut engine, "A", ActionKind::Raise(Chips(1000)));
    assert!(room.seat("A").unwrap().all_in);
    assert_eq!(engine.current_actor.as_deref(), Some("B"));

    let status = act(&mut room, &mut engine, "B", ActionKind::Call);
    let HandStatus::Finished(result) = status else {
        panic!("оба в олл-ине – шоудаун");
    };
    assert_eq!(result.pot, Chips(2000));
    assert_eq!(result.total_awarded(), Chips(2000));
    assert_eq!(room.total_chips(), Chips(2000));
}

// ===== ТЕСТ 4: полный рейз переоткрывает торговлю =====

#[test]
fn full_raise_reopens_action() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    let (mut engine, _) = start(&mut room);

    act(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(60)));
    assert_eq!(engine.betting.current_bet, Chips(60));
    assert_eq!(engine.betting.min_raise, Chips(40));
    assert_eq!(engine.betting.last_aggressor.as_deref(), Some("P1"));

    act(&mut room, &mut engine, "P2", ActionKind::Call);
    act(&mut room, &mut engine, "P3", ActionKind::Raise(Chips(200)));
    assert_eq!(engine.betting.min_raise, Chips(140));

    // P1 и P2 снова могут рейзить.
    assert_eq!(engine.current_actor.as_deref(), Some("P1"));
    assert!(!room.seat("P1").unwrap().has_acted);
    assert!(!room.seat("P2").unwrap().has_acted);

    let err = apply_action(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(300)))
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAmount(_)));

    act(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(340)));
    assert_eq!(engine.betting.current_bet, Chips(340));
    assert_eq!(engine.current_actor.as_deref(), Some("P2"));
}

// ===== ТЕСТ 5: неполный олл-ин рейз не переоткрывает =====

#[test]
fn short_all_in_raise_does_not_reopen_for_players_who_acted() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    room.seat_mut("P2").unwrap().stack = Chips(80);
    let (mut engine, _) = start(&mut room);

    act(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(60)));
    // P2 (SB) идёт олл-ином до 80: прибавка 20 < минимального шага 40.
    act(&mut room, &mut engine, "P2", ActionKind::Raise(Chips(80)));
    assert!(room.seat("P2").unwrap().all_in);
    assert_eq!(engine.betting.current_bet, Chips(80));
    assert_eq!(engine.betting.min_raise, Chips(40));

    // P3 ещё не ходил – ему рейз доступен, но он уравнивает.
    act(&mut room, &mut engine, "P3", ActionKind::Call);

    assert_eq!(engine.current_actor.as_deref(), Some("P1"));
    let p1 = room.seat("P1").unwrap();
    let legal = legal_actions(p1, &engine.betting, Chips(20));
    assert_eq!(legal.call, Some(Chips(20)));
    assert!(legal.raise.is_none());

    let pot_before = room.pot;
    let err = apply_action(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(200)))
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAmount(_)));
    assert_eq!(room.pot, pot_before);

    act(&mut room, &mut engine, "P1", ActionKind::Call);
    assert_eq!(room.street, Street::Flop);
    // P2 в олл-ине, первым на флопе ходит P3.
    assert_eq!(engine.current_actor.as_deref(), Some("P3"));
    assert_eq!(room.pot, Chips(240));
}

// ===== ТЕСТ 6: bet и его минимум =====

#[test]
fn bet_sets_min_raise_and_reopens() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);
    act(&mut room, &mut engine, "A", ActionKind::Call);
    act(&mut room, &mut engine, "B", ActionKind::Check);

    let err = apply_action(&mut room, &mut engine, "B", ActionKind::Bet(Chips(10))).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAmount(_)));

    act(&mut room, &mut engine, "B", ActionKind::Bet(Chips(60)));
    assert_eq!(engine.betting.current_bet, Chips(60));
    assert_eq!(engine.betting.min_raise, Chips(60));
    assert_eq!(engine.current_actor.as_deref(), Some("A"));

    let err = apply_action(&mut room, &mut engine, "A", ActionKind::Check).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAmount(_)));
}

// ===== ТЕСТ 7: ошибки действий =====

#[test]
fn rejected_actions_do_not_change_state() {
    let mut room = make_room(&["P1", "P2", "P3"]);
    let (mut engine, _) = start(&mut room);
    let room_before = room.clone();
    let betting_before = engine.betting.clone();

    assert_eq!(
        apply_action(&mut room, &mut engine, "P2", ActionKind::Call),
        Err(EngineError::OutOfTurn("P2".into()))
    );
    assert_eq!(
        apply_action(&mut room, &mut engine, "ghost", ActionKind::Fold),
        Err(EngineError::UnknownPlayer("ghost".into()))
    );
    assert!(matches!(
        apply_action(&mut room, &mut engine, "P1", ActionKind::Check),
        Err(EngineError::IllegalAmount(_))
    ));
    assert!(matches!(
        apply_action(&mut room, &mut engine, "P1", ActionKind::Bet(Chips(40))),
        Err(EngineError::IllegalAmount(_))
    ));
    // Рейз до 30: прибавка 10 меньше минимальной.
    assert!(matches!(
        apply_action(&mut room, &mut engine, "P1", ActionKind::Raise(Chips(30))),
        Err(EngineError::IllegalAmount(_))
    ));

    assert_eq!(room, room_before);
    assert_eq!(engine.betting, betting_before);
    assert_eq!(engine.current_actor.as_deref(), Some("P1"));
}

#[test]
fn action_names_are_parsed() {
    assert_eq!(ActionKind::parse("FOLD", None), Ok(ActionKind::Fold));
    assert_eq!(ActionKind::parse(" check ", None), Ok(ActionKind::Check));
    assert_eq!(
        ActionKind::parse("raise", Some(120)),
        Ok(ActionKind::Raise(Chips(120)))
    );
    assert_eq!(
        ActionKind::parse("jump", None),
        Err(EngineError::InvalidAction("jump".into()))
    );
    assert!(matches!(
        ActionKind::parse("bet", None),
        Err(EngineError::IllegalAmount(_))
    ));
    assert!(matches!(
        ActionKind::parse("raise", Some(0)),
        Err(EngineError::IllegalAmount(_))
    ));
}

#[test]
fn call_with_nothing_to_call_is_rejected() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);
    act(&mut room, &mut engine, "A", ActionKind::Call);

    assert!(matches!(
        apply_action(&mut room, &mut engine, "B", ActionKind::Call),
        Err(EngineError::IllegalAmount(_))
    ));
}

// ===== ТЕСТ 8: старт раздачи =====

#[test]
fn start_requires_two_players_and_no_hand_in_progress() {
    let mut lonely = make_room(&["A"]);
    let mut rng = DeterministicRng::from_u64(3);
    assert_eq!(
        start_hand(&mut lonely, &mut rng, 1).unwrap_err(),
        EngineError::NotEnoughPlayers
    );

    let mut room = make_room(&["A", "B"]);
    let _hand = start_hand(&mut room, &mut rng, 1).unwrap();
    assert_eq!(
        start_hand(&mut room, &mut rng, 2).unwrap_err(),
        EngineError::GameAlreadyInProgress
    );
}

#[test]
fn rejected_start_does_not_burn_hand_id() {
    let mut game = HoldemRoom::new(1, RoomConfig::default());
    let mut rng = DeterministicRng::from_u64(7);
    game.join("A", "").unwrap();
    assert_eq!(
        game.start_round(&mut rng).unwrap_err(),
        EngineError::NotEnoughPlayers
    );

    game.join("B", "").unwrap();
    game.start_round(&mut rng).unwrap();
    assert_eq!(game.hand().unwrap().hand_id, 1);
    assert_eq!(
        game.start_round(&mut rng).unwrap_err(),
        EngineError::GameAlreadyInProgress
    );

    game.handle_action("A", &ActionRequest::new("fold", None))
        .unwrap();
    game.start_round(&mut rng).unwrap();
    assert_eq!(game.hand().unwrap().hand_id, 2);
}

#[test]
fn hole_cards_dealt_one_per_pass() {
    let mut room = make_room(&["A", "B", "C"]);
    let top = parse_cards("As Ks Qs Js Ts 9s").unwrap();
    start_hand(&mut room, &mut StackedRng::new(top.clone()), 1).unwrap();

    // Кнопка A, раздача слева от неё: B, C, A – по карте за круг.
    let hole = |pid: &str| room.seat(pid).unwrap().hole_cards.clone();
    assert_eq!(hole("B"), vec![top[0], top[3]]);
    assert_eq!(hole("C"), vec![top[1], top[4]]);
    assert_eq!(hole("A"), vec![top[2], top[5]]);
}

#[test]
fn broke_players_sit_out() {
    let mut room = make_room(&["A", "B", "C"]);
    room.seat_mut("B").unwrap().stack = Chips::ZERO;

    let (engine, _) = start(&mut room);
    assert_eq!(engine.rotation.len(), 2);
    assert!(!room.seat("B").unwrap().in_hand);
    assert!(room.seat("B").unwrap().hole_cards.is_empty());
}

#[test]
fn events_describe_hand_start_and_blinds() {
    let mut room = make_room(&["A", "B"]);
    let (mut engine, _) = start(&mut room);

    let events = engine.take_events();
    assert!(matches!(
        &events[0],
        RoomEvent::HandStarted { hand_id: 1, button, .. } if button == "A"
    ));
    assert_eq!(
        events[1],
        RoomEvent::BlindsPosted {
            small_blind: ("A".into(), Chips(10)),
            big_blind: ("B".into(), Chips(20)),
        }
    );
    assert!(engine.take_events().is_empty());
}
