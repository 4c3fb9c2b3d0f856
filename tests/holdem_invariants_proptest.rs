//! Случайные последовательности легальных действий (proptest).
//!
//! После каждого шага проверяем инварианты:
//!   - стеки + банк = константа (фишки не рождаются и не пропадают);
//!   - банк = сумма внесённого за раздачу;
//!   - ходящий всегда в раздаче и не в олл-ине;
//!   - в конце раздачи банк роздан целиком.

use card_room_engine::config::{RoomConfig, Stakes};
use card_room_engine::domain::chips::Chips;
use card_room_engine::domain::Room;
use card_room_engine::engine::{
    apply_action, join_player, legal_actions, start_hand, ActionKind, HandEngine, HandStatus,
};
use card_room_engine::infra::DeterministicRng;
use proptest::prelude::*;

/// Выбрать легальное действие по "случайным" числам.
fn choose(room: &Room, engine: &HandEngine, pick: u8, size: u16) -> ActionKind {
    let actor = engine.current_actor.as_deref().unwrap();
    let seat = room.seat(actor).unwrap();
    let legal = legal_actions(seat, &engine.betting, room.config.stakes.big_blind);

    match pick % 4 {
        0 if legal.fold => ActionKind::Fold,
        2 | 3 => {
            let scale = |min: Chips, max: Chips| {
                let span = max.0 - min.0;
                Chips(min.0 + span * size as u64 / u16::MAX as u64)
            };
            if let Some((min, max)) = legal.raise {
                return ActionKind::Raise(scale(min, max));
            }
            if let Some((min, max)) = legal.bet {
                return ActionKind::Bet(scale(min, max));
            }
            if legal.check {
                ActionKind::Check
            } else {
                ActionKind::Call
            }
        }
        _ => {
            if legal.check {
                ActionKind::Check
            } else {
                ActionKind::Call
            }
        }
    }
}

fn assert_invariants(room: &Room, engine: &HandEngine, total: Chips) {
    assert_eq!(room.total_chips(), total, "фишки не сохраняются");
    if room.hand_in_progress {
        let committed: Chips = room.seats.iter().map(|s| s.total_bet).sum();
        assert_eq!(room.pot, committed, "банк != сумме ставок");
    }
    if let Some(actor) = engine.current_actor.as_deref() {
        let seat = room.seat(actor).unwrap();
        assert!(seat.in_hand && !seat.all_in, "ходит выбывший игрок {actor}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chips_are_conserved_under_random_play(
        seed in any::<u64>(),
        stacks in prop::collection::vec(30u64..3_000, 2..=6),
        moves in prop::collection::vec((any::<u8>(), any::<u16>()), 1..300),
    ) {
        let config = RoomConfig {
            stakes: Stakes::new(10, 20),
            ..RoomConfig::default()
        };
        let mut room = Room::new(1, config);
        for (i, stack) in stacks.iter().enumerate() {
            let pid = format!("p{i}");
            join_player(&mut room, &pid, "").unwrap();
            room.seat_mut(&pid).unwrap().stack = Chips(*stack);
        }
        let total = room.total_chips();

        let mut rng = DeterministicRng::from_u64(seed);
        let mut hand_id = 0;
        let mut hand: Option<HandEngine> = None;

        for (pick, size) in moves {
            if hand.is_none() {
                if room.eligible_players().len() < 2 {
                    break;
                }
                hand_id += 1;
                let (engine, status) = start_hand(&mut room, &mut rng, hand_id).unwrap();
                if let HandStatus::Finished(result) = status {
                    prop_assert_eq!(result.total_awarded(), result.pot);
                    continue;
                }
                hand = Some(engine);
            }
            let Some(engine) = hand.as_mut() else {
                continue;
            };

            let action = choose(&room, engine, pick, size);
            let actor = engine.current_actor.clone().unwrap();
            let status = apply_action(&mut room, engine, &actor, action);
            prop_assert!(status.is_ok(), "{actor} {action:?}: {:?}", status);

            assert_invariants(&room, engine, total);

            if let Ok(HandStatus::Finished(result)) = status {
                prop_assert_eq!(result.total_awarded(), result.pot);
                prop_assert!(!result.winners.is_empty());
                prop_assert_eq!(room.pot, Chips::ZERO);
                hand = None;
            }
        }

        prop_assert_eq!(room.total_chips(), total);
    }
}
