// src/bin/room_dev_cli.rs
//
// Dev-CLI: поднимает Hold'em- и Blackjack-комнаты на акторах и прогоняет
// несколько автоматических раздач. Логи – через RUST_LOG (env_logger).
//
//   cargo run --bin room_dev_cli -- [seed] [hands]

use std::time::Duration;

use card_room_engine::api::{ActionRequest, HoldemView, JoinRequest};
use card_room_engine::blackjack::{BlackjackRoom, BlackjackView, Phase};
use card_room_engine::config::{BlackjackConfig, RoomConfig, Stakes};
use card_room_engine::domain::hand::HandResult;
use card_room_engine::engine::RoomEvent;
use card_room_engine::infra::{DeterministicRng, IdGenerator};
use card_room_engine::room::{HoldemRoom, RoomActor, RoomHandle};
use card_room_engine::time_ctrl::TimeRules;

const PLAYERS: [&str; 3] = ["alice", "bob", "carol"];

/// Запросы на посадку в том виде, в каком они приходят от клиента.
const JOIN_REQUESTS: &str = r#"[
    {"player_id": "alice", "display_name": "Alice"},
    {"player_id": "bob", "display_name": "Bob"},
    {"player_id": "carol"}
]"#;

fn join_requests() -> Vec<JoinRequest> {
    match serde_json::from_str(JOIN_REQUESTS) {
        Ok(requests) => requests,
        Err(e) => {
            println!("bad join requests: {e}");
            Vec::new()
        }
    }
}

/// Простая "стратегия": check, если можно; иначе call; иногда raise/bet.
fn pick_action(view: &HoldemView, step: usize) -> ActionRequest {
    let Some(legal) = view.legal_actions.as_ref() else {
        return ActionRequest::new("fold", None);
    };

    if step % 7 == 3 {
        if let Some((min, _)) = legal.raise {
            return ActionRequest::new("raise", Some(min.0));
        }
        if let Some((min, _)) = legal.bet {
            return ActionRequest::new("bet", Some(min.0));
        }
    }
    if legal.check {
        ActionRequest::new("check", None)
    } else if legal.call.is_some() {
        ActionRequest::new("call", None)
    } else {
        ActionRequest::new("fold", None)
    }
}

fn print_result(result: &HandResult) {
    println!(
        "  hand #{} ({:?}), pot {}, board [{}]",
        result.hand_id,
        result.reason,
        result.pot,
        result
            .board
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    for w in &result.winners {
        println!(
            "    winner {} (+{}) {}",
            w.player_id,
            w.amount,
            w.description.as_deref().unwrap_or("")
        );
    }
}

async fn run_holdem_hand(handle: &RoomHandle<HoldemRoom>, idle: Option<&str>) {
    if let Err(e) = handle.start_hand().await {
        println!("  start rejected: {e}");
        return;
    }

    let mut step = 0usize;
    loop {
        let view = match handle.view(None).await {
            Ok(view) => view,
            Err(e) => {
                println!("  view failed: {e}");
                return;
            }
        };
        if !view.hand_in_progress {
            return;
        }
        let Some(actor) = view.current_actor.clone() else {
            return;
        };

        if Some(actor.as_str()) == idle {
            // Этот игрок "завис": ждём, пока сработает таймер хода.
            println!("  {actor} молчит, ждём auto-fold…");
            tokio::time::sleep(Duration::from_millis(1_200)).await;
            continue;
        }

        let own_view = match handle.view(Some(&actor)).await {
            Ok(v) => v,
            Err(_) => return,
        };
        let request = pick_action(&own_view, step);
        step += 1;
        if let Err(rejected) = handle.act(&actor, request.clone()).await {
            println!("  {actor}: {} отклонено ({})", request.action, rejected.reason);
            let _ = handle.act(&actor, ActionRequest::new("fold", None)).await;
        }
    }
}

async fn holdem_demo(ids: &IdGenerator, seed: u64, hands: usize) {
    println!("================ HOLD'EM =================");

    let config = RoomConfig {
        max_seats: 6,
        stakes: Stakes::new(10, 20),
        time: TimeRules::new(1),
        ..RoomConfig::default()
    };
    let room_id = ids.next_room_id();
    let handle = RoomActor::spawn(
        room_id,
        HoldemRoom::new(room_id, config),
        DeterministicRng::from_u64(seed),
    );

    for req in join_requests() {
        if let Err(e) = handle.join(&req.player_id, &req.display_name).await {
            println!("join {}: {e}", req.player_id);
        }
    }

    let mut updates = match handle.subscribe("observer", 256).await {
        Ok(rx) => rx,
        Err(e) => {
            println!("subscribe failed: {e}");
            return;
        }
    };

    for n in 0..hands {
        println!("--- hand {} ---", n + 1);
        // Во второй раздаче bob "засыпает" – проверяем auto-fold.
        let idle = if n == 1 { Some("bob") } else { None };
        run_holdem_hand(&handle, idle).await;

        while let Ok(update) = updates.try_recv() {
            for event in update.events {
                match event {
                    RoomEvent::HandFinished(result) => print_result(&result),
                    RoomEvent::TurnTimedOut { player_id } => {
                        println!("  таймаут: {player_id} сброшен")
                    }
                    _ => {}
                }
            }
        }
    }

    if let Ok(view) = handle.view(None).await {
        println!("стеки:");
        for seat in &view.seats {
            println!("  {:<8} {}", seat.player_id, seat.stack);
        }
    }
    let _ = handle.close().await;
}

fn print_blackjack(view: &BlackjackView) {
    if let Some(settlement) = &view.last_settlement {
        println!(
            "  дилер: {} очков [{}]",
            settlement.dealer_total,
            settlement
                .dealer_cards
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        for line in &settlement.lines {
            println!(
                "  {:<8} {:>2} очков {:?} ({:+})",
                line.player_id, line.total, line.outcome, line.net
            );
        }
    }
}

async fn blackjack_demo(ids: &IdGenerator, seed: u64, rounds: usize) {
    println!("================ BLACKJACK =================");

    let room_id = ids.next_room_id();
    let handle = RoomActor::spawn(
        room_id,
        BlackjackRoom::new(room_id, BlackjackConfig::default()),
        DeterministicRng::from_u64(seed),
    );
    for req in join_requests() {
        let _ = handle.join(&req.player_id, &req.display_name).await;
    }

    for n in 0..rounds {
        println!("--- round {} ---", n + 1);
        if let Err(e) = handle.start_hand().await {
            println!("  start rejected: {e}");
            break;
        }
        for pid in PLAYERS {
            let _ = handle.act(pid, ActionRequest::new("bet", Some(50))).await;
        }

        loop {
            let Ok(view) = handle.view(None).await else { return };
            match view.phase {
                Phase::Insurance => {
                    for pid in PLAYERS {
                        let _ = handle.act(pid, ActionRequest::new("insurance", Some(0))).await;
                    }
                }
                Phase::PlayerTurns => {
                    let Some(pid) = view.current_turn.clone() else { break };
                    let Ok(own) = handle.view(Some(&pid)).await else { return };
                    let total = own
                        .seats
                        .iter()
                        .find(|s| s.player_id == pid)
                        .and_then(|s| s.visible_total)
                        .unwrap_or(0);
                    let action = if total < 17 { "hit" } else { "stand" };
                    let _ = handle.act(&pid, ActionRequest::new(action, None)).await;
                }
                _ => {
                    print_blackjack(&view);
                    break;
                }
            }
        }
    }
    let _ = handle.close().await;
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let hands = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    println!("room_dev_cli: seed={seed}, hands={hands}");
    let ids = IdGenerator::new();
    holdem_demo(&ids, seed, hands).await;
    blackjack_demo(&ids, seed, hands).await;
}
