//! Интеграционные тесты для доменной модели (crate::domain).

use card_room_engine::domain::*;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Разбор и печать карт: `T` и `10` – одна и та же десятка.
#[test]
fn card_parse_and_display() {
    let ten: Card = "10d".parse().unwrap();
    assert_eq!(ten, c(Rank::Ten, Suit::Diamonds));
    assert_eq!("Td".parse::<Card>().unwrap(), ten);
    assert_eq!(ten.to_string(), "Td");

    assert_eq!("ah".parse::<Card>().unwrap(), c(Rank::Ace, Suit::Hearts));
    assert_eq!(c(Rank::Seven, Suit::Clubs).to_string(), "7c");

    let cards = parse_cards("Ah Kd  7c").unwrap();
    assert_eq!(
        cards,
        vec![
            c(Rank::Ace, Suit::Hearts),
            c(Rank::King, Suit::Diamonds),
            c(Rank::Seven, Suit::Clubs),
        ]
    );
}

#[test]
fn card_parse_errors() {
    assert_eq!("".parse::<Card>(), Err(CardParseError::BadLength(String::new())));
    assert_eq!("A".parse::<Card>(), Err(CardParseError::BadLength("A".into())));
    assert_eq!("1d".parse::<Card>(), Err(CardParseError::BadRank("1".into())));
    assert_eq!("Ax".parse::<Card>(), Err(CardParseError::BadSuit('x')));
    assert!(parse_cards("Ah Zz").is_err());
}

#[test]
fn rank_values() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::from_value(11), Some(Rank::Jack));
    assert_eq!(Rank::from_value(1), None);
    assert!(Rank::King < Rank::Ace);
}

/// Стандартная колода: 52 разные карты, верх колоды = конец вектора.
#[test]
fn deck_standard_and_draw_order() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut unique = deck.cards.clone();
    unique.sort_by_key(|card| (card.suit.index(), card.rank.value()));
    unique.dedup();
    assert_eq!(unique.len(), 52);

    assert_eq!(deck.draw_one(), Some(c(Rank::Ace, Suit::Spades)));
    let next = deck.draw_n(2);
    assert_eq!(next, vec![c(Rank::King, Suit::Spades), c(Rank::Queen, Suit::Spades)]);
    assert_eq!(deck.len(), 49);

    // Больше, чем осталось, – отдаёт всё, что есть.
    let rest = deck.draw_n(100);
    assert_eq!(rest.len(), 49);
    assert!(deck.is_empty());
    assert_eq!(deck.draw_one(), None);
}

#[test]
fn chips_arithmetic_never_goes_negative() {
    assert_eq!(Chips(10) - Chips(25), Chips::ZERO);
    assert_eq!(Chips(10).saturating_sub(Chips(3)), Chips(7));

    let mut pot = Chips(5);
    pot += Chips(20);
    pot -= Chips(100);
    assert!(pot.is_zero());

    let total: Chips = [Chips(1), Chips(2), Chips(3)].into_iter().sum();
    assert_eq!(total, Chips(6));
}

#[test]
fn chips_split_gives_share_and_remainder() {
    assert_eq!(Chips(25).split(2), (Chips(12), Chips(1)));
    assert_eq!(Chips(100).split(3), (Chips(33), Chips(1)));
    assert_eq!(Chips(7).split(0), (Chips::ZERO, Chips(7)));
}

/// Сериализация фишек – просто число.
#[test]
fn chips_serialize_as_plain_number() {
    assert_eq!(serde_json::to_string(&Chips(150)).unwrap(), "150");
    assert_eq!(serde_json::from_str::<Chips>("42").unwrap(), Chips(42));
}

// ===== места =====

#[test]
fn seat_commit_caps_at_stack_and_marks_all_in() {
    let mut seat = Seat::new("p1".into(), "P".into(), Chips(50));
    seat.in_hand = true;

    assert_eq!(seat.commit(Chips(20)), Chips(20));
    assert_eq!(seat.stack, Chips(30));
    assert_eq!(seat.street_bet, Chips(20));
    assert!(!seat.all_in);

    assert_eq!(seat.commit(Chips(100)), Chips(30));
    assert!(seat.stack.is_zero());
    assert!(seat.all_in);
    assert_eq!(seat.total_bet, Chips(50));
    assert!(!seat.can_act());
}

#[test]
fn seat_needs_to_act() {
    let mut seat = Seat::new("p1".into(), "P".into(), Chips(100));
    seat.in_hand = true;
    assert!(seat.needs_to_act(Chips::ZERO));

    seat.has_acted = true;
    assert!(!seat.needs_to_act(Chips::ZERO));
    // Ставку подняли – снова нужно ходить.
    assert!(seat.needs_to_act(Chips(40)));
    assert_eq!(seat.to_call(Chips(40)), Chips(40));

    seat.reset_for_street();
    assert!(!seat.has_acted);
    assert!(seat.street_bet.is_zero());
}

#[test]
fn display_names() {
    assert_eq!(default_display_name("abcdef"), "Player_abcd");
    assert_eq!(default_display_name("ab"), "Player_ab");
    assert_eq!(normalize_display_name("abcdef", "  Alice "), "Alice");
    assert_eq!(normalize_display_name("abcdef", "   "), "Player_abcd");
}

#[test]
fn street_progression() {
    assert_eq!(Street::Preflop.next(), Street::Flop);
    assert_eq!(Street::River.next(), Street::Showdown);
    assert_eq!(Street::Showdown.next(), Street::Showdown);
    assert_eq!(Street::Flop.cards_to_deal(), 3);
    assert_eq!(Street::Turn.cards_to_deal(), 1);
    assert_eq!(Street::Preflop.cards_to_deal(), 0);
}
