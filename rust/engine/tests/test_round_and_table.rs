use bluff_engine::config::EngineConfig;
use bluff_engine::deck::Deck;
use bluff_engine::errors::PokerError;
use bluff_engine::player::{HandHolder, Player};
use bluff_engine::round::Round;
use bluff_engine::table::{Table, Variant};

fn player_with(name: &str, cards: &str) -> Player {
    let mut p = Player::new(name, 100);
    p.set_hand(cards.parse().unwrap());
    p
}

#[test]
fn winner_is_strongest_hand() {
    let mut players = vec![
        player_with("a", "As Ah 4d Tc Js"),
        player_with("b", "3s 4h 5d 6c 7s"),
        player_with("c", "Qs Ah 4d Tc Js"),
    ];
    let round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(1));
    assert_eq!(
        round.values().iter().map(|v| v.get()).collect::<Vec<_>>(),
        vec![141414111004, 7000000000706050403, 1412111004]
    );
    assert_eq!(round.winner(), Some(1));
    assert_eq!(round.winners(), vec![1]);
}

#[test]
fn ties_go_to_first_player_but_winners_lists_all() {
    let mut players = vec![
        player_with("a", "2c 3d 4h 5s 7c"),
        player_with("b", "Ac Ad Kh Ks 9c"),
        player_with("c", "Ah As Kc Kd 9d"),
    ];
    let round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(1));
    assert_eq!(round.winner(), Some(1));
    assert_eq!(round.winners(), vec![1, 2]);
}

#[test]
fn empty_round_has_no_winner() {
    let mut players: Vec<Player> = Vec::new();
    let round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(1));
    assert_eq!(round.winner(), None);
    assert!(round.winners().is_empty());
}

#[test]
fn new_hand_deals_fresh_cards_to_everyone() {
    let mut players = vec![Player::new("a", 10), Player::new("b", 10)];
    players[0].set_hand("As Ks".parse().unwrap());
    {
        let mut round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(5));
        round.new_hand().unwrap();
        assert_eq!(round.deck().len(), 42);

        round.deal(1, 2).unwrap();
        assert_eq!(round.players()[1].hand().len(), 7);
        assert_eq!(
            round.deal(2, 1),
            Err(PokerError::InvalidSeat { seat: 2, seats: 2 })
        );
    }
    // Dealt cards stay with the players once the round is gone.
    assert_eq!(players[0].hand().len(), 5);
    assert_eq!(players[1].hand().len(), 7);
    assert!(players[0]
        .hand()
        .iter()
        .all(|c| !players[1].hand().contains(c)));
}

#[test]
fn dealing_past_52_cards_fails() {
    let mut players: Vec<Player> = (0..11).map(|i| Player::new(format!("p{i}"), 1)).collect();
    let mut round = Round::new(players.iter_mut().collect(), 5, Deck::new_with_seed(2));
    assert_eq!(round.new_hand(), Err(PokerError::NotEnoughCards));
}

#[test]
fn chips_never_go_negative() {
    let mut p = Player::new("Sam", 50);
    p.add_chips(25);
    p.remove_chips(70).unwrap();
    assert_eq!(p.chips(), 5);
    assert_eq!(
        p.remove_chips(6),
        Err(PokerError::InsufficientChips {
            requested: 6,
            available: 5
        })
    );
    assert_eq!(p.chips(), 5);
}

#[test]
fn table_needs_a_seat() {
    let err = Table::<Player>::with_seed(0, Variant::Stud, 1).unwrap_err();
    assert_eq!(err, PokerError::EmptyTable);
}

#[test]
fn seating_rules() {
    let mut table = Table::with_seed(3, Variant::Stud, 7).unwrap();
    table.add_player(Player::new("a", 1), 0).unwrap();
    assert_eq!(
        table.add_player(Player::new("b", 1), 0),
        Err(PokerError::SeatOccupied(0))
    );
    assert_eq!(
        table.add_player(Player::new("b", 1), 3),
        Err(PokerError::InvalidSeat { seat: 3, seats: 3 })
    );
    assert_eq!(
        table.add_players(vec![Player::new("b", 1), Player::new("c", 1), Player::new("d", 1)], None),
        Err(PokerError::TableFull)
    );
    table
        .add_players(vec![Player::new("b", 1), Player::new("c", 1)], None)
        .unwrap();
    assert_eq!(table.occupied(), 3);

    let removed = table.remove_player(0).unwrap();
    assert_eq!(removed.name(), "a");
    assert!(table.remove_player(0).is_none());
    assert!(table.remove_player(10).is_none());
}

#[test]
fn explicit_seats_pair_with_players_in_order() {
    let mut table = Table::with_seed(6, Variant::Holdem, 7).unwrap();
    table
        .add_players(
            vec![Player::new("x", 1), Player::new("y", 1)],
            Some(&[4, 2]),
        )
        .unwrap();
    assert_eq!(table.seats()[4].as_ref().map(|p| p.name()), Some("x"));
    assert_eq!(table.seats()[2].as_ref().map(|p| p.name()), Some("y"));
}

#[test]
fn explicit_seats_must_cover_every_player() {
    let mut table = Table::with_seed(6, Variant::Holdem, 7).unwrap();
    let players = vec![Player::new("a", 1), Player::new("b", 1), Player::new("c", 1)];
    assert_eq!(
        table.add_players(players, Some(&[1])),
        Err(PokerError::SeatCountMismatch {
            players: 3,
            seats: 1
        })
    );
    assert_eq!(table.occupied(), 0);
}

#[test]
fn failed_seating_leaves_table_unchanged() {
    let mut table = Table::with_seed(6, Variant::Holdem, 7).unwrap();
    table.add_player(Player::new("host", 1), 3).unwrap();

    let trio = || vec![Player::new("a", 1), Player::new("b", 1), Player::new("c", 1)];
    assert_eq!(
        table.add_players(trio(), Some(&[0, 3, 5])),
        Err(PokerError::SeatOccupied(3))
    );
    assert_eq!(
        table.add_players(trio(), Some(&[0, 1, 0])),
        Err(PokerError::SeatOccupied(0))
    );
    assert!(matches!(
        table.add_players(trio(), Some(&[0, 1, 6])),
        Err(PokerError::InvalidSeat { seat: 6, .. })
    ));
    assert_eq!(table.occupied(), 1);
    assert!(table.seats()[0].is_none());
}

#[test]
fn round_starts_with_dealer_and_wraps() {
    let mut table = Table::with_seed(5, Variant::Holdem, 3).unwrap();
    for (seat, name) in [(0, "zero"), (2, "two"), (4, "four")] {
        table.add_player(Player::new(name, 100), seat).unwrap();
    }
    table.set_dealer(2).unwrap();
    let names: Vec<String> = table
        .new_round()
        .unwrap()
        .players()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, ["two", "four", "zero"]);
}

#[test]
fn dealer_moves_forward_to_occupied_seat() {
    let mut table = Table::with_seed(6, Variant::Stud, 3).unwrap();
    table.add_player(Player::new("one", 100), 1).unwrap();
    table.add_player(Player::new("four", 100), 4).unwrap();

    table.set_dealer(5).unwrap();
    let first = table.new_round().unwrap().players()[0].name().to_string();
    assert_eq!(first, "one");
    assert_eq!(table.dealer(), 1);

    table.set_dealer(2).unwrap();
    table.new_round().unwrap();
    assert_eq!(table.dealer(), 4);

    assert_eq!(
        table.set_dealer(6),
        Err(PokerError::InvalidSeat { seat: 6, seats: 6 })
    );
}

#[test]
fn empty_table_cannot_start_a_round() {
    let mut table = Table::<Player>::with_seed(4, Variant::Holdem, 3).unwrap();
    assert_eq!(table.new_round().unwrap_err(), PokerError::EmptyTable);
}

#[test]
fn variants_deal_their_starting_cards() {
    for (variant, n) in [(Variant::Stud, 5), (Variant::Holdem, 2), (Variant::Chinese, 13)] {
        assert_eq!(variant.starting_cards(), n);
        let mut table = Table::with_seed(4, variant, 11).unwrap();
        table
            .add_players((0..4).map(|i| Player::new(format!("p{i}"), 1)).collect(), None)
            .unwrap();
        let round = table.new_round().unwrap();
        assert!(round.players().iter().all(|p| p.hand().len() == n));
        assert_eq!(round.deck().len(), 52 - 4 * n);
        drop(round);
        assert!(table
            .seats()
            .iter()
            .flatten()
            .all(|p| p.hand().len() == n));
    }
}

#[test]
fn seeded_tables_repeat_themselves() {
    let deal = |seed| {
        let mut table = Table::with_seed(4, Variant::Holdem, seed).unwrap();
        table
            .add_players(vec![Player::new("a", 1), Player::new("b", 1)], None)
            .unwrap();
        let dealer = table.dealer();
        let hands: Vec<String> = table
            .new_round()
            .unwrap()
            .players()
            .iter()
            .map(|p| p.hand().to_string())
            .collect();
        (dealer, hands)
    };
    assert_eq!(deal(99), deal(99));
}

#[test]
fn table_from_config_uses_seats_and_seed() {
    let config = EngineConfig {
        seats: 4,
        seed: Some(21),
        ..EngineConfig::default()
    };
    let a = Table::<Player>::from_config(&config, Variant::Stud).unwrap();
    let b = Table::<Player>::with_seed(4, Variant::Stud, 21).unwrap();
    assert_eq!(a.seats().len(), 4);
    assert_eq!(a.dealer(), b.dealer());
}
