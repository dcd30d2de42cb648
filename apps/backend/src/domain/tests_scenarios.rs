//! Round scenarios on the four-seat table, driven through the engines.

use time::OffsetDateTime;

use crate::domain::actions::ActionLog;
use crate::domain::dealing::deal_round;
use crate::domain::fixtures::{card, four_player_table, pid, public_types, table_with};
use crate::domain::game_transition::{settle, Settlement};
use crate::domain::state::{GameStatus, RoundState};
use crate::domain::swap::{resolve_swap, SwapOutcome};
use crate::domain::tally::{end_round, resolve_stick};

fn log() -> ActionLog {
    ActionLog::new(0, OffsetDateTime::UNIX_EPOCH)
}

#[test]
fn king_block_then_dealer_draw_then_end_round() {
    let mut table = four_player_table();
    let mut log = log();

    // P2 runs into P3's King.
    let outcome = resolve_swap(&mut table, &pid("P2"), &mut log).unwrap();
    assert!(matches!(outcome, SwapOutcome::KingBlock { .. }));

    // P3 cannot swap the King away, so sticks.
    resolve_stick(&mut table, &pid("P3"), &mut log).unwrap();
    assert_eq!(table.session.active_player, pid("P4"));

    // P4 swaps 2C for the dealer's 7S.
    resolve_swap(&mut table, &pid("P4"), &mut log).unwrap();
    assert_eq!(table.hand(&pid("P4")), Some(card("7S")));
    assert_eq!(table.hand(&pid("P1")), Some(card("2C")));
    assert_eq!(table.session.active_player, pid("P1"));

    // Dealer draws 5D, discarding 2C.
    resolve_swap(&mut table, &pid("P1"), &mut log).unwrap();
    assert_eq!(table.session.round_state, RoundState::Tallying);
    assert_eq!(table.deck.trash, vec![card("2C")]);

    let summary = end_round(&mut table, &pid("P1"), &mut log).unwrap();
    assert_eq!(summary.losers, vec![pid("P2")]);
    assert_eq!(table.session.lives_of(&pid("P2")), 2);
    assert_eq!(table.session.dealer, pid("P2"));
    assert_eq!(table.session.round, 2);
    table.check_card_conservation().unwrap();

    assert_eq!(
        public_types(log.records()),
        vec![
            "KUNG",
            "STICK",
            "SWAP_CARDS",
            "DEALER_DRAW",
            "REVEAL_CARDS",
            "TALLYING",
            "END_ROUND"
        ]
    );
    let seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
    assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn end_round_from_revealed_hands_charges_only_lowest() {
    // Dealer already drew 5D over 7S.
    let mut table = table_with(
        &[("P1", "5D"), ("P2", "4H"), ("P3", "KD"), ("P4", "2C")],
        "9S",
    );
    table.deck.draw.retain(|c| *c != card("7S"));
    table.deck.discard(card("7S"));
    table.session.round_state = RoundState::Tallying;
    table.session.active_player = pid("P1");
    let mut log = log();

    end_round(&mut table, &pid("P1"), &mut log).unwrap();

    assert_eq!(table.session.lives_of(&pid("P4")), 2);
    for p in ["P1", "P2", "P3"] {
        assert_eq!(table.session.lives_of(&pid(p)), 3);
    }
    assert_eq!(table.session.dealer, pid("P2"));
    assert_eq!(table.session.round, 2);
    assert_eq!(table.session.round_state, RoundState::PreDeal);
    assert!(table.hands.values().all(Option::is_none));
}

#[test]
fn two_player_game_plays_out_to_a_winner() {
    let mut table = table_with(&[("P1", "9S"), ("P2", "AH")], "5D");
    table.session.lives.insert(pid("P1"), 1);
    table.session.lives.insert(pid("P2"), 1);
    let mut log = log();

    // P2 sticks on the Ace, dealer P1 sticks too.
    resolve_stick(&mut table, &pid("P2"), &mut log).unwrap();
    assert_eq!(table.session.active_player, pid("P1"));
    resolve_stick(&mut table, &pid("P1"), &mut log).unwrap();

    let summary = end_round(&mut table, &pid("P1"), &mut log).unwrap();
    assert!(summary.game_ended);
    assert_eq!(
        settle(&mut table),
        Settlement::Ended {
            winner: Some(pid("P1"))
        }
    );
    assert_eq!(table.session.status, GameStatus::Ended);
}

#[test]
fn next_round_deals_from_new_dealer() {
    let mut table = four_player_table();
    table.session.active_player = pid("P1");
    let mut log = log();

    resolve_stick(&mut table, &pid("P1"), &mut log).unwrap();
    end_round(&mut table, &pid("P1"), &mut log).unwrap();
    let order = deal_round(&mut table, &pid("P2"), &mut log).unwrap();

    assert_eq!(order, vec![pid("P3"), pid("P4"), pid("P1"), pid("P2")]);
    assert_eq!(table.session.active_player, pid("P3"));
    assert_eq!(table.session.round_state, RoundState::Playing);
    table.check_card_conservation().unwrap();
}
