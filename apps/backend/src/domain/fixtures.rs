//! Test fixtures for domain unit tests.

use std::collections::BTreeMap;

use crate::domain::cards_types::full_deck;
use crate::domain::deck::DeckState;
use crate::domain::state::{GameSession, GameStatus, PlayerId, RoundState};
use crate::domain::table::Table;
use crate::domain::Card;

pub fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

pub fn card(token: &str) -> Card {
    token.parse().expect("fixture card token")
}

/// Active session in Playing: seats in the order given, 3 lives each,
/// dealer = first seat, active = second seat. The remaining cards sit in
/// the draw pile with `top_of_draw` on top; trash is empty.
pub fn table_with(hands: &[(&str, &str)], top_of_draw: &str) -> Table {
    let players: Vec<PlayerId> = hands.iter().map(|(p, _)| pid(p)).collect();
    let lives: BTreeMap<PlayerId, u8> = players.iter().map(|p| (p.clone(), 3)).collect();

    let session = GameSession {
        id: 1,
        players: players.clone(),
        host: players[0].clone(),
        lives,
        dealer: players[0].clone(),
        active_player: players[1].clone(),
        round: 1,
        round_state: RoundState::Playing,
        status: GameStatus::Active,
        winner: None,
        rng_seed: 99,
        reshuffles: 0,
        pending_tally: None,
        lock_version: 0,
    };

    let held: Vec<Card> = hands.iter().map(|(_, c)| card(c)).collect();
    let top = card(top_of_draw);
    let mut draw: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !held.contains(c) && *c != top)
        .collect();
    draw.push(top);

    let mut table = Table::new(
        session,
        DeckState {
            draw,
            trash: Vec::new(),
        },
    );
    for (p, c) in hands {
        table.set_hand(&pid(p), Some(card(c)));
    }
    table
}

/// Seats [P1, P2, P3, P4], dealer P1, active P2,
/// hands {P1: 7S, P2: 4H, P3: KD, P4: 2C}, 5D on top of the draw pile.
pub fn four_player_table() -> Table {
    table_with(
        &[("P1", "7S"), ("P2", "4H"), ("P3", "KD"), ("P4", "2C")],
        "5D",
    )
}

/// Public (non-private) record type names, in order.
pub fn public_types(records: &[crate::domain::actions::ActionRecord]) -> Vec<&'static str> {
    records
        .iter()
        .filter(|r| !r.kind.is_private())
        .map(|r| r.kind.type_name())
        .collect()
}
