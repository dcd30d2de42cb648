// Proptest generators for domain types.
// Tables are always dealt from a shuffled full deck, so card conservation
// holds for every generated value.

use proptest::prelude::*;

use crate::domain::deck::DeckState;
use crate::domain::state::{GameSession, GameStatus, PlayerId, RoundState};
use crate::domain::table::Table;

/// Player ids `P1..=Pn`.
pub fn seats(n: usize) -> Vec<PlayerId> {
    (1..=n).map(|i| PlayerId::new(format!("P{i}"))).collect()
}

/// One step a player may attempt on a table.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Deal,
    Swap,
    Stick,
    EndRound,
}

pub fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::Deal),
        6 => Just(Step::Swap),
        3 => Just(Step::Stick),
        1 => Just(Step::EndRound),
    ]
}

/// An Active table in PreDeal with 2..=8 players and 1..=3 lives each.
pub fn pre_deal_table() -> impl Strategy<Value = Table> {
    (2usize..=8, 1u8..=3, any::<u64>()).prop_map(|(n, lives, seed)| {
        let players = seats(n);
        let session = GameSession {
            id: 1,
            lives: players.iter().map(|p| (p.clone(), lives)).collect(),
            host: players[0].clone(),
            dealer: players[0].clone(),
            active_player: players[0].clone(),
            players,
            round: 1,
            round_state: RoundState::PreDeal,
            status: GameStatus::Active,
            winner: None,
            rng_seed: seed,
            reshuffles: 0,
            pending_tally: None,
            lock_version: 0,
        };
        Table::new(session, DeckState::shuffled(seed))
    })
}
