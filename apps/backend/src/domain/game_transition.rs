//! Session lifecycle transitions: gathering, start, and settlement.

use std::collections::{BTreeMap, HashSet};

use crate::domain::actions::{ActionKind, ActionLog};
use crate::domain::deck::DeckState;
use crate::domain::rules::MIN_PLAYERS;
use crate::domain::seed_derivation::derive_opening_seed;
use crate::domain::state::{GameSession, GameStatus, PlayerId, RoundState, SessionId};
use crate::domain::table::Table;
use crate::errors::domain::{DomainError, ValidationKind};

/// Build a Gathering table for `players` seated in the given order.
///
/// Emits one PlayerJoined per seat.
pub fn gather(
    id: SessionId,
    host: &PlayerId,
    players: Vec<PlayerId>,
    max_players: usize,
    rng_seed: u64,
    log: &mut ActionLog,
) -> Result<Table, DomainError> {
    if !(MIN_PLAYERS..=max_players).contains(&players.len()) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!(
                "A game needs {MIN_PLAYERS} to {max_players} players, got {}",
                players.len()
            ),
        ));
    }
    let mut seen = HashSet::with_capacity(players.len());
    if let Some(dup) = players.iter().find(|p| !seen.insert(*p)) {
        return Err(DomainError::validation(
            ValidationKind::DuplicatePlayer,
            format!("Player {dup} is seated twice"),
        ));
    }
    if !players.contains(host) {
        return Err(DomainError::validation(
            ValidationKind::Other("HOST_NOT_SEATED".into()),
            "The host must be seated",
        ));
    }

    let session = GameSession {
        id,
        lives: players.iter().map(|p| (p.clone(), 0)).collect::<BTreeMap<_, _>>(),
        players,
        host: host.clone(),
        dealer: host.clone(),
        active_player: host.clone(),
        round: 1,
        round_state: RoundState::PreDeal,
        status: GameStatus::Gathering,
        winner: None,
        rng_seed,
        reshuffles: 0,
        pending_tally: None,
        lock_version: 0,
    };

    for player in &session.players {
        log.push(
            player,
            ActionKind::PlayerJoined {
                username: player.to_string(),
            },
        );
    }

    Ok(Table::new(session, DeckState::default()))
}

/// Gathering → Active. Status and host checks belong to the caller.
pub fn start(table: &mut Table, starting_lives: u8, log: &mut ActionLog) -> Result<(), DomainError> {
    if starting_lives == 0 {
        return Err(DomainError::validation(
            ValidationKind::Other("INVALID_STARTING_LIVES".into()),
            "Players must start with at least one life",
        ));
    }

    let session = &mut table.session;
    for lives in session.lives.values_mut() {
        *lives = starting_lives;
    }
    session.status = GameStatus::Active;
    session.dealer = session.host.clone();
    session.active_player = session.host.clone();
    session.round = 1;
    session.round_state = RoundState::PreDeal;
    session.reshuffles = 0;
    session.pending_tally = None;

    table.deck = DeckState::shuffled(derive_opening_seed(session.rng_seed));
    for hand in table.hands.values_mut() {
        *hand = None;
    }

    log.push(
        &table.session.host,
        ActionKind::GameStarted {
            initial_dealer: table.session.dealer.clone(),
            players: table.session.players.clone(),
            starting_lives,
        },
    );
    Ok(())
}

/// What settlement decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// More than one player still has lives.
    Continues,
    Ended { winner: Option<PlayerId> },
}

/// Active → Ended once at most one player has lives left.
pub fn settle(table: &mut Table) -> Settlement {
    let session = &mut table.session;
    if session.status != GameStatus::Active {
        return Settlement::Continues;
    }
    let alive: Vec<PlayerId> = session.alive_players().into_iter().cloned().collect();
    if alive.len() > 1 {
        return Settlement::Continues;
    }
    let winner = alive.into_iter().next();
    session.status = GameStatus::Ended;
    session.winner = winner.clone();
    Settlement::Ended { winner }
}
