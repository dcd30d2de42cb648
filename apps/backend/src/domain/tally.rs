//! Stick and end-of-round resolution.

use std::collections::BTreeMap;

use crate::domain::actions::{ActionKind, ActionLog};
use crate::domain::state::{PlayerId, RoundState};
use crate::domain::table::Table;
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

/// Players holding the lowest rank among `cards`, in seating order.
///
/// Suits are ignored, so every player tied at the minimum is returned.
pub fn lowest_card_losers(seats: &[PlayerId], cards: &BTreeMap<PlayerId, Card>) -> Vec<PlayerId> {
    let Some(min) = cards.values().map(|c| c.rank).min() else {
        return Vec::new();
    };
    seats
        .iter()
        .filter(|p| cards.get(*p).is_some_and(|c| c.rank == min))
        .cloned()
        .collect()
}

fn apply_life_loss(table: &mut Table, losers: &[PlayerId]) {
    for player in losers {
        if let Some(lives) = table.session.lives.get_mut(player) {
            *lives = lives.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickOutcome {
    /// Turn passed to the next living player.
    Passed { next: PlayerId },
    /// The dealer stuck: hands revealed and losers already charged.
    Revealed { losers: Vec<PlayerId> },
}

/// Resolve a stick by `caller`. Role and phase checks belong to the caller.
pub fn resolve_stick(
    table: &mut Table,
    caller: &PlayerId,
    log: &mut ActionLog,
) -> Result<StickOutcome, DomainError> {
    if !table.session.is_dealer(caller) {
        let next = table.session.next_living_left(caller).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoEligibleNeighbor,
                "No alive players found to pass the turn to",
            )
        })?;
        table.session.active_player = next.clone();
        log.push(caller, ActionKind::Stick { is_dealer: false });
        return Ok(StickOutcome::Passed { next });
    }

    table.session.round_state = RoundState::Tallying;
    log.push(caller, ActionKind::Stick { is_dealer: true });

    let revealed = table.live_hands();
    let losers = lowest_card_losers(&table.session.players, &revealed);
    log.push(
        caller,
        ActionKind::RevealCards {
            player_cards: revealed,
        },
    );

    apply_life_loss(table, &losers);
    table.session.pending_tally = Some(losers.clone());
    log.push(
        caller,
        ActionKind::Tallying {
            players_lost: losers.clone(),
        },
    );

    Ok(StickOutcome::Revealed { losers })
}

/// Result of closing a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub losers: Vec<PlayerId>,
    pub new_dealer: PlayerId,
    pub survivors: usize,
    pub game_ended: bool,
    pub recycled: usize,
}

/// Close the current round: settle losses, clear hands into the trash,
/// rotate the dealer, and advance to the next round's PreDeal.
pub fn end_round(
    table: &mut Table,
    caller: &PlayerId,
    log: &mut ActionLog,
) -> Result<RoundSummary, DomainError> {
    let held = table.held_cards();
    let recomputed = lowest_card_losers(&table.session.players, &held);

    let losers = match table.session.pending_tally.take() {
        Some(tallied) => {
            if tallied != recomputed {
                return Err(DomainError::infra(
                    InfraErrorKind::TallyMismatch,
                    format!(
                        "Stick-time losers {tallied:?} differ from end-of-round losers {recomputed:?}"
                    ),
                ));
            }
            tallied
        }
        None => {
            apply_life_loss(table, &recomputed);
            log.push(
                caller,
                ActionKind::Tallying {
                    players_lost: recomputed.clone(),
                },
            );
            recomputed
        }
    };

    let recycled = table.clear_hands_to_trash();

    let current = table.session.dealer.clone();
    let new_dealer = table
        .session
        .next_living_left(&current)
        .unwrap_or(current);
    let survivors = table.session.alive_players().len();
    let game_ended = survivors <= 1;

    table.session.dealer = new_dealer.clone();
    table.session.active_player = new_dealer.clone();
    table.session.round_state = RoundState::PreDeal;
    table.session.round += 1;

    log.push(
        caller,
        ActionKind::EndRound {
            players_lost: losers.clone(),
            new_dealer: new_dealer.clone(),
            game_ended,
        },
    );

    Ok(RoundSummary {
        losers,
        new_dealer,
        survivors,
        game_ended,
        recycled,
    })
}
