//! Dealing one card to every living player at the start of a round.

use crate::domain::actions::{ActionKind, ActionLog};
use crate::domain::state::{PlayerId, RoundState};
use crate::domain::table::Table;
use crate::errors::domain::{DomainError, ValidationKind};

/// Living players in dealing order: left of the dealer first, dealer last.
pub fn dealing_order(table: &Table) -> Vec<PlayerId> {
    let session = &table.session;
    let seats = &session.players;
    let Some(start) = seats.iter().position(|p| *p == session.dealer) else {
        return Vec::new();
    };
    (1..=seats.len())
        .map(|offset| &seats[(start + offset) % seats.len()])
        .filter(|p| session.is_alive(p))
        .cloned()
        .collect()
}

/// Deal the round. Role and phase checks belong to the caller.
///
/// Returns the dealing order.
pub fn deal_round(
    table: &mut Table,
    dealer: &PlayerId,
    log: &mut ActionLog,
) -> Result<Vec<PlayerId>, DomainError> {
    if table.hands.values().any(Option::is_some) {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Hands must be empty before dealing",
        ));
    }

    let order = dealing_order(table);
    if order.len() < 2 {
        return Err(DomainError::validation(
            ValidationKind::NoEligibleNeighbor,
            "At least two living players are needed to deal",
        ));
    }

    log.push(
        dealer,
        ActionKind::DealCards {
            dealing_order: order.clone(),
        },
    );

    for player in &order {
        let drawn = table.draw_card()?;
        if let Some(recycled) = drawn.reshuffled {
            log.push(
                dealer,
                ActionKind::DeckReshuffle {
                    current_dealer: dealer.clone(),
                    recycled,
                },
            );
        }
        table.set_hand(player, Some(drawn.card));
        log.receive_card(player, drawn.card);
    }

    table.session.round_state = RoundState::Playing;
    // order[0] is the first living player left of the dealer.
    table.session.active_player = order[0].clone();

    Ok(order)
}
