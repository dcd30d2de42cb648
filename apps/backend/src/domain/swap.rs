//! Swap resolution: dealer draw, king block, or card exchange.

use crate::domain::actions::{ActionKind, ActionLog};
use crate::domain::state::{PlayerId, RoundState};
use crate::domain::table::Table;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// What a swap request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The dealer replaced their card from the deck; active play is over.
    DealerDraw {
        drawn: Card,
        discarded: Card,
        reshuffled: Option<usize>,
    },
    /// The neighbor holds a King: no cards moved, the turn passed to them.
    KingBlock { neighbor: PlayerId, king: Card },
    /// Caller and neighbor exchanged cards; the turn passed to the neighbor.
    Exchange {
        neighbor: PlayerId,
        gave: Card,
        received: Card,
    },
}

/// The caller's card, provided it may be swapped away.
pub fn swappable_card(table: &Table, caller: &PlayerId) -> Result<Card, DomainError> {
    let card = table.hand(caller).ok_or_else(|| {
        DomainError::validation(ValidationKind::EmptyHand, "Current player has no card to swap")
    })?;
    if card.is_king() {
        return Err(DomainError::validation(
            ValidationKind::HoldsKing,
            "Players with Kings cannot swap cards",
        ));
    }
    Ok(card)
}

/// Resolve a swap by `caller`, mutating `table` and recording actions.
///
/// Role and phase checks belong to the caller; this only enforces the
/// card-level preconditions. On error `table` may be partially modified and
/// must be discarded.
pub fn resolve_swap(
    table: &mut Table,
    caller: &PlayerId,
    log: &mut ActionLog,
) -> Result<SwapOutcome, DomainError> {
    let own = swappable_card(table, caller)?;

    if table.session.is_dealer(caller) {
        return dealer_draw(table, caller, own, log);
    }

    let neighbor = table.session.next_living_left(caller).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NoEligibleNeighbor,
            "No alive players found to swap with",
        )
    })?;
    let theirs = table.hand(&neighbor).ok_or_else(|| {
        DomainError::validation(ValidationKind::EmptyHand, "Next player has no card to swap")
    })?;

    table.session.active_player = neighbor.clone();

    if theirs.is_king() {
        log.push(
            caller,
            ActionKind::KingBlock {
                king_holder: neighbor.clone(),
                king: theirs,
            },
        );
        return Ok(SwapOutcome::KingBlock {
            neighbor,
            king: theirs,
        });
    }

    table.set_hand(caller, Some(theirs));
    table.set_hand(&neighbor, Some(own));
    log.push(
        caller,
        ActionKind::SwapCards {
            target_player_id: neighbor.clone(),
        },
    );
    log.receive_card(caller, theirs);
    log.receive_card(&neighbor, own);

    Ok(SwapOutcome::Exchange {
        neighbor,
        gave: own,
        received: theirs,
    })
}

fn dealer_draw(
    table: &mut Table,
    dealer: &PlayerId,
    previous: Card,
    log: &mut ActionLog,
) -> Result<SwapOutcome, DomainError> {
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

    table.deck.discard(previous);
    table.set_hand(dealer, Some(drawn.card));
    table.session.round_state = RoundState::Tallying;

    log.push(
        dealer,
        ActionKind::DealerDraw {
            previous_card: previous,
        },
    );
    log.receive_card(dealer, drawn.card);
    log.push(
        dealer,
        ActionKind::RevealCards {
            player_cards: table.live_hands(),
        },
    );

    Ok(SwapOutcome::DealerDraw {
        drawn: drawn.card,
        discarded: previous,
        reshuffled: drawn.reshuffled,
    })
}
