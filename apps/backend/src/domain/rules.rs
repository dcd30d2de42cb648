//! Game constants and the state/role preconditions shared by every operation.

use crate::domain::state::{GameSession, GameStatus, PlayerId, RoundState};
use crate::errors::domain::{DomainError, PermissionKind, ValidationKind};

pub const MIN_PLAYERS: usize = 2;
/// One card per player plus at least one spare for the dealer's draw.
pub const MAX_PLAYERS: usize = 51;
pub const DEFAULT_STARTING_LIVES: u8 = 3;

pub fn require_status(session: &GameSession, expected: GameStatus) -> Result<(), DomainError> {
    if session.status != expected {
        return Err(DomainError::validation(
            ValidationKind::GameNotActive,
            format!("Game is {}, expected {expected}", session.status),
        ));
    }
    Ok(())
}

pub fn require_round_state(
    session: &GameSession,
    expected: RoundState,
) -> Result<(), DomainError> {
    if session.round_state != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "Round state is {}, operation requires {expected}",
                session.round_state
            ),
        ));
    }
    Ok(())
}

pub fn require_active_player(session: &GameSession, caller: &PlayerId) -> Result<(), DomainError> {
    if session.active_player != *caller {
        return Err(DomainError::permission(
            PermissionKind::NotActivePlayer,
            format!("Only the active player can act; active player is {}", session.active_player),
        ));
    }
    Ok(())
}

pub fn require_dealer(session: &GameSession, caller: &PlayerId) -> Result<(), DomainError> {
    if session.dealer != *caller {
        return Err(DomainError::permission(
            PermissionKind::NotDealer,
            format!("Only the dealer can do this; dealer is {}", session.dealer),
        ));
    }
    Ok(())
}

pub fn require_host(session: &GameSession, caller: &PlayerId) -> Result<(), DomainError> {
    if session.host != *caller {
        return Err(DomainError::permission(
            PermissionKind::NotHost,
            "Only the host can start the game",
        ));
    }
    Ok(())
}
