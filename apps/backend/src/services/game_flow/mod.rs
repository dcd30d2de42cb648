//! Turn controller: resolves the caller to a session and role, validates
//! preconditions inside the store transaction, and commits the engine's
//! result together with its action records.

pub(crate) mod mutation;
mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::config::GameConfig;
use crate::domain::state::{GameStatus, PlayerId, Role, SessionId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::sessions::SessionRepo;

/// Body returned by every turn operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallResponse {
    pub success: bool,
}

impl CallResponse {
    pub const OK: CallResponse = CallResponse { success: true };
}

#[derive(Clone)]
pub struct GameFlowService {
    repo: Arc<dyn SessionRepo>,
    config: GameConfig,
}

impl GameFlowService {
    pub fn new(repo: Arc<dyn SessionRepo>, config: GameConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

pub(crate) fn require_caller(caller: Option<&PlayerId>) -> Result<&PlayerId, AppError> {
    caller.ok_or_else(AppError::unauthenticated)
}

/// The single session in `status` where `player` holds `role`.
pub(crate) async fn locate_session(
    repo: &dyn SessionRepo,
    player: &PlayerId,
    role: Role,
    status: GameStatus,
) -> Result<SessionId, AppError> {
    let ids = repo.find_by_role(player, role, status).await?;
    match ids.as_slice() {
        [] => {
            debug!(%player, ?role, %status, "No session for caller role");
            Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("No {status} game where {player} holds {role:?}"),
            )
            .into())
        }
        [id] => Ok(*id),
        many => {
            error!(%player, ?role, %status, sessions = ?many, "Role held in more than one session");
            Err(DomainError::infra(
                InfraErrorKind::RoleNotUnique,
                format!("{player} holds {role:?} in {} {status} games", many.len()),
            )
            .into())
        }
    }
}
