use time::OffsetDateTime;
use tracing::{error, warn};

use super::{locate_session, require_caller, GameFlowService};
use crate::domain::actions::ActionLog;
use crate::domain::state::{GameStatus, PlayerId, Role, SessionId};
use crate::domain::table::Table;
use crate::error::{AppError, Status};
use crate::errors::domain::DomainError;
use crate::repos::sessions::{SessionRepo, SessionSnapshot, WriteSet};

/// What a committed mutation produced.
#[derive(Debug)]
pub struct Committed<T> {
    pub session_id: SessionId,
    pub snapshot: SessionSnapshot,
    pub outcome: T,
}

/// Run `mutate` against `session_id` in one store transaction.
///
/// Preconditions are checked by `mutate` itself, against the snapshot being
/// committed. Nothing is written when it fails.
pub(crate) async fn commit_mutation<T, F>(
    repo: &dyn SessionRepo,
    session_id: SessionId,
    actor: &PlayerId,
    op: &'static str,
    mutate: F,
) -> Result<Committed<T>, AppError>
where
    T: Send,
    F: FnOnce(&mut Table, &PlayerId, &mut ActionLog) -> Result<T, DomainError> + Send,
{
    let at = OffsetDateTime::now_utc();
    let mut outcome = None;
    let slot = &mut outcome;
    let actor_id = actor.clone();

    let result = repo
        .transact(
            session_id,
            Box::new(move |snap: &SessionSnapshot| {
                let mut table = snap.table.clone();
                let mut log = ActionLog::new(snap.next_seq, at);
                let value = mutate(&mut table, &actor_id, &mut log)?;
                *slot = Some(value);
                Ok(WriteSet::diff(&snap.table, table, log.into_records()))
            }),
        )
        .await;

    let snapshot = result.map_err(|e| report(e, session_id, actor, op))?;
    let outcome = outcome.ok_or_else(|| {
        AppError::internal(format!("{op} committed without producing an outcome"))
    })?;
    Ok(Committed {
        session_id,
        snapshot,
        outcome,
    })
}

fn report(err: DomainError, session_id: SessionId, player: &PlayerId, op: &'static str) -> AppError {
    let app = AppError::from(err);
    match app.status() {
        Status::Internal => {
            error!(session_id, %player, op, code = %app.code(), detail = %app.detail(), "Invariant violation");
        }
        Status::Aborted => {
            warn!(session_id, %player, op, "Lost optimistic lock; caller may retry");
        }
        _ => {
            warn!(session_id, %player, op, code = %app.code(), detail = %app.detail(), "Request rejected");
        }
    }
    app
}

impl GameFlowService {
    /// Locate the caller's session by `role` among Active sessions and mutate it.
    pub(super) async fn run_mutation<T, F>(
        &self,
        caller: Option<&PlayerId>,
        role: Role,
        op: &'static str,
        mutate: F,
    ) -> Result<Committed<T>, AppError>
    where
        T: Send,
        F: FnOnce(&mut Table, &PlayerId, &mut ActionLog) -> Result<T, DomainError> + Send,
    {
        let player = require_caller(caller)?;
        let session_id = locate_session(self.repo.as_ref(), player, role, GameStatus::Active).await?;
        commit_mutation(self.repo.as_ref(), session_id, player, op, mutate).await
    }
}
