//! Repository wrapper that fails one chosen transaction.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use kung_backend::domain::state::{GameStatus, PlayerId, Role, SessionId};
use kung_backend::domain::ActionRecord;
use kung_backend::errors::domain::{ConflictKind, DomainError};
use kung_backend::repos::sessions::{NewSession, SessionSnapshot, TxnFn};
use kung_backend::{SessionRepo, SessionStoreMem};

/// Delegates to the in-memory store, except that the `fail_on`-th call to
/// `transact` (1-based) loses its optimistic lock without running.
pub struct FailingRepo {
    inner: Arc<SessionStoreMem>,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FailingRepo {
    pub fn new(inner: Arc<SessionStoreMem>, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionRepo for FailingRepo {
    async fn insert(&self, session: NewSession) -> Result<SessionId, DomainError> {
        self.inner.insert(session).await
    }

    async fn find_by_role(
        &self,
        player: &PlayerId,
        role: Role,
        status: GameStatus,
    ) -> Result<Vec<SessionId>, DomainError> {
        self.inner.find_by_role(player, role, status).await
    }

    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, DomainError> {
        self.inner.load(session_id).await
    }

    async fn transact<'a>(
        &self,
        session_id: SessionId,
        f: TxnFn<'a>,
    ) -> Result<SessionSnapshot, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!("transaction {call} on session {session_id} dropped"),
            ));
        }
        self.inner.transact(session_id, f).await
    }

    async fn actions_visible_to(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<Vec<ActionRecord>, DomainError> {
        self.inner.actions_visible_to(session_id, player).await
    }
}
