//! In-memory implementation of [`SessionRepo`].
//!
//! Closures run outside the lock against a cloned snapshot; the commit is a
//! compare-and-swap on `lock_version`.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::actions::ActionRecord;
use crate::domain::state::{GameStatus, PlayerId, Role, SessionId};
use crate::domain::table::Table;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::sessions::{NewSession, SessionRepo, SessionSnapshot, TxnFn};

#[derive(Debug)]
struct StoredSession {
    table: Table,
    public_log: Vec<ActionRecord>,
    private_logs: HashMap<PlayerId, Vec<ActionRecord>>,
    next_seq: u64,
}

impl StoredSession {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            table: self.table.clone(),
            next_seq: self.next_seq,
        }
    }

    fn check_seq(&self, actions: &[ActionRecord]) -> Result<(), DomainError> {
        for (expected, record) in (self.next_seq..).zip(actions) {
            if record.seq != expected {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Action seq {} out of order, expected {expected}", record.seq),
                ));
            }
        }
        Ok(())
    }

    fn append(&mut self, actions: Vec<ActionRecord>) {
        for record in actions {
            self.next_seq = record.seq + 1;
            if record.kind.is_private() {
                self.private_logs
                    .entry(record.actor_id.clone())
                    .or_default()
                    .push(record);
            } else {
                self.public_log.push(record);
            }
        }
    }
}

#[derive(Debug, Default)]
struct MemState {
    last_id: SessionId,
    sessions: HashMap<SessionId, StoredSession>,
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct SessionStoreMem {
    state: Mutex<MemState>,
}

fn missing(session_id: SessionId) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Session {session_id} not found"))
}

impl SessionStoreMem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous core of [`SessionRepo::transact`].
    pub fn transact_now(
        &self,
        session_id: SessionId,
        f: TxnFn<'_>,
    ) -> Result<SessionSnapshot, DomainError> {
        let snapshot = {
            let state = self.state.lock();
            state
                .sessions
                .get(&session_id)
                .map(StoredSession::snapshot)
                .ok_or_else(|| missing(session_id))?
        };
        let expected = snapshot.table.session.lock_version;

        let writes = f(&snapshot)?;
        let mut next = snapshot.table.clone();
        writes.apply_to(&mut next);
        validate_commit(session_id, &next)?;

        let mut state = self.state.lock();
        let stored = state
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| missing(session_id))?;

        let current = stored.table.session.lock_version;
        if current != expected {
            warn!(session_id, expected, current, "Commit lost optimistic lock");
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Session lock version mismatch: expected {expected}, but session has version {current}"
                ),
            ));
        }

        stored.check_seq(&writes.actions)?;
        next.session.lock_version = current + 1;
        stored.table = next;
        stored.append(writes.actions);

        debug!(
            session_id,
            lock_version = stored.table.session.lock_version,
            next_seq = stored.next_seq,
            "Committed session write-set"
        );
        Ok(stored.snapshot())
    }
}

/// Aggregate invariants every commit must satisfy.
fn validate_commit(session_id: SessionId, table: &Table) -> Result<(), DomainError> {
    if table.session.id != session_id {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Write-set for session {} applied to {session_id}", table.session.id),
        ));
    }
    let session = &table.session;
    if !session.is_seated(&session.dealer) || !session.is_seated(&session.active_player) {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            "Dealer and active player must be seated",
        ));
    }
    if session.status != GameStatus::Gathering {
        table.check_card_conservation()?;
    }
    Ok(())
}

#[async_trait]
impl SessionRepo for SessionStoreMem {
    async fn insert(&self, session: NewSession) -> Result<SessionId, DomainError> {
        let NewSession { mut table, actions } = session;
        let mut state = self.state.lock();
        let id = state.last_id + 1;
        table.session.id = id;
        table.session.lock_version = 1;

        let mut stored = StoredSession {
            table,
            public_log: Vec::new(),
            private_logs: HashMap::new(),
            next_seq: 0,
        };
        stored.check_seq(&actions)?;
        stored.append(actions);
        state.last_id = id;
        state.sessions.insert(id, stored);
        debug!(session_id = id, "Inserted session");
        Ok(id)
    }

    async fn find_by_role(
        &self,
        player: &PlayerId,
        role: Role,
        status: GameStatus,
    ) -> Result<Vec<SessionId>, DomainError> {
        let state = self.state.lock();
        let mut ids: Vec<SessionId> = state
            .sessions
            .iter()
            .filter(|(_, s)| s.table.session.status == status)
            .filter(|(_, s)| s.table.session.holds_role(player, role))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, DomainError> {
        let state = self.state.lock();
        state
            .sessions
            .get(&session_id)
            .map(StoredSession::snapshot)
            .ok_or_else(|| missing(session_id))
    }

    async fn transact<'a>(
        &self,
        session_id: SessionId,
        f: TxnFn<'a>,
    ) -> Result<SessionSnapshot, DomainError> {
        self.transact_now(session_id, f)
    }

    async fn actions_visible_to(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<Vec<ActionRecord>, DomainError> {
        let state = self.state.lock();
        let stored = state
            .sessions
            .get(&session_id)
            .ok_or_else(|| missing(session_id))?;

        let mut records = stored.public_log.clone();
        if let Some(private) = stored.private_logs.get(player) {
            records.extend(private.iter().cloned());
        }
        records.sort_by_key(|r| r.seq);
        Ok(records)
    }
}
