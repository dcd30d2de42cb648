//! Session aggregate storage contract.
//!
//! The store owns the aggregate (session, deck, hands, action logs). Every
//! mutation goes through [`SessionRepo::transact`]: the closure sees one
//! consistent snapshot and the write-set it returns is applied atomically,
//! or not at all.

use async_trait::async_trait;

use crate::domain::actions::ActionRecord;
use crate::domain::deck::DeckState;
use crate::domain::state::{GameSession, GameStatus, PlayerId, Role, SessionId};
use crate::domain::table::Table;
use crate::domain::Card;
use crate::errors::domain::DomainError;

/// A committed aggregate as seen by one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub table: Table,
    /// Sequence number the next action record must carry.
    pub next_seq: u64,
}

/// State delta plus the records it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSet {
    pub session: GameSession,
    /// `None` when the deck record is unchanged.
    pub deck: Option<DeckState>,
    /// Only the hands whose value changed.
    pub hands: Vec<(PlayerId, Option<Card>)>,
    pub actions: Vec<ActionRecord>,
}

impl WriteSet {
    /// Delta between the snapshot table and the mutated one.
    pub fn diff(before: &Table, after: Table, actions: Vec<ActionRecord>) -> Self {
        let hands = after
            .hands
            .iter()
            .filter(|(player, card)| before.hands.get(*player) != Some(*card))
            .map(|(player, card)| (player.clone(), *card))
            .collect();
        let deck = (before.deck != after.deck).then_some(after.deck);
        Self {
            session: after.session,
            deck,
            hands,
            actions,
        }
    }

    /// Apply to a copy of the snapshot table.
    pub fn apply_to(&self, table: &mut Table) {
        table.session = self.session.clone();
        if let Some(deck) = &self.deck {
            table.deck = deck.clone();
        }
        for (player, card) in &self.hands {
            table.set_hand(player, *card);
        }
    }
}

/// A session to insert, as built by the lifecycle service.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// `table.session.id` is assigned by the store.
    pub table: Table,
    pub actions: Vec<ActionRecord>,
}

/// Transaction body. Runs against a snapshot; must not block on the store.
pub type TxnFn<'a> =
    Box<dyn FnOnce(&SessionSnapshot) -> Result<WriteSet, DomainError> + Send + 'a>;

#[async_trait]
pub trait SessionRepo: Send + Sync {
    /// Store a new session and its initial records; returns the assigned id.
    async fn insert(&self, session: NewSession) -> Result<SessionId, DomainError>;

    /// Sessions in `status` where `player` holds `role`.
    async fn find_by_role(
        &self,
        player: &PlayerId,
        role: Role,
        status: GameStatus,
    ) -> Result<Vec<SessionId>, DomainError>;

    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, DomainError>;

    /// Run `f` against a snapshot and commit its write-set atomically.
    ///
    /// Fails with `ConflictKind::OptimisticLock` when another commit landed
    /// on the session between snapshot and commit. Returns the committed
    /// snapshot.
    async fn transact<'a>(
        &self,
        session_id: SessionId,
        f: TxnFn<'a>,
    ) -> Result<SessionSnapshot, DomainError>;

    /// Public log merged with `player`'s private records, in `seq` order.
    async fn actions_visible_to(
        &self,
        session_id: SessionId,
        player: &PlayerId,
    ) -> Result<Vec<ActionRecord>, DomainError>;
}
