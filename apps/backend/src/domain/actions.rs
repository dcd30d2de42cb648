//! Action log records.
//!
//! Records are written in the same commit as the state change that produced
//! them and are never updated afterwards. `seq` is the per-session position
//! shared by the public log and every private log, so merging the two by
//! `seq` reproduces the causal order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::domain::state::PlayerId;
use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    #[serde(rename_all = "camelCase")]
    GameStarted {
        initial_dealer: PlayerId,
        players: Vec<PlayerId>,
        starting_lives: u8,
    },
    PlayerJoined {
        username: String,
    },
    PlayerLeft {
        username: String,
    },
    #[serde(rename_all = "camelCase")]
    DealCards {
        dealing_order: Vec<PlayerId>,
    },
    #[serde(rename_all = "camelCase")]
    SwapCards {
        target_player_id: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    DealerDraw {
        previous_card: Card,
    },
    /// A swap ran into a King: the turn moved, the cards did not.
    #[serde(rename = "KUNG")]
    KingBlock {
        #[serde(rename = "playerIdWithKing")]
        king_holder: PlayerId,
        #[serde(rename = "cardId")]
        king: Card,
    },
    #[serde(rename_all = "camelCase")]
    Stick {
        is_dealer: bool,
    },
    #[serde(rename_all = "camelCase")]
    RevealCards {
        player_cards: BTreeMap<PlayerId, Card>,
    },
    #[serde(rename_all = "camelCase")]
    Tallying {
        players_lost: Vec<PlayerId>,
    },
    #[serde(rename_all = "camelCase")]
    EndRound {
        players_lost: Vec<PlayerId>,
        new_dealer: PlayerId,
        game_ended: bool,
    },
    #[serde(rename_all = "camelCase")]
    DeckReshuffle {
        current_dealer: PlayerId,
        recycled: usize,
    },
    /// Private to the actor, who is the recipient.
    ReceiveCard {
        card: Card,
    },
}

impl ActionKind {
    pub fn is_private(&self) -> bool {
        matches!(self, ActionKind::ReceiveCard { .. })
    }

    /// Wire name of the kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::GameStarted { .. } => "GAME_STARTED",
            ActionKind::PlayerJoined { .. } => "PLAYER_JOINED",
            ActionKind::PlayerLeft { .. } => "PLAYER_LEFT",
            ActionKind::DealCards { .. } => "DEAL_CARDS",
            ActionKind::SwapCards { .. } => "SWAP_CARDS",
            ActionKind::DealerDraw { .. } => "DEALER_DRAW",
            ActionKind::KingBlock { .. } => "KUNG",
            ActionKind::Stick { .. } => "STICK",
            ActionKind::RevealCards { .. } => "REVEAL_CARDS",
            ActionKind::Tallying { .. } => "TALLYING",
            ActionKind::EndRound { .. } => "END_ROUND",
            ActionKind::DeckReshuffle { .. } => "DECK_RESHUFFLE",
            ActionKind::ReceiveCard { .. } => "RECEIVE_CARD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub id: String,
    pub seq: u64,
    pub actor_id: PlayerId,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl ActionRecord {
    /// Whether `viewer` may see this record.
    pub fn visible_to(&self, viewer: &PlayerId) -> bool {
        !self.kind.is_private() || self.actor_id == *viewer
    }
}

/// Collects the records of one transaction.
///
/// All records of a transaction share its timestamp; `seq` carries the order.
#[derive(Debug)]
pub struct ActionLog {
    next_seq: u64,
    at: OffsetDateTime,
    records: Vec<ActionRecord>,
}

impl ActionLog {
    pub fn new(next_seq: u64, at: OffsetDateTime) -> Self {
        Self {
            next_seq,
            at,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, actor: &PlayerId, kind: ActionKind) {
        let record = ActionRecord {
            id: Ulid::new().to_string(),
            seq: self.next_seq,
            actor_id: actor.clone(),
            timestamp: self.at,
            kind,
        };
        self.next_seq += 1;
        self.records.push(record);
    }

    /// Private card notice for a player whose hand just changed.
    pub fn receive_card(&mut self, recipient: &PlayerId, card: Card) {
        self.push(recipient, ActionKind::ReceiveCard { card });
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ActionRecord> {
        self.records
    }
}
