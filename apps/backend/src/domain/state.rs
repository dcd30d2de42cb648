use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::seating::next_living_left;

/// Opaque caller identity as resolved by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type SessionId = i64;

/// Phase within a single round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundState {
    /// Hands are empty; the dealer has not dealt yet.
    PreDeal,
    /// Players swap or stick in turn.
    Playing,
    /// Hands are revealed; the dealer ends the round.
    Tallying,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Gathering,
    Active,
    Ended,
}

/// Roles a caller can hold in a session. Host, dealer, and active player
/// lookups must be unique per player across all sessions in the status being
/// searched; `Seated` matches every seat.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Role {
    Host,
    Dealer,
    ActivePlayer,
    /// Any seat at the table.
    Seated,
}

/// The session state record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: SessionId,
    /// Fixed circular seating order.
    pub players: Vec<PlayerId>,
    pub host: PlayerId,
    pub lives: BTreeMap<PlayerId, u8>,
    pub dealer: PlayerId,
    pub active_player: PlayerId,
    /// 1-based.
    pub round: u32,
    pub round_state: RoundState,
    pub status: GameStatus,
    pub winner: Option<PlayerId>,
    /// Base seed every shuffle in this session derives from.
    pub rng_seed: u64,
    /// Reshuffles performed so far (session-wide).
    pub reshuffles: u32,
    /// Losers applied when the dealer stuck; checked again at end of round.
    pub pending_tally: Option<Vec<PlayerId>>,
    /// Bumped by the store on every commit.
    pub lock_version: i32,
}

impl GameSession {
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    pub fn lives_of(&self, player: &PlayerId) -> u8 {
        self.lives.get(player).copied().unwrap_or(0)
    }

    pub fn is_alive(&self, player: &PlayerId) -> bool {
        self.lives_of(player) > 0
    }

    /// Living players in seating order.
    pub fn alive_players(&self) -> Vec<&PlayerId> {
        self.players.iter().filter(|p| self.is_alive(p)).collect()
    }

    pub fn is_dealer(&self, player: &PlayerId) -> bool {
        self.dealer == *player
    }

    pub fn holds_role(&self, player: &PlayerId, role: Role) -> bool {
        match role {
            Role::Host => self.host == *player,
            Role::Dealer => self.dealer == *player,
            Role::ActivePlayer => self.active_player == *player,
            Role::Seated => self.players.contains(player),
        }
    }

    /// Next living player to the left of `from`, per the current lives.
    pub fn next_living_left(&self, from: &PlayerId) -> Option<PlayerId> {
        next_living_left(&self.players, from, |p| self.is_alive(p)).cloned()
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundState::PreDeal => "pre-deal",
            RoundState::Playing => "playing",
            RoundState::Tallying => "tallying",
        };
        f.write_str(s)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Gathering => "gathering",
            GameStatus::Active => "active",
            GameStatus::Ended => "ended",
        };
        f.write_str(s)
    }
}
