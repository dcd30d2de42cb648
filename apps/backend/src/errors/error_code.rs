//! Error codes for the Kung engine.
//!
//! This module defines all error codes used throughout the crate.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in error payloads.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity & roles
    /// No caller identity was supplied
    Unauthenticated,
    /// Caller is not the active player
    NotActivePlayer,
    /// Caller is not the dealer
    NotDealer,
    /// Caller is not the host
    NotHost,

    // Preconditions
    /// Session status does not allow the operation
    GameNotActive,
    /// Round state does not allow the operation
    PhaseMismatch,
    /// Caller holds a King and cannot swap
    HoldsKing,
    /// A required hand holds no card
    EmptyHand,
    /// Draw pile and trash are both empty
    NoCardsRemain,
    /// No living player to pass to
    NoEligibleNeighbor,
    /// Seating size out of range
    InvalidPlayerCount,
    /// Same player seated twice
    DuplicatePlayer,
    /// Player already sits in an unfinished game
    AlreadySeated,
    /// Malformed card token
    ParseCard,
    /// General precondition failure
    FailedPrecondition,

    // Resource Not Found
    /// No session matches the caller's role
    GameNotFound,
    /// General not found error
    NotFound,

    // Concurrency
    /// Session was modified concurrently; retry
    OptimisticLock,
    /// General conflict
    Conflict,

    // Internal
    /// Role lookup matched more than one session
    RoleNotUnique,
    /// End-of-round recomputation disagrees with the stick-time tally
    TallyMismatch,
    /// Stored aggregate violates an invariant
    DataCorruption,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::NotActivePlayer => "NOT_ACTIVE_PLAYER",
            Self::NotDealer => "NOT_DEALER",
            Self::NotHost => "NOT_HOST",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::HoldsKing => "HOLDS_KING",
            Self::EmptyHand => "EMPTY_HAND",
            Self::NoCardsRemain => "NO_CARDS_REMAIN",
            Self::NoEligibleNeighbor => "NO_ELIGIBLE_NEIGHBOR",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::ParseCard => "PARSE_CARD",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",
            Self::RoleNotUnique => "ROLE_NOT_UNIQUE",
            Self::TallyMismatch => "TALLY_MISMATCH",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: [ErrorCode; 24] = [
        Self::Unauthenticated,
        Self::NotActivePlayer,
        Self::NotDealer,
        Self::NotHost,
        Self::GameNotActive,
        Self::PhaseMismatch,
        Self::HoldsKing,
        Self::EmptyHand,
        Self::NoCardsRemain,
        Self::NoEligibleNeighbor,
        Self::InvalidPlayerCount,
        Self::DuplicatePlayer,
        Self::AlreadySeated,
        Self::ParseCard,
        Self::FailedPrecondition,
        Self::GameNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::Conflict,
        Self::RoleNotUnique,
        Self::TallyMismatch,
        Self::DataCorruption,
        Self::ConfigError,
        Self::Internal,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
