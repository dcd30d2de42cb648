//! Domain-level error type used across the engine, repos, and services.
//!
//! This error type is storage- and transport-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule and state violations. These surface to callers as failed preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Session status is not the one the operation needs.
    GameNotActive,
    /// Round state is not the one the operation needs.
    PhaseMismatch,
    /// Caller's card is a King and cannot be swapped away.
    HoldsKing,
    /// A hand that must hold a card is empty.
    EmptyHand,
    /// Draw pile and trash are both empty.
    NoCardsRemain,
    /// Neighbor search found no living player.
    NoEligibleNeighbor,
    InvalidPlayerCount,
    DuplicatePlayer,
    /// Player is seated in another Gathering or Active session.
    AlreadySeated,
    ParseCard,
    Other(String),
}

/// Role checks that failed after the session was located.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PermissionKind {
    NotActivePlayer,
    NotDealer,
    NotHost,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Another writer committed against the same session first. Retryable.
    OptimisticLock,
    Other(String),
}

/// Infra and invariant failures. Never caused by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// More than one session matched a role that must be unique.
    RoleNotUnique,
    /// End-of-round recomputation disagrees with the stick-time tally.
    TallyMismatch,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Business rule or state precondition violation
    Validation(ValidationKind, String),
    /// Caller lacks the role the operation needs
    Permission(PermissionKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Concurrent writer conflict
    Conflict(ConflictKind, String),
    /// Invariant or storage failure
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Permission(kind, d) => write!(f, "permission denied {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn permission(kind: PermissionKind, detail: impl Into<String>) -> Self {
        Self::Permission(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
