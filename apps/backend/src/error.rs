use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, PermissionKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Caller-facing error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub status: &'static str,
    pub code: String,
    pub title: String,
    pub detail: String,
    pub retryable: bool,
}

/// Canonical status families reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Unauthenticated,
    NotFound,
    PermissionDenied,
    FailedPrecondition,
    Aborted,
    Internal,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Unauthenticated => "unauthenticated",
            Status::NotFound => "not-found",
            Status::PermissionDenied => "permission-denied",
            Status::FailedPrecondition => "failed-precondition",
            Status::Aborted => "aborted",
            Status::Internal => "internal",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Permission denied: {detail}")]
    PermissionDenied { code: ErrorCode, detail: String },
    #[error("Failed precondition: {detail}")]
    FailedPrecondition { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthenticated => ErrorCode::Unauthenticated,
            AppError::NotFound { code, .. }
            | AppError::PermissionDenied { code, .. }
            | AppError::FailedPrecondition { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Full detail, for logs. Callers see [`AppError::public_detail`].
    pub fn detail(&self) -> String {
        match self {
            AppError::Unauthenticated => "User is not authenticated".to_string(),
            AppError::NotFound { detail, .. }
            | AppError::PermissionDenied { detail, .. }
            | AppError::FailedPrecondition { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            AppError::Unauthenticated => Status::Unauthenticated,
            AppError::NotFound { .. } => Status::NotFound,
            AppError::PermissionDenied { .. } => Status::PermissionDenied,
            AppError::FailedPrecondition { .. } => Status::FailedPrecondition,
            AppError::Conflict { .. } => Status::Aborted,
            AppError::Internal { .. } | AppError::Config { .. } => Status::Internal,
        }
    }

    /// Only lost optimistic-lock races are safe to replay blindly.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    /// Detail safe to hand back to a caller; internal faults are redacted.
    pub fn public_detail(&self) -> String {
        match self.status() {
            Status::Internal => "Internal error".to_string(),
            _ => self.detail(),
        }
    }

    pub fn to_problem(&self) -> ProblemDetails {
        let code = self.code();
        ProblemDetails {
            status: self.status().as_str(),
            code: code.as_str().to_string(),
            title: Self::humanize_code(code.as_str()),
            detail: self.public_detail(),
            retryable: self.is_retryable(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn permission_denied(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::PermissionDenied {
            code,
            detail: detail.into(),
        }
    }

    pub fn failed_precondition(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::FailedPrecondition {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::GameNotActive => ErrorCode::GameNotActive,
                    ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                    ValidationKind::HoldsKing => ErrorCode::HoldsKing,
                    ValidationKind::EmptyHand => ErrorCode::EmptyHand,
                    ValidationKind::NoCardsRemain => ErrorCode::NoCardsRemain,
                    ValidationKind::NoEligibleNeighbor => ErrorCode::NoEligibleNeighbor,
                    ValidationKind::InvalidPlayerCount => ErrorCode::InvalidPlayerCount,
                    ValidationKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
                    ValidationKind::AlreadySeated => ErrorCode::AlreadySeated,
                    ValidationKind::ParseCard => ErrorCode::ParseCard,
                    ValidationKind::Other(_) => ErrorCode::FailedPrecondition,
                };
                AppError::failed_precondition(code, detail)
            }
            DomainError::Permission(kind, detail) => {
                let code = match kind {
                    PermissionKind::NotActivePlayer => ErrorCode::NotActivePlayer,
                    PermissionKind::NotDealer => ErrorCode::NotDealer,
                    PermissionKind::NotHost => ErrorCode::NotHost,
                };
                AppError::permission_denied(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::RoleNotUnique => ErrorCode::RoleNotUnique,
                    InfraErrorKind::TallyMismatch => ErrorCode::TallyMismatch,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    InfraErrorKind::Other(_) => ErrorCode::Internal,
                };
                AppError::Internal { code, detail }
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
