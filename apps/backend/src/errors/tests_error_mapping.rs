// Unit tests for error mapping - pure domain logic without storage dependencies
use crate::error::Status;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, PermissionKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_failed_precondition() {
    let de = DomainError::validation(ValidationKind::HoldsKing, "Players with Kings cannot swap");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::HoldsKing);
    assert_eq!(app.status(), Status::FailedPrecondition);
    assert_eq!(app.public_detail(), "Players with Kings cannot swap");

    let seated = DomainError::validation(ValidationKind::AlreadySeated, "bo is already seated");
    let app: AppError = seated.into();
    assert_eq!(app.code().as_str(), "ALREADY_SEATED");
    assert_eq!(app.status(), Status::FailedPrecondition);

    let other = DomainError::validation(ValidationKind::Other("X".into()), "something");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::FailedPrecondition);
}

#[test]
fn maps_permission_to_permission_denied() {
    let de = DomainError::permission(PermissionKind::NotDealer, "Only the dealer can end the round");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "NOT_DEALER");
    assert_eq!(app.status().as_str(), "permission-denied");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status(), Status::NotFound);
}

#[test]
fn maps_conflict_as_retryable() {
    let c = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    let app: AppError = c.into();
    assert_eq!(app.code(), ErrorCode::OptimisticLock);
    assert_eq!(app.status(), Status::Aborted);
    assert!(app.is_retryable());
}

#[test]
fn maps_infra_to_internal_and_redacts() {
    let dup = DomainError::infra(InfraErrorKind::RoleNotUnique, "player p1 is dealer in 2 games");
    let app: AppError = dup.into();
    assert_eq!(app.code(), ErrorCode::RoleNotUnique);
    assert_eq!(app.status(), Status::Internal);
    assert!(!app.is_retryable());
    assert_eq!(app.public_detail(), "Internal error");
    assert!(app.detail().contains("2 games"));

    let problem = app.to_problem();
    assert_eq!(problem.status, "internal");
    assert_eq!(problem.code, "ROLE_NOT_UNIQUE");
    assert_eq!(problem.title, "Role Not Unique");
    assert_eq!(problem.detail, "Internal error");
}

#[test]
fn unauthenticated_has_its_own_status() {
    let app = AppError::unauthenticated();
    assert_eq!(app.status(), Status::Unauthenticated);
    assert_eq!(app.code(), ErrorCode::Unauthenticated);

    let json = serde_json::to_value(app.to_problem()).unwrap();
    assert_eq!(json["status"], "unauthenticated");
    assert_eq!(json["retryable"], false);
}
