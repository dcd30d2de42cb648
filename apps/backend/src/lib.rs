#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::sessions_mem::SessionStoreMem;
pub use config::GameConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use repos::sessions::{SessionRepo, SessionSnapshot, WriteSet};
pub use services::{CallResponse, GameFlowService, GameService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    kung_test_support::logging::init();
}
