//! Service layer: request handling over the session repository.

pub mod game_flow;
pub mod games;

pub use game_flow::{CallResponse, GameFlowService};
pub use games::GameService;
