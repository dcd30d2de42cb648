use tracing::info;

use super::{CallResponse, GameFlowService};
use crate::domain::rules::{require_active_player, require_round_state, require_status};
use crate::domain::state::{GameStatus, PlayerId, Role, RoundState};
use crate::domain::swap::{resolve_swap, SwapOutcome};
use crate::domain::tally::{resolve_stick, StickOutcome};
use crate::error::AppError;

impl GameFlowService {
    /// Swap the caller's card with the next living player, or draw from the
    /// deck when the caller is the dealer.
    pub async fn request_swap(&self, caller: Option<&PlayerId>) -> Result<CallResponse, AppError> {
        let committed = self
            .run_mutation(caller, Role::ActivePlayer, "swap", |table, player, log| {
                require_status(&table.session, GameStatus::Active)?;
                require_round_state(&table.session, RoundState::Playing)?;
                require_active_player(&table.session, player)?;
                resolve_swap(table, player, log)
            })
            .await?;

        let session_id = committed.session_id;
        let round = committed.snapshot.table.session.round;
        match committed.outcome {
            SwapOutcome::DealerDraw { reshuffled, .. } => {
                info!(session_id, round, ?reshuffled, "Dealer drew; round moved to tallying");
            }
            SwapOutcome::KingBlock { neighbor, .. } => {
                info!(session_id, round, %neighbor, "Swap blocked by a King");
            }
            SwapOutcome::Exchange { neighbor, .. } => {
                info!(session_id, round, %neighbor, "Cards exchanged");
            }
        }
        Ok(CallResponse::OK)
    }

    /// Keep the current card. When the dealer sticks, hands are revealed and
    /// the lowest card loses a life.
    pub async fn request_stick(&self, caller: Option<&PlayerId>) -> Result<CallResponse, AppError> {
        let committed = self
            .run_mutation(caller, Role::ActivePlayer, "stick", |table, player, log| {
                require_status(&table.session, GameStatus::Active)?;
                require_round_state(&table.session, RoundState::Playing)?;
                require_active_player(&table.session, player)?;
                resolve_stick(table, player, log)
            })
            .await?;

        let session_id = committed.session_id;
        let round = committed.snapshot.table.session.round;
        match committed.outcome {
            StickOutcome::Passed { next } => {
                info!(session_id, round, %next, "Stuck; turn passed");
            }
            StickOutcome::Revealed { losers } => {
                info!(session_id, round, ?losers, "Dealer stuck; hands revealed");
            }
        }
        Ok(CallResponse::OK)
    }
}
