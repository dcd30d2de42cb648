use tracing::{info, warn};

use super::mutation::commit_mutation;
use super::{CallResponse, GameFlowService};
use crate::domain::dealing::deal_round;
use crate::domain::game_transition::{settle, Settlement};
use crate::domain::rules::{require_active_player, require_dealer, require_round_state, require_status};
use crate::domain::state::{GameStatus, PlayerId, Role, RoundState, SessionId};
use crate::domain::tally::end_round;
use crate::error::AppError;

impl GameFlowService {
    /// Deal one card to every living player, starting left of the dealer.
    ///
    /// A session left in PreDeal with at most one player alive is settled
    /// instead of dealt.
    pub async fn deal_cards(&self, caller: Option<&PlayerId>) -> Result<CallResponse, AppError> {
        let committed = self
            .run_mutation(caller, Role::Dealer, "deal", |table, player, log| {
                require_status(&table.session, GameStatus::Active)?;
                require_round_state(&table.session, RoundState::PreDeal)?;
                require_dealer(&table.session, player)?;
                require_active_player(&table.session, player)?;
                if table.session.alive_players().len() < 2 {
                    return Ok(DealOutcome::Settled(settle(table)));
                }
                deal_round(table, player, log).map(DealOutcome::Dealt)
            })
            .await?;

        match committed.outcome {
            DealOutcome::Dealt(order) => info!(
                session_id = committed.session_id,
                round = committed.snapshot.table.session.round,
                dealt = order.len(),
                "Round dealt"
            ),
            DealOutcome::Settled(settlement) => {
                log_settlement(committed.session_id, &settlement);
            }
        }
        Ok(CallResponse::OK)
    }

    /// Close a revealed round: charge the losers, clear hands, rotate the
    /// dealer. Settles the game when at most one player survives.
    pub async fn request_end_round(
        &self,
        caller: Option<&PlayerId>,
    ) -> Result<CallResponse, AppError> {
        let committed = self
            .run_mutation(caller, Role::Dealer, "end_round", |table, player, log| {
                require_status(&table.session, GameStatus::Active)?;
                require_round_state(&table.session, RoundState::Tallying)?;
                require_dealer(&table.session, player)?;
                require_active_player(&table.session, player)?;
                end_round(table, player, log)
            })
            .await?;

        let summary = committed.outcome;
        info!(
            session_id = committed.session_id,
            round = committed.snapshot.table.session.round,
            losers = ?summary.losers,
            new_dealer = %summary.new_dealer,
            survivors = summary.survivors,
            "Round ended"
        );

        if summary.game_ended {
            let player = super::require_caller(caller)?;
            // The round is committed either way; a failed settle is retried
            // by the next deal.
            if let Err(err) = self.settle_game(committed.session_id, player).await {
                warn!(
                    session_id = committed.session_id,
                    code = %err.code(),
                    detail = %err.detail(),
                    "Settlement after final round failed"
                );
            }
        }
        Ok(CallResponse::OK)
    }

    /// Move an Active session to Ended once at most one player has lives.
    /// A no-op for sessions that are still contested or already settled.
    pub async fn settle_game(
        &self,
        session_id: SessionId,
        actor: &PlayerId,
    ) -> Result<Settlement, AppError> {
        let committed = commit_mutation(
            self.repo.as_ref(),
            session_id,
            actor,
            "settle",
            |table, _, _| Ok(settle(table)),
        )
        .await?;

        log_settlement(session_id, &committed.outcome);
        Ok(committed.outcome)
    }
}

enum DealOutcome {
    Dealt(Vec<PlayerId>),
    Settled(Settlement),
}

fn log_settlement(session_id: SessionId, settlement: &Settlement) {
    if let Settlement::Ended { winner } = settlement {
        match winner {
            Some(winner) => info!(session_id, %winner, "Game over"),
            None => info!(session_id, "Game over; no survivors"),
        }
    }
}
