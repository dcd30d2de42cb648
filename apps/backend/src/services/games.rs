//! Session lifecycle: creation, start, and reads.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info};

use super::game_flow::mutation::commit_mutation;
use super::game_flow::{locate_session, require_caller, CallResponse};
use crate::config::GameConfig;
use crate::domain::actions::{ActionLog, ActionRecord};
use crate::domain::game_transition::{gather, start};
use crate::domain::rules::{require_host, require_status};
use crate::domain::state::{GameStatus, PlayerId, Role, SessionId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::sessions::{NewSession, SessionRepo, SessionSnapshot};

#[derive(Clone)]
pub struct GameService {
    repo: Arc<dyn SessionRepo>,
    config: GameConfig,
}

impl GameService {
    pub fn new(repo: Arc<dyn SessionRepo>, config: GameConfig) -> Self {
        Self { repo, config }
    }

    /// Seat `players` in the given order with the caller as host.
    pub async fn create_game(
        &self,
        host: Option<&PlayerId>,
        players: Vec<PlayerId>,
    ) -> Result<SessionId, AppError> {
        let host = require_caller(host)?;

        let seed = self.config.session_seed()?;
        let mut log = ActionLog::new(0, OffsetDateTime::now_utc());
        let table = gather(0, host, players, self.config.max_players, seed, &mut log)?;
        let seats = table.session.players.len();

        for player in &table.session.players {
            self.ensure_unseated(player).await?;
        }

        let session_id = self
            .repo
            .insert(NewSession {
                table,
                actions: log.into_records(),
            })
            .await?;
        info!(session_id, %host, seats, "Game created");
        Ok(session_id)
    }

    /// A player sits in at most one unfinished game, so role lookups stay unique.
    async fn ensure_unseated(&self, player: &PlayerId) -> Result<(), AppError> {
        for status in [GameStatus::Gathering, GameStatus::Active] {
            let seated = self.repo.find_by_role(player, Role::Seated, status).await?;
            if let Some(id) = seated.first() {
                debug!(%player, session_id = *id, %status, "Player already seated");
                return Err(DomainError::validation(
                    ValidationKind::AlreadySeated,
                    format!("{player} is already seated in {status} game {id}"),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Deal the opening hand of lives and shuffle the deck. Host only.
    pub async fn start_game(&self, caller: Option<&PlayerId>) -> Result<CallResponse, AppError> {
        let player = require_caller(caller)?;
        let session_id =
            locate_session(self.repo.as_ref(), player, Role::Host, GameStatus::Gathering).await?;
        let starting_lives = self.config.starting_lives;

        commit_mutation(
            self.repo.as_ref(),
            session_id,
            player,
            "start",
            move |table, player, log| {
                require_status(&table.session, GameStatus::Gathering)?;
                require_host(&table.session, player)?;
                start(table, starting_lives, log)
            },
        )
        .await?;

        info!(session_id, host = %player, starting_lives, "Game started");
        Ok(CallResponse::OK)
    }

    /// The committed aggregate, hands included. Operator view.
    pub async fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, AppError> {
        Ok(self.repo.load(session_id).await?)
    }

    /// Public log plus the viewer's own private records.
    pub async fn actions_visible_to(
        &self,
        session_id: SessionId,
        viewer: Option<&PlayerId>,
    ) -> Result<Vec<ActionRecord>, AppError> {
        let viewer = require_caller(viewer)?;
        Ok(self.repo.actions_visible_to(session_id, viewer).await?)
    }
}
