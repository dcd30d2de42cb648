//! Self-play simulation over the in-memory store.
//!
//! Usage: `kung-sim [PLAYER ...]` (defaults to four seats). Table rules come
//! from the `KUNG_*` environment variables; set `KUNG_SHUFFLE_SEED` for a
//! reproducible game.

use std::sync::Arc;

use kung_backend::domain::state::{GameStatus, PlayerId, RoundState};
use kung_backend::domain::Rank;
use kung_backend::telemetry;
use kung_backend::{AppError, GameConfig, GameFlowService, GameService, SessionRepo, SessionStoreMem};
use tracing::info;

/// Players keep any card at or above this rank.
const STICK_AT: Rank = Rank::Seven;
const MAX_STEPS: usize = 100_000;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    if let Err(err) = run().await {
        eprintln!("kung-sim failed: {} ({})", err.detail(), err.code());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    let mut players: Vec<PlayerId> = std::env::args().skip(1).map(PlayerId::from).collect();
    if players.is_empty() {
        players = (1..=4).map(|i| PlayerId::new(format!("P{i}"))).collect();
    }
    let host = players[0].clone();

    let repo: Arc<dyn SessionRepo> = Arc::new(SessionStoreMem::new());
    let games = GameService::new(Arc::clone(&repo), config.clone());
    let flow = GameFlowService::new(repo, config);

    let session_id = games.create_game(Some(&host), players).await?;
    games.start_game(Some(&host)).await?;

    for _ in 0..MAX_STEPS {
        let snap = games.snapshot(session_id).await?;
        let session = &snap.table.session;

        match (session.status, session.round_state) {
            (GameStatus::Ended, _) => {
                let actions = games.actions_visible_to(session_id, Some(&host)).await?;
                match &session.winner {
                    Some(winner) => println!(
                        "{winner} wins after {} rounds ({} actions)",
                        session.round - 1,
                        actions.len()
                    ),
                    None => println!("No survivors after {} rounds", session.round - 1),
                }
                return Ok(());
            }
            (GameStatus::Gathering, _) => {
                games.start_game(Some(&session.host)).await?;
            }
            (GameStatus::Active, RoundState::PreDeal) => {
                flow.deal_cards(Some(&session.dealer)).await?;
            }
            (GameStatus::Active, RoundState::Playing) => {
                let player = &session.active_player;
                let keep = snap
                    .table
                    .hand(player)
                    .is_none_or(|card| card.rank >= STICK_AT);
                if keep {
                    flow.request_stick(Some(player)).await?;
                } else {
                    flow.request_swap(Some(player)).await?;
                }
            }
            (GameStatus::Active, RoundState::Tallying) => {
                info!(session_id, round = session.round, "Closing round");
                flow.request_end_round(Some(&session.dealer)).await?;
            }
        }
    }

    Err(AppError::internal(format!(
        "Game did not finish within {MAX_STEPS} steps"
    )))
}
