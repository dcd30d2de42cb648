//! Fixtures for service-level tests: tables with chosen hands, and a
//! harness wiring both services over one in-memory store.

use std::sync::Arc;

use kung_backend::domain::state::{GameSession, GameStatus, RoundState, SessionId};
use kung_backend::domain::table::Table;
use kung_backend::domain::{full_deck, ActionRecord, Card, DeckState, PlayerId};
use kung_backend::repos::sessions::NewSession;
use kung_backend::{GameConfig, GameFlowService, GameService, SessionRepo, SessionStoreMem};

pub fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

pub fn card(token: &str) -> Card {
    token.parse().expect("fixture card token")
}

/// Active session in Playing: seats in the given order, 3 lives each,
/// dealer = first seat, active = second seat, `top_of_draw` on top of the
/// draw pile and every other card below it.
pub fn table_with(hands: &[(&str, &str)], top_of_draw: &str) -> Table {
    let players: Vec<PlayerId> = hands.iter().map(|(p, _)| pid(p)).collect();
    let session = GameSession {
        id: 0,
        lives: players.iter().map(|p| (p.clone(), 3)).collect(),
        host: players[0].clone(),
        dealer: players[0].clone(),
        active_player: players[1].clone(),
        players,
        round: 1,
        round_state: RoundState::Playing,
        status: GameStatus::Active,
        winner: None,
        rng_seed: 2024,
        reshuffles: 0,
        pending_tally: None,
        lock_version: 0,
    };

    let held: Vec<Card> = hands.iter().map(|(_, c)| card(c)).collect();
    let top = card(top_of_draw);
    let mut draw: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !held.contains(c) && *c != top)
        .collect();
    draw.push(top);

    let mut table = Table::new(
        session,
        DeckState {
            draw,
            trash: Vec::new(),
        },
    );
    for (p, c) in hands {
        table.set_hand(&pid(p), Some(card(c)));
    }
    table
}

pub struct Harness {
    pub store: Arc<SessionStoreMem>,
    pub flow: GameFlowService,
    pub games: GameService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GameConfig {
            shuffle_seed: Some(7),
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: GameConfig) -> Self {
        let store = Arc::new(SessionStoreMem::new());
        let repo: Arc<dyn SessionRepo> = store.clone();
        Self::wired(store, repo, config)
    }

    /// Services over `repo`, which must wrap `store`. Seeding and reads that
    /// go through `store` bypass the wrapper.
    pub fn over_repo(store: Arc<SessionStoreMem>, repo: Arc<dyn SessionRepo>) -> Self {
        Self::wired(
            store,
            repo,
            GameConfig {
                shuffle_seed: Some(7),
                ..GameConfig::default()
            },
        )
    }

    fn wired(store: Arc<SessionStoreMem>, repo: Arc<dyn SessionRepo>, config: GameConfig) -> Self {
        Self {
            flow: GameFlowService::new(Arc::clone(&repo), config.clone()),
            games: GameService::new(repo, config),
            store,
        }
    }

    /// Insert a prepared table directly, bypassing create/start/deal.
    pub async fn seed(&self, table: Table) -> SessionId {
        self.store
            .insert(NewSession {
                table,
                actions: Vec::new(),
            })
            .await
            .expect("seed session")
    }

    pub async fn table(&self, session_id: SessionId) -> Table {
        self.games
            .snapshot(session_id)
            .await
            .expect("load session")
            .table
    }

    pub async fn log_for(&self, session_id: SessionId, viewer: &str) -> Vec<ActionRecord> {
        self.games
            .actions_visible_to(session_id, Some(&pid(viewer)))
            .await
            .expect("load actions")
    }
}

/// Public record type names, in order.
pub fn public_types(records: &[ActionRecord]) -> Vec<&'static str> {
    records
        .iter()
        .filter(|r| !r.kind.is_private())
        .map(|r| r.kind.type_name())
        .collect()
}
