//! The session aggregate: session record, deck record, and one hand per seat.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::deck::{DeckState, Drawn};
use crate::domain::seed_derivation::derive_reshuffle_seed;
use crate::domain::state::{GameSession, PlayerId};
use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Per-player hand records. Every seated player has an entry.
pub type Hands = BTreeMap<PlayerId, Option<Card>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub session: GameSession,
    pub deck: DeckState,
    pub hands: Hands,
}

impl Table {
    pub fn new(session: GameSession, deck: DeckState) -> Self {
        let hands = session.players.iter().map(|p| (p.clone(), None)).collect();
        Self {
            session,
            deck,
            hands,
        }
    }

    pub fn hand(&self, player: &PlayerId) -> Option<Card> {
        self.hands.get(player).copied().flatten()
    }

    pub fn set_hand(&mut self, player: &PlayerId, card: Option<Card>) {
        self.hands.insert(player.clone(), card);
    }

    /// Draw via the deck, deriving the reshuffle seed from the session.
    pub fn draw_card(&mut self) -> Result<Drawn, DomainError> {
        let seed = derive_reshuffle_seed(
            self.session.rng_seed,
            self.session.round,
            self.session.reshuffles,
        );
        let drawn = self.deck.draw_one(seed)?;
        if drawn.reshuffled.is_some() {
            self.session.reshuffles += 1;
        }
        Ok(drawn)
    }

    /// Cards of living players, as revealed at the end of active play.
    pub fn live_hands(&self) -> BTreeMap<PlayerId, Card> {
        self.hands
            .iter()
            .filter(|(player, _)| self.session.is_alive(player))
            .filter_map(|(player, card)| card.map(|c| (player.clone(), c)))
            .collect()
    }

    /// Every card currently held, regardless of lives.
    pub fn held_cards(&self) -> BTreeMap<PlayerId, Card> {
        self.hands
            .iter()
            .filter_map(|(player, card)| card.map(|c| (player.clone(), c)))
            .collect()
    }

    /// Move every held card to the trash and empty all hands.
    pub fn clear_hands_to_trash(&mut self) -> usize {
        let mut moved = 0;
        for card in self.hands.values_mut() {
            if let Some(c) = card.take() {
                self.deck.discard(c);
                moved += 1;
            }
        }
        moved
    }

    /// Draw pile, trash, and hands together hold each of the 52 cards exactly once.
    pub fn check_card_conservation(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(52);
        let all = self.deck.cards().copied().chain(self.hands.values().flatten().copied());
        for card in all {
            if !seen.insert(card) {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Card {card} appears in more than one location"),
                ));
            }
        }
        if seen.len() != 52 {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Expected 52 cards in play, found {}", seen.len()),
            ));
        }
        Ok(())
    }
}
