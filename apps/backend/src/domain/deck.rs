//! Draw pile / trash pile bookkeeping for one session.
//!
//! Card identity is opaque here: tokens are only relocated, never created or
//! destroyed. The top of the draw pile is the end of `draw`.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards_types::full_deck;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub draw: Vec<Card>,
    pub trash: Vec<Card>,
}

/// Result of a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawn {
    pub card: Card,
    /// Number of trash cards recycled into the draw pile before this draw.
    pub reshuffled: Option<usize>,
}

/// Fisher-Yates shuffle driven by a seeded ChaCha stream.
fn shuffle_with_seed(cards: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    cards.shuffle(&mut rng);
}

impl DeckState {
    /// Full 52-card draw pile in seeded random order, empty trash.
    pub fn shuffled(seed: u64) -> Self {
        let mut draw = full_deck();
        shuffle_with_seed(&mut draw, seed);
        Self {
            draw,
            trash: Vec::new(),
        }
    }

    /// Pop the top card, recycling the trash first when the pile is empty.
    ///
    /// `reshuffle_seed` is only consumed when a reshuffle happens.
    pub fn draw_one(&mut self, reshuffle_seed: u64) -> Result<Drawn, DomainError> {
        let mut reshuffled = None;

        if self.draw.is_empty() {
            if self.trash.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::NoCardsRemain,
                    "No cards left in deck or trash",
                ));
            }
            let mut recycled = std::mem::take(&mut self.trash);
            shuffle_with_seed(&mut recycled, reshuffle_seed);
            reshuffled = Some(recycled.len());
            self.draw = recycled;
        }

        let card = self.draw.pop().ok_or_else(|| {
            DomainError::validation(ValidationKind::NoCardsRemain, "No cards left in deck")
        })?;
        Ok(Drawn { card, reshuffled })
    }

    pub fn discard(&mut self, card: Card) {
        self.trash.push(card);
    }

    /// Cards held by the deck record (draw + trash).
    pub fn len(&self) -> usize {
        self.draw.len() + self.trash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty() && self.trash.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw.iter().chain(self.trash.iter())
    }
}
