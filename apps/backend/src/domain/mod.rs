//! Domain layer: pure game rules over the session aggregate.

pub mod actions;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod deck;
pub mod game_transition;
pub mod rules;
pub mod seating;
pub mod seed_derivation;
pub mod state;
pub mod swap;
pub mod table;
pub mod tally;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_scenarios;

pub use actions::{ActionKind, ActionLog, ActionRecord};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{full_deck, Card, Rank, Suit};
pub use deck::{DeckState, Drawn};
pub use game_transition::Settlement;
pub use seating::next_living_left;
pub use state::{GameSession, GameStatus, PlayerId, Role, RoundState, SessionId};
pub use swap::SwapOutcome;
pub use table::{Hands, Table};
pub use tally::{lowest_card_losers, RoundSummary, StickOutcome};
