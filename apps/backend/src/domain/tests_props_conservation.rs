//! Property tests over random play sequences.
//!
//! Properties tested:
//! - Draw pile, trash and hands always hold the 52 cards exactly once
//! - Lives never increase and never go below zero
//! - PreDeal tables hold no cards; eliminated players hold none while playing
//! - Dealer and active player stay seated
//! - A rejected step leaves the table untouched once restored

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::actions::ActionLog;
use crate::domain::dealing::deal_round;
use crate::domain::game_transition::settle;
use crate::domain::state::{GameStatus, RoundState};
use crate::domain::swap::resolve_swap;
use crate::domain::table::Table;
use crate::domain::tally::{end_round, resolve_stick};
use crate::domain::test_gens::{self, Step};
use crate::domain::test_prelude;
use crate::errors::domain::{DomainError, ValidationKind};

/// Apply `step` the way the turn controller would, using the role holder as caller.
/// Steps that do not fit the current phase are skipped.
fn apply(table: &mut Table, step: Step) -> Result<(), DomainError> {
    if table.session.status != GameStatus::Active {
        return Ok(());
    }
    let mut log = ActionLog::new(0, OffsetDateTime::UNIX_EPOCH);
    let dealer = table.session.dealer.clone();
    let active = table.session.active_player.clone();

    match (step, table.session.round_state) {
        (Step::Deal, RoundState::PreDeal) => deal_round(table, &dealer, &mut log).map(drop),
        (Step::Swap, RoundState::Playing) => resolve_swap(table, &active, &mut log).map(drop),
        (Step::Stick, RoundState::Playing) => resolve_stick(table, &active, &mut log).map(drop),
        (Step::EndRound, RoundState::Tallying) => {
            end_round(table, &dealer, &mut log)?;
            settle(table);
            Ok(())
        }
        _ => Ok(()),
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_random_play_preserves_invariants(
        start in test_gens::pre_deal_table(),
        steps in proptest::collection::vec(test_gens::step(), 1..120),
    ) {
        let mut table = start;
        prop_assert!(table.check_card_conservation().is_ok());

        for step in steps {
            let before = table.clone();
            match apply(&mut table, step) {
                Ok(()) => {}
                Err(DomainError::Validation(ValidationKind::HoldsKing, _)) => {
                    table = before.clone();
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }

            prop_assert!(table.check_card_conservation().is_ok());

            let session = &table.session;
            prop_assert!(session.is_seated(&session.dealer));
            prop_assert!(session.is_seated(&session.active_player));
            for (player, lives) in &session.lives {
                prop_assert!(*lives <= before.session.lives_of(player));
            }
            match session.round_state {
                RoundState::PreDeal => {
                    prop_assert!(table.hands.values().all(Option::is_none));
                }
                RoundState::Playing => {
                    for (player, card) in &table.hands {
                        prop_assert_eq!(card.is_some(), session.is_alive(player));
                    }
                }
                RoundState::Tallying => {}
            }
        }
    }

    #[test]
    fn prop_game_always_terminates_with_at_most_one_survivor(
        start in test_gens::pre_deal_table(),
    ) {
        let mut table = start;
        let cycle = [Step::Deal, Step::Stick, Step::Swap, Step::Stick, Step::EndRound];
        let mut guard = 0;

        while table.session.status == GameStatus::Active && guard < 20_000 {
            let step = cycle[guard % cycle.len()];
            let before = table.clone();
            if apply(&mut table, step).is_err() {
                table = before;
                // A King holder on turn sticks instead.
                apply(&mut table, Step::Stick).map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
            guard += 1;
        }

        prop_assert_eq!(table.session.status, GameStatus::Ended);
        prop_assert!(table.session.alive_players().len() <= 1);
        prop_assert_eq!(
            table.session.winner.is_some(),
            table.session.alive_players().len() == 1
        );
    }
}
