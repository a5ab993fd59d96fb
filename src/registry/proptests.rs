//! Property-based tests for the voting ledger
//!
//! Tests for:
//! - Tally conservation: votes_for + votes_against == total_voters after
//!   every accepted vote
//! - Dedup: a second vote by the same identity always fails and never
//!   changes tallies
//! - Window: votes after the deadline always fail and never change tallies
//! - Id density after arbitrary create sequences

use super::error::RegistryError;
use super::ledger::Ledger;
use super::types::{GovernanceParams, VoterId};
use proptest::prelude::*;

fn voter(n: u16) -> VoterId {
    VoterId(format!("voter-{}", n))
}

proptest! {
    /// Property: tallies are conserved across any sequence of votes,
    /// accepted or rejected.
    #[test]
    fn tally_conservation(
        votes in prop::collection::vec((0u16..64, any::<bool>()), 0..200),
    ) {
        let mut ledger = Ledger::new(GovernanceParams::default());
        ledger.create_proposal("t", "d", voter(0), 0).unwrap();

        for (voter_n, support) in votes {
            let _ = ledger.vote(0, support, voter(voter_n), 1);
            let p = ledger.get(0).unwrap();
            prop_assert_eq!(p.votes_for + p.votes_against, p.total_voters);
            prop_assert_eq!(p.voters.len() as u32, p.total_voters);
        }
    }

    /// Property: distinct voters are all counted exactly once.
    #[test]
    fn distinct_voters_all_counted(
        supports in prop::collection::vec(any::<bool>(), 1..100),
    ) {
        let mut ledger = Ledger::new(GovernanceParams::default());
        ledger.create_proposal("t", "d", voter(0), 0).unwrap();

        for (n, support) in supports.iter().enumerate() {
            ledger.vote(0, *support, voter(n as u16), 1).unwrap();
        }

        let p = ledger.get(0).unwrap();
        prop_assert_eq!(p.total_voters as usize, supports.len());
        prop_assert_eq!(
            p.votes_for as usize,
            supports.iter().filter(|s| **s).count()
        );
    }

    /// Property: the second vote by the same identity always fails with
    /// DuplicateVote, regardless of direction, and tallies stay put.
    #[test]
    fn duplicate_always_rejected(first in any::<bool>(), second in any::<bool>()) {
        let mut ledger = Ledger::new(GovernanceParams::default());
        ledger.create_proposal("t", "d", voter(0), 0).unwrap();
        ledger.vote(0, first, voter(1), 1).unwrap();

        let before = ledger.get(0).unwrap().clone();
        let err = ledger.vote(0, second, voter(1), 1).unwrap_err();
        prop_assert!(
            matches!(err, RegistryError::DuplicateVote { .. }),
            "expected DuplicateVote, got {:?}",
            err
        );
        prop_assert_eq!(ledger.get(0).unwrap(), &before);
    }

    /// Property: votes strictly after the deadline always fail with
    /// VotingClosed and leave tallies unchanged.
    #[test]
    fn late_votes_always_rejected(late_by in 1u64..1_000_000) {
        let mut ledger = Ledger::new(GovernanceParams::default());
        ledger.create_proposal("t", "d", voter(0), 0).unwrap();
        let end = ledger.get(0).unwrap().end_date;

        let err = ledger.vote(0, true, voter(1), end + late_by).unwrap_err();
        prop_assert!(matches!(err, RegistryError::VotingClosed(0)));
        prop_assert_eq!(ledger.get(0).unwrap().total_voters, 0);
    }

    /// Property: ids stay dense and ordered under arbitrary create sequences.
    #[test]
    fn ids_stay_dense(count in 0usize..50) {
        let mut ledger = Ledger::new(GovernanceParams::default());
        for i in 0..count {
            let id = ledger.create_proposal("t", "d", voter(0), i as u64).unwrap();
            prop_assert_eq!(id, i as u64);
        }
        prop_assert_eq!(ledger.total_proposals(), count as u64);
    }
}
