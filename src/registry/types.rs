//! Core registry types: proposals, voters, status, governance parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Proposal identifier. Dense and 0-based: valid ids are `[0, total)`,
/// assigned at creation, never reused.
pub type ProposalId = u64;

/// Default voting window: 14 days from creation.
pub const DEFAULT_VOTING_PERIOD: Duration = Duration::from_secs(14 * 24 * 3600);

/// Default quorum: minimum affirmative votes for a proposal to pass
/// once its deadline has elapsed.
pub const DEFAULT_QUORUM: u32 = 1000;

/// Opaque voter/proposer identity.
///
/// Identities are trusted inputs supplied by the caller (an authenticated
/// service layer); the registry only compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterId(pub String);

impl VoterId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VoterId {
    fn from(s: &str) -> Self {
        VoterId(s.to_string())
    }
}

/// Governance parameters, constructed once at startup and threaded
/// explicitly into the registry (no global singleton).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Length of the voting window, fixed at proposal creation
    pub voting_period_secs: u64,

    /// Minimum `votes_for` required to pass after the deadline
    pub quorum: u32,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_period_secs: DEFAULT_VOTING_PERIOD.as_secs(),
            quorum: DEFAULT_QUORUM,
        }
    }
}

/// Derived proposal status. Computed on demand from stored facts plus the
/// caller-supplied current time; never cached, so successive calls may
/// return different answers as time advances with no new votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting window still open
    Active,
    /// Deadline elapsed with a majority and quorum (or executed with majority)
    Passed,
    /// Deadline elapsed without majority or quorum
    Failed,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStatus::Active => write!(f, "Active"),
            ProposalStatus::Passed => write!(f, "Passed"),
            ProposalStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A titled governance item subject to a timed vote.
///
/// Append-only: proposals are created, mutated only by votes, never deleted.
/// Invariant: `votes_for + votes_against == total_voters` at all times, and
/// the voter set contains exactly `total_voters` identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub proposer: VoterId,
    /// Creation timestamp (UNIX seconds, caller-supplied)
    pub created_at: u64,
    /// Absolute voting deadline: `created_at + voting period`, never mutated
    pub end_date: u64,
    pub votes_for: u32,
    pub votes_against: u32,
    /// Count of distinct voters; always equals `votes_for + votes_against`
    pub total_voters: u32,
    /// No exposed operation sets this; the execution branch of status
    /// derivation is kept for state imported from elsewhere.
    pub is_executed: bool,
    /// Identities that have voted. Membership is permanent (no retraction).
    pub voters: HashSet<VoterId>,
}

impl Proposal {
    /// Create a fresh proposal with zeroed tallies and an empty voter set.
    pub fn new(
        id: ProposalId,
        title: String,
        description: String,
        proposer: VoterId,
        created_at: u64,
        voting_period_secs: u64,
    ) -> Self {
        Self {
            id,
            title,
            description,
            proposer,
            created_at,
            end_date: created_at + voting_period_secs,
            votes_for: 0,
            votes_against: 0,
            total_voters: 0,
            is_executed: false,
            voters: HashSet::new(),
        }
    }

    /// Whether the voting window is still open at `now`.
    ///
    /// A vote cast exactly at the end date is accepted; the window closes
    /// strictly after it.
    pub fn voting_open(&self, now: u64) -> bool {
        now <= self.end_date
    }

    pub fn has_voted(&self, voter: &VoterId) -> bool {
        self.voters.contains(voter)
    }

    /// Derive the proposal status at `now`.
    ///
    /// 1. Executed proposals pass iff they hold a strict majority.
    /// 2. After the deadline, a proposal passes iff it holds a strict
    ///    majority AND `votes_for` meets the quorum.
    /// 3. Otherwise the proposal is still active.
    pub fn status(&self, now: u64, quorum: u32) -> ProposalStatus {
        let majority = self.votes_for > self.votes_against;

        if self.is_executed {
            if majority {
                ProposalStatus::Passed
            } else {
                ProposalStatus::Failed
            }
        } else if now > self.end_date {
            if majority && self.votes_for >= quorum {
                ProposalStatus::Passed
            } else {
                ProposalStatus::Failed
            }
        } else {
            ProposalStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> Proposal {
        Proposal::new(
            0,
            "Lower fees".to_string(),
            "Reduce fees to 0.1%".to_string(),
            VoterId::from("alice"),
            1_000,
            DEFAULT_VOTING_PERIOD.as_secs(),
        )
    }

    #[test]
    fn test_end_date_fixed_at_creation() {
        let p = proposal();
        assert_eq!(p.end_date, 1_000 + 14 * 24 * 3600);
    }

    #[test]
    fn test_voting_open_inclusive_of_end_date() {
        let p = proposal();
        assert!(p.voting_open(p.end_date));
        assert!(!p.voting_open(p.end_date + 1));
    }

    #[test]
    fn test_status_active_before_deadline() {
        let p = proposal();
        assert_eq!(p.status(p.end_date, DEFAULT_QUORUM), ProposalStatus::Active);
    }

    #[test]
    fn test_status_failed_after_deadline_without_quorum() {
        let mut p = proposal();
        p.votes_for = 999;
        p.votes_against = 1;
        p.total_voters = 1000;
        assert_eq!(
            p.status(p.end_date + 1, DEFAULT_QUORUM),
            ProposalStatus::Failed
        );
    }

    #[test]
    fn test_status_passed_after_deadline_with_quorum() {
        let mut p = proposal();
        p.votes_for = 1000;
        p.votes_against = 1;
        p.total_voters = 1001;
        assert_eq!(
            p.status(p.end_date + 1, DEFAULT_QUORUM),
            ProposalStatus::Passed
        );
    }

    #[test]
    fn test_status_executed_ignores_quorum() {
        let mut p = proposal();
        p.is_executed = true;
        p.votes_for = 2;
        p.votes_against = 1;
        p.total_voters = 3;
        assert_eq!(p.status(0, DEFAULT_QUORUM), ProposalStatus::Passed);

        p.votes_against = 2;
        p.votes_for = 2;
        assert_eq!(p.status(0, DEFAULT_QUORUM), ProposalStatus::Failed);
    }

    #[test]
    fn test_default_params() {
        let params = GovernanceParams::default();
        assert_eq!(params.voting_period_secs, 1_209_600);
        assert_eq!(params.quorum, 1000);
    }
}
