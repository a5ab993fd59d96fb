//! Pure proposal/voting state machine.
//!
//! The ledger is a synchronous, in-memory structure with no I/O. The async
//! service layer ([`crate::registry::service::Registry`]) wraps it in a lock
//! and persists through a store; the check/apply split below lets that layer
//! validate, write to the store, and only then mutate memory, keeping every
//! operation all-or-nothing even across persistence failures.

use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::types::{GovernanceParams, Proposal, ProposalId, ProposalStatus, VoterId};
use crate::store::StoreError;

/// Append-only proposal collection plus governance parameters.
///
/// Ids are dense: proposal `n` lives at index `n`, and the next id is always
/// the current length. Proposals are never removed, so ids are never reused.
#[derive(Debug, Clone)]
pub struct Ledger {
    proposals: Vec<Proposal>,
    params: GovernanceParams,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(params: GovernanceParams) -> Self {
        Self {
            proposals: Vec::new(),
            params,
        }
    }

    /// Rebuild a ledger from persisted proposals.
    ///
    /// Rejects snapshots that violate the registry invariants: ids must be
    /// dense and ordered, and tallies must be consistent with the voter set.
    pub fn from_proposals(
        params: GovernanceParams,
        mut proposals: Vec<Proposal>,
    ) -> RegistryResult<Self> {
        proposals.sort_by_key(|p| p.id);
        for (index, proposal) in proposals.iter().enumerate() {
            if proposal.id != index as ProposalId {
                return Err(StoreError::Corrupt(format!(
                    "proposal ids not dense: expected {} found {}",
                    index, proposal.id
                ))
                .into());
            }
            if proposal.votes_for + proposal.votes_against != proposal.total_voters
                || proposal.voters.len() != proposal.total_voters as usize
            {
                return Err(StoreError::Corrupt(format!(
                    "inconsistent tallies on proposal {}",
                    proposal.id
                ))
                .into());
            }
        }
        Ok(Self { proposals, params })
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Validate a create request and return the id it would be assigned.
    pub fn check_create(&self, title: &str, description: &str) -> RegistryResult<ProposalId> {
        if title.is_empty() {
            return Err(RegistryError::Validation("title must not be empty".into()));
        }
        if description.is_empty() {
            return Err(RegistryError::Validation(
                "description must not be empty".into(),
            ));
        }
        Ok(self.proposals.len() as ProposalId)
    }

    /// Append a proposal built by the caller after a successful
    /// [`check_create`](Self::check_create) under the same critical section.
    /// Returns the id it was stored under.
    pub fn apply_create(&mut self, proposal: Proposal) -> ProposalId {
        let id = proposal.id;
        self.proposals.push(proposal);
        id
    }

    /// Validate, build, and append a proposal in one step.
    pub fn create_proposal(
        &mut self,
        title: &str,
        description: &str,
        proposer: VoterId,
        now: u64,
    ) -> RegistryResult<ProposalId> {
        let id = self.check_create(title, description)?;
        let proposal = Proposal::new(
            id,
            title.to_string(),
            description.to_string(),
            proposer,
            now,
            self.params.voting_period_secs,
        );
        self.apply_create(proposal);
        Ok(id)
    }

    /// Validate a vote without mutating anything.
    pub fn check_vote(&self, id: ProposalId, voter: &VoterId, now: u64) -> RegistryResult<()> {
        let proposal = self.get(id)?;
        if !proposal.voting_open(now) {
            return Err(RegistryError::VotingClosed(id));
        }
        if proposal.has_voted(voter) {
            return Err(RegistryError::DuplicateVote {
                id,
                voter: voter.to_string(),
            });
        }
        Ok(())
    }

    /// Record a previously validated vote.
    ///
    /// Must follow a successful [`check_vote`](Self::check_vote) under the
    /// same critical section; re-checks the preconditions so a misuse cannot
    /// corrupt the tallies.
    pub fn apply_vote(
        &mut self,
        id: ProposalId,
        voter: VoterId,
        support: bool,
    ) -> RegistryResult<&Proposal> {
        // The window was checked by the caller; existence and dedup are
        // re-verified so a misuse cannot corrupt the tallies.
        let proposal = self
            .proposals
            .get_mut(id as usize)
            .ok_or(RegistryError::NotFound(id))?;
        if proposal.has_voted(&voter) {
            return Err(RegistryError::DuplicateVote {
                id,
                voter: voter.to_string(),
            });
        }

        proposal.voters.insert(voter);
        proposal.total_voters += 1;
        if support {
            proposal.votes_for += 1;
        } else {
            proposal.votes_against += 1;
        }
        Ok(proposal)
    }

    /// Validate and record a vote in one step.
    pub fn vote(
        &mut self,
        id: ProposalId,
        support: bool,
        voter: VoterId,
        now: u64,
    ) -> RegistryResult<()> {
        self.check_vote(id, &voter, now)?;
        self.apply_vote(id, voter, support)?;
        Ok(())
    }

    /// Vote in favor.
    pub fn vote_for(&mut self, id: ProposalId, voter: VoterId, now: u64) -> RegistryResult<()> {
        self.vote(id, true, voter, now)
    }

    /// Vote against.
    pub fn vote_against(&mut self, id: ProposalId, voter: VoterId, now: u64) -> RegistryResult<()> {
        self.vote(id, false, voter, now)
    }

    /// Look up a proposal by id.
    pub fn get(&self, id: ProposalId) -> RegistryResult<&Proposal> {
        self.proposals
            .get(id as usize)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Derive the status of a proposal at `now`.
    pub fn status(&self, id: ProposalId, now: u64) -> RegistryResult<ProposalStatus> {
        Ok(self.get(id)?.status(now, self.params.quorum))
    }

    /// Whether `voter` has voted on proposal `id`.
    pub fn has_voted(&self, id: ProposalId, voter: &VoterId) -> RegistryResult<bool> {
        Ok(self.get(id)?.has_voted(voter))
    }

    /// Number of proposals ever created.
    pub fn total_proposals(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// All proposals in id order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }
}
