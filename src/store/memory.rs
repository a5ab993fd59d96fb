//! In-memory proposal store.
//!
//! Used for tests and ephemeral runs. Doubles as the test seam for
//! persistence failures: `fail_writes(true)` makes every write return an
//! error without touching state, which is how the all-or-nothing guarantee
//! of the service layer is exercised.

use crate::registry::types::{Proposal, ProposalId, VoterId};
use crate::store::traits::{ProposalStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Ephemeral store backed by a plain `Vec<Proposal>`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    proposals: Mutex<Vec<Proposal>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (test control).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn insert_proposal(&self, proposal: &Proposal) -> StoreResult<()> {
        self.check_writable()?;
        let mut proposals = self
            .proposals
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store poisoned".into()))?;
        proposals.push(proposal.clone());
        Ok(())
    }

    async fn record_vote(
        &self,
        id: ProposalId,
        voter: &VoterId,
        support: bool,
        _cast_at: u64,
    ) -> StoreResult<()> {
        self.check_writable()?;
        let mut proposals = self
            .proposals
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store poisoned".into()))?;
        let proposal = proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::Corrupt(format!("vote for unknown proposal {}", id)))?;

        if !proposal.voters.insert(voter.clone()) {
            return Err(StoreError::Corrupt(format!(
                "duplicate vote row for proposal {}",
                id
            )));
        }
        proposal.total_voters += 1;
        if support {
            proposal.votes_for += 1;
        } else {
            proposal.votes_against += 1;
        }
        Ok(())
    }

    async fn load_all(&self) -> StoreResult<Vec<Proposal>> {
        let proposals = self
            .proposals
            .lock()
            .map_err(|_| StoreError::Corrupt("memory store poisoned".into()))?;
        Ok(proposals.clone())
    }
}
