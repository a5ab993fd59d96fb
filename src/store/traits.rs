//! Store trait abstraction.

use crate::registry::types::{Proposal, ProposalId, VoterId};
use async_trait::async_trait;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt store: {0}")]
    Corrupt(String),

    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Persistence seam for the proposal registry.
///
/// The service layer calls `insert_proposal`/`record_vote` inside the same
/// critical section that guards the in-memory ledger, after validation and
/// before the in-memory mutation: a failed write therefore leaves the
/// registry untouched.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Persist a freshly created proposal (zeroed tallies, empty voter set).
    async fn insert_proposal(&self, proposal: &Proposal) -> StoreResult<()>;

    /// Persist one vote: the voter-set row plus the matching tally bump.
    async fn record_vote(
        &self,
        id: ProposalId,
        voter: &VoterId,
        support: bool,
        cast_at: u64,
    ) -> StoreResult<()>;

    /// Load every proposal, voter sets included, in id order.
    async fn load_all(&self) -> StoreResult<Vec<Proposal>>;
}
