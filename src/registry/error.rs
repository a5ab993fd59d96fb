//! Registry error taxonomy.
//!
//! Every state-changing operation is all-or-nothing: any error below leaves
//! the registry exactly as it was before the call. Errors are surfaced
//! synchronously to the caller and never retried automatically.

use crate::registry::types::ProposalId;
use crate::store::StoreError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Rejected input (empty title or description)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown proposal id
    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    /// Vote arrived after the proposal's end date
    #[error("voting closed for proposal {0}")]
    VotingClosed(ProposalId),

    /// Voter already recorded on this proposal
    #[error("voter {voter} already voted on proposal {id}")]
    DuplicateVote { id: ProposalId, voter: String },

    /// Persistence-layer failure (write rejected before any mutation)
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
