//! Proposal persistence.
//!
//! The registry talks to storage through the [`ProposalStore`] trait so the
//! service layer can run against SQLite in production and an in-memory store
//! in tests or ephemeral deployments. Every store preserves the registry's
//! append-only, dense-id semantics; the voter set is backed by one row per
//! `(proposal, voter)` pair, which makes duplicate votes unrepresentable at
//! the storage level too.

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ProposalStore, StoreError, StoreResult};
