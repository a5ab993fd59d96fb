//! Proposal Registry & Voting Ledger.
//!
//! An append-only collection of governance proposals with one-vote-per-
//! identity enforcement, time-derived status, and change notifications.
//!
//! - [`ledger`] is the pure state machine (no I/O, no locks).
//! - [`service`] wraps it with lock scoping, persistence, and events.
//! - [`events`] carries the `ProposalCreated`/`VoteCast` notifications.

pub mod error;
pub mod events;
pub mod ledger;
pub mod service;
pub mod types;

#[cfg(test)]
mod proptests;

pub use error::{RegistryError, RegistryResult};
pub use events::{EventStream, RegistryEvent};
pub use ledger::Ledger;
pub use service::Registry;
pub use types::{
    GovernanceParams, Proposal, ProposalId, ProposalStatus, VoterId, DEFAULT_QUORUM,
    DEFAULT_VOTING_PERIOD,
};
