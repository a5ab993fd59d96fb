//! Agora - Governance Proposal Registry & Voting Ledger
//!
//! An append-only registry of timed governance proposals:
//! - one vote per identity per proposal, membership permanent
//! - tallies conserved: votes for + votes against == distinct voters
//! - status (Active/Passed/Failed) derived on demand from stored facts
//!   plus caller-supplied time, never cached
//! - `ProposalCreated`/`VoteCast` notifications for external observers
//!
//! State-changing operations are serialized behind one registry-wide lock
//! and are all-or-nothing across validation and persistence.

pub mod clock;
pub mod registry;
pub mod store;
