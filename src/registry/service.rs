//! Registry service: concurrency, persistence, and notifications.
//!
//! [`Registry`] is the call surface consumers use. It owns the pure
//! [`Ledger`] behind an async `RwLock`: each state-changing operation holds
//! the write guard for the whole read-check-persist-apply sequence (released
//! on every exit path), so duplicate-vote detection and tally increments are
//! atomic per call. Read-only operations take the read side and may run
//! concurrently; they always observe a consistent snapshot. Events are
//! published inside the same critical section (the channel send never
//! blocks), so subscribers observe mutations in commit order.
//!
//! The registry is an explicit context object, constructed once at startup
//! from a store and [`GovernanceParams`] and threaded to whoever needs it.
//! There is no global instance.

use crate::registry::error::RegistryResult;
use crate::registry::events::{EventSender, EventStream, RegistryEvent};
use crate::registry::ledger::Ledger;
use crate::registry::types::{GovernanceParams, Proposal, ProposalId, ProposalStatus, VoterId};
use crate::store::ProposalStore;
use std::sync::{Mutex, PoisonError};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Proposal registry and voting ledger over a persistent store.
pub struct Registry<S: ProposalStore> {
    ledger: RwLock<Ledger>,
    store: S,
    subscribers: Mutex<Vec<EventSender>>,
}

impl<S: ProposalStore> Registry<S> {
    /// Open a registry, rebuilding the ledger from the store's contents.
    pub async fn open(store: S, params: GovernanceParams) -> RegistryResult<Self> {
        let proposals = store.load_all().await?;
        let ledger = Ledger::from_proposals(params, proposals)?;
        info!(
            proposals = ledger.total_proposals(),
            quorum = params.quorum,
            "registry opened"
        );
        Ok(Self {
            ledger: RwLock::new(ledger),
            store,
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Subscribe to registry change notifications.
    pub fn subscribe(&self) -> EventStream {
        let (stream, sender) = EventStream::new();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        stream
    }

    /// Must be called while the ledger write guard is held: events leave in
    /// commit order only because publishing sits inside the critical section.
    fn publish(&self, event: RegistryEvent) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|sender| sender.send(event.clone()));
    }

    /// Create a proposal. Returns the new dense id.
    ///
    /// Emits [`RegistryEvent::ProposalCreated`] on success; rejects empty
    /// title or description without mutating anything.
    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        proposer: VoterId,
        now: u64,
    ) -> RegistryResult<ProposalId> {
        let mut ledger = self.ledger.write().await;
        let id = ledger.check_create(title, description)?;
        let proposal = Proposal::new(
            id,
            title.to_string(),
            description.to_string(),
            proposer,
            now,
            ledger.params().voting_period_secs,
        );
        self.store.insert_proposal(&proposal).await?;

        let event = RegistryEvent::ProposalCreated {
            id,
            title: proposal.title.clone(),
            proposer: proposal.proposer.clone(),
            end_date: proposal.end_date,
        };
        ledger.apply_create(proposal);

        info!(id, "proposal created");
        self.publish(event);
        Ok(id)
    }

    /// Cast a vote on a proposal.
    ///
    /// Emits [`RegistryEvent::VoteCast`] carrying the updated tallies.
    /// Fails with `NotFound`, `VotingClosed`, or `DuplicateVote`; every
    /// failure path leaves the ledger and the store untouched.
    pub async fn vote(
        &self,
        id: ProposalId,
        support: bool,
        voter: VoterId,
        now: u64,
    ) -> RegistryResult<()> {
        let mut ledger = self.ledger.write().await;
        ledger.check_vote(id, &voter, now)?;
        self.store.record_vote(id, &voter, support, now).await?;

        let proposal = ledger.apply_vote(id, voter.clone(), support)?;
        let event = RegistryEvent::VoteCast {
            id,
            voter,
            support,
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            total_voters: proposal.total_voters,
        };
        debug!(
            id,
            votes_for = proposal.votes_for,
            votes_against = proposal.votes_against,
            "vote cast"
        );

        self.publish(event);
        Ok(())
    }

    /// Vote in favor of a proposal.
    pub async fn vote_for(&self, id: ProposalId, voter: VoterId, now: u64) -> RegistryResult<()> {
        self.vote(id, true, voter, now).await
    }

    /// Vote against a proposal.
    pub async fn vote_against(
        &self,
        id: ProposalId,
        voter: VoterId,
        now: u64,
    ) -> RegistryResult<()> {
        self.vote(id, false, voter, now).await
    }

    /// Fetch the full record for a proposal.
    pub async fn get_proposal(&self, id: ProposalId) -> RegistryResult<Proposal> {
        let ledger = self.ledger.read().await;
        Ok(ledger.get(id)?.clone())
    }

    /// Derive a proposal's status at `now`. Pure view, never cached.
    pub async fn status(&self, id: ProposalId, now: u64) -> RegistryResult<ProposalStatus> {
        let ledger = self.ledger.read().await;
        ledger.status(id, now)
    }

    /// Whether `voter` has voted on proposal `id`.
    pub async fn has_voted(&self, id: ProposalId, voter: &VoterId) -> RegistryResult<bool> {
        let ledger = self.ledger.read().await;
        ledger.has_voted(id, voter)
    }

    /// Number of proposals ever created.
    pub async fn total_proposals(&self) -> u64 {
        let ledger = self.ledger.read().await;
        ledger.total_proposals()
    }

    /// Snapshot of all proposals in id order.
    pub async fn proposals(&self) -> Vec<Proposal> {
        let ledger = self.ledger.read().await;
        ledger.proposals().to_vec()
    }

    /// Governance parameters this registry was opened with.
    pub async fn params(&self) -> GovernanceParams {
        let ledger = self.ledger.read().await;
        *ledger.params()
    }
}
