//! Registry change notifications.
//!
//! The registry emits an event for every successful state change. Observers
//! subscribe through the service layer and receive an [`EventStream`], a
//! `futures::Stream` backed by an unbounded channel, suitable for
//! `tokio::select!` event loops.

use crate::registry::types::{ProposalId, VoterId};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Notification of a registry state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A proposal was created.
    ProposalCreated {
        id: ProposalId,
        title: String,
        proposer: VoterId,
        end_date: u64,
    },
    /// A vote was recorded; tallies are the values after the vote.
    VoteCast {
        id: ProposalId,
        voter: VoterId,
        support: bool,
        votes_for: u32,
        votes_against: u32,
        total_voters: u32,
    },
}

/// Receiving side of a registry subscription.
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<RegistryEvent>,
}

impl EventStream {
    /// Create a stream and its sending handle.
    pub fn new() -> (Self, EventSender) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { receiver }, EventSender { sender })
    }

    /// Receive the next event, or `None` once the registry is dropped.
    pub async fn recv(&mut self) -> Option<RegistryEvent> {
        self.receiver.recv().await
    }
}

impl Stream for EventStream {
    type Item = RegistryEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Sending side of a registry subscription.
pub struct EventSender {
    sender: mpsc::UnboundedSender<RegistryEvent>,
}

impl EventSender {
    /// Deliver an event. Returns false when the subscriber went away.
    pub fn send(&self, event: RegistryEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}
