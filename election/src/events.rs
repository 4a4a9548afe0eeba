//! Election events for audit subscribers.

use ballotbox_types::{CandidateId, CredentialId, Identity, Timestamp};

/// Notifications emitted by the election engine. The engine never reads them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElectionEvent {
    /// A candidate became eligible.
    CandidateRegistered { candidate: CandidateId },
    /// A reset was requested for a candidate. Emitted even when the candidate
    /// was not registered.
    CandidateReset { candidate: CandidateId },
    /// The election window was (re)configured.
    ElectionConfigured { start: Timestamp, end: Timestamp },
    /// A credential was bound to a holder.
    CredentialIssued {
        credential: CredentialId,
        holder: Identity,
    },
    /// A credential binding was removed.
    CredentialRevoked {
        credential: CredentialId,
        holder: Identity,
    },
    /// A vote was accepted and tallied.
    VoteCast {
        credential: CredentialId,
        candidate: CandidateId,
    },
}

/// Synchronous fan-out event bus for election events.
///
/// Listeners are invoked inline while the election is being mutated; keep
/// handlers fast and never call back into the election from one.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&ElectionEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ElectionEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &ElectionEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
