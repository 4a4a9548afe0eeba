//! The vote authorization and tally engine.
//!
//! Per credential the engine walks `Unissued → Issued → Voted`. Only an issued,
//! unvoted credential can vote; `Voted` is terminal. Every gate of
//! [`Election::cast_vote`] runs before any state is touched, so a rejected
//! vote leaves no trace.

use ballotbox_crypto::{message_digest, recover_signer};
use ballotbox_types::{CandidateId, CredentialId, Identity, Timestamp, VoteSignature};
use ballotbox_utils::format_duration;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::candidates::CandidateRegistry;
use crate::clock::ElectionWindow;
use crate::credentials::{CredentialRegistry, InMemoryCredentials};
use crate::error::ElectionError;
use crate::events::{ElectionEvent, EventBus};

/// Where a credential sits in the voting state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialState {
    /// No holder and no vote on record.
    Unissued,
    /// Bound to a holder, has not voted.
    Issued,
    /// Has voted. Stays here even if the credential is later revoked.
    Voted,
}

/// One election: credentials, candidates, window, vote records and tally.
pub struct Election<C = InMemoryCredentials> {
    credentials: C,
    candidates: CandidateRegistry,
    window: ElectionWindow,
    /// Credentials that have voted. Entries are never removed.
    voted: HashSet<CredentialId>,
    /// Per-candidate counts. Survives removal of the candidate.
    tally: HashMap<CandidateId, u64>,
    events: EventBus,
}

impl Election<InMemoryCredentials> {
    pub fn new() -> Self {
        Self::with_credentials(InMemoryCredentials::new())
    }
}

impl Default for Election<InMemoryCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CredentialRegistry> Election<C> {
    /// Create an election on top of an existing credential registry.
    pub fn with_credentials(credentials: C) -> Self {
        Self {
            credentials,
            candidates: CandidateRegistry::new(),
            window: ElectionWindow::default(),
            voted: HashSet::new(),
            tally: HashMap::new(),
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&ElectionEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Operator mutations ──────────────────────────────────────────────

    /// Open a window of `duration_hours` starting at `now`, replacing any
    /// previous window.
    pub fn configure(
        &mut self,
        duration_hours: u64,
        now: Timestamp,
    ) -> Result<ElectionWindow, ElectionError> {
        self.window.configure(duration_hours, now)?;
        let (start, end) = (self.window.start(), self.window.end());
        let length = format_duration(end.as_secs().saturating_sub(start.as_secs()));
        info!(%start, %end, %length, "election configured");
        let event = ElectionEvent::ElectionConfigured { start, end };
        self.events.emit(&event);
        Ok(self.window)
    }

    pub fn issue_credential(
        &mut self,
        holder: Identity,
        credential: CredentialId,
    ) -> Result<(), ElectionError> {
        self.credentials.issue(holder, credential)?;
        info!(%credential, %holder, "credential issued");
        let event = ElectionEvent::CredentialIssued { credential, holder };
        self.events.emit(&event);
        Ok(())
    }

    /// Revoke a credential, returning its former holder. A vote already cast
    /// with it stays counted.
    pub fn revoke_credential(
        &mut self,
        credential: &CredentialId,
    ) -> Result<Identity, ElectionError> {
        let holder = self.credentials.revoke(credential)?;
        info!(%credential, %holder, "credential revoked");
        self.events.emit(&ElectionEvent::CredentialRevoked {
            credential: *credential,
            holder,
        });
        Ok(holder)
    }

    pub fn register_candidate(&mut self, candidate: CandidateId) -> Result<(), ElectionError> {
        self.candidates.register(candidate.clone())?;
        info!(%candidate, "candidate registered");
        let event = ElectionEvent::CandidateRegistered { candidate };
        self.events.emit(&event);
        Ok(())
    }

    /// Make a candidate ineligible. Its tally is kept.
    ///
    /// Resetting an unregistered candidate is a silent no-op that still emits
    /// `CandidateReset`. Returns whether the candidate was registered.
    pub fn remove_candidate(&mut self, candidate: &CandidateId) -> bool {
        let removed = self.candidates.remove(candidate);
        if removed {
            info!(%candidate, "candidate removed");
        } else {
            debug!(%candidate, "reset of unregistered candidate");
        }
        self.events.emit(&ElectionEvent::CandidateReset {
            candidate: candidate.clone(),
        });
        removed
    }

    // ── Voting ──────────────────────────────────────────────────────────

    /// Run every vote gate without changing state, returning the signer.
    ///
    /// Gates, in order: window open, credential unused, candidate eligible,
    /// signature 65 bytes, signer recoverable, signer is the current holder.
    pub fn authorize_vote(
        &self,
        credential: &CredentialId,
        candidate: &CandidateId,
        raw_signature: &[u8],
        now: Timestamp,
    ) -> Result<Identity, ElectionError> {
        if !self.window.is_open(now) {
            return Err(ElectionError::ElectionClosed);
        }
        if self.voted.contains(credential) {
            return Err(ElectionError::AlreadyVoted(*credential));
        }
        if !self.candidates.is_registered(candidate) {
            return Err(ElectionError::InvalidCandidate(candidate.clone()));
        }

        let Ok(signature) = VoteSignature::from_slice(raw_signature) else {
            return Err(ElectionError::InvalidSignatureLength(raw_signature.len()));
        };
        let digest = message_digest(credential, candidate);
        let Some(signer) = recover_signer(&digest, &signature) else {
            return Err(ElectionError::InvalidSignature);
        };

        // an unissued or revoked credential has no holder, so nothing matches
        if self.credentials.holder_of(credential) != Some(signer) {
            return Err(ElectionError::UnauthorizedVoter {
                credential: *credential,
                signer,
            });
        }
        Ok(signer)
    }

    /// Cast the vote of `credential` for `candidate`.
    ///
    /// On success the credential is marked as voted and the candidate's tally
    /// grows by one, together. On failure nothing changes.
    pub fn cast_vote(
        &mut self,
        credential: &CredentialId,
        candidate: &CandidateId,
        raw_signature: &[u8],
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        let signer = match self.authorize_vote(credential, candidate, raw_signature, now) {
            Ok(signer) => signer,
            Err(e) => {
                debug!(%credential, %candidate, error = %e, "vote rejected");
                return Err(e);
            }
        };

        self.voted.insert(*credential);
        *self.tally.entry(candidate.clone()).or_insert(0) += 1;

        info!(%credential, %candidate, %signer, "vote cast");
        self.events.emit(&ElectionEvent::VoteCast {
            credential: *credential,
            candidate: candidate.clone(),
        });
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn window(&self) -> ElectionWindow {
        self.window
    }

    pub fn start_time(&self) -> Timestamp {
        self.window.start()
    }

    pub fn end_time(&self) -> Timestamp {
        self.window.end()
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        self.window.is_open(now)
    }

    /// Eligible candidates, in no guaranteed order.
    pub fn candidates(&self) -> &[CandidateId] {
        self.candidates.as_slice()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_registered(&self, candidate: &CandidateId) -> bool {
        self.candidates.is_registered(candidate)
    }

    pub fn has_voted(&self, credential: &CredentialId) -> bool {
        self.voted.contains(credential)
    }

    /// Votes counted for `candidate`, including while it is not registered.
    pub fn votes_for(&self, candidate: &CandidateId) -> u64 {
        self.tally.get(candidate).copied().unwrap_or(0)
    }

    /// Every candidate that has received at least one vote.
    pub fn tally(&self) -> &HashMap<CandidateId, u64> {
        &self.tally
    }

    pub fn total_votes(&self) -> u64 {
        self.voted.len() as u64
    }

    pub fn holder_of(&self, credential: &CredentialId) -> Option<Identity> {
        self.credentials.holder_of(credential)
    }

    pub fn state_of(&self, credential: &CredentialId) -> CredentialState {
        if self.voted.contains(credential) {
            CredentialState::Voted
        } else if self.credentials.holder_of(credential).is_some() {
            CredentialState::Issued
        } else {
            CredentialState::Unissued
        }
    }
}
