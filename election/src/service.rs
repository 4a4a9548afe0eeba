//! Thread-safe election front end.
//!
//! [`ElectionService`] wraps an [`Election`] in a lock so that mutations are
//! serialized in admission order while reads run concurrently. Time comes
//! from an injected [`Clock`] and is sampled after the lock is taken, so the
//! timestamps seen by successive votes never go backwards relative to their
//! admission. Operator-only calls are gated on the caller's identity.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ballotbox_crypto::{derive_credential_id, message_digest};
use ballotbox_types::{
    CandidateId, Clock, CredentialId, Identity, MessageDigest, SystemClock, Timestamp,
};
use ballotbox_utils::StatsCounter;
use tracing::{info, warn};

use crate::clock::ElectionWindow;
use crate::credentials::{CredentialRegistry, InMemoryCredentials};
use crate::engine::{CredentialState, Election};
use crate::error::ElectionError;
use crate::events::ElectionEvent;

pub const STAT_VOTES_ACCEPTED: &str = "votes_accepted";
pub const STAT_VOTES_REJECTED: &str = "votes_rejected";

/// An election shared between threads, administered by a single operator.
pub struct ElectionService<K = SystemClock, C = InMemoryCredentials> {
    operator: Identity,
    clock: K,
    election: RwLock<Election<C>>,
    stats: StatsCounter,
}

impl<K: Clock> ElectionService<K, InMemoryCredentials> {
    pub fn new(operator: Identity, clock: K) -> Self {
        Self::with_election(operator, clock, Election::new())
    }
}

impl<K: Clock, C: CredentialRegistry> ElectionService<K, C> {
    pub fn with_election(operator: Identity, clock: K, election: Election<C>) -> Self {
        Self {
            operator,
            clock,
            election: RwLock::new(election),
            stats: StatsCounter::new(&[STAT_VOTES_ACCEPTED, STAT_VOTES_REJECTED]),
        }
    }

    /// Credential id for an external voter id.
    pub fn derive_credential_id(voter_id: &str) -> CredentialId {
        derive_credential_id(voter_id)
    }

    /// The digest a holder signs to vote `credential` for `candidate`.
    pub fn compute_message_digest(
        credential: &CredentialId,
        candidate: &CandidateId,
    ) -> MessageDigest {
        message_digest(credential, candidate)
    }

    pub fn operator(&self) -> Identity {
        self.operator
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    fn ensure_operator(&self, caller: &Identity) -> Result<(), ElectionError> {
        if *caller != self.operator {
            warn!(%caller, "operator call from non-operator");
            return Err(ElectionError::NotOperator(*caller));
        }
        Ok(())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Election<C>>, ElectionError> {
        self.election.read().map_err(|_| ElectionError::Poisoned)
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Election<C>>, ElectionError> {
        self.election.write().map_err(|_| ElectionError::Poisoned)
    }

    // ── Operator calls ──────────────────────────────────────────────────

    /// Open the window for `duration_hours` from now.
    pub fn configure_election(
        &self,
        caller: &Identity,
        duration_hours: u64,
    ) -> Result<ElectionWindow, ElectionError> {
        self.ensure_operator(caller)?;
        let mut election = self.write_guard()?;
        let now = self.clock.now();
        election.configure(duration_hours, now)
    }

    pub fn issue_credential(
        &self,
        caller: &Identity,
        holder: Identity,
        credential: CredentialId,
    ) -> Result<(), ElectionError> {
        self.ensure_operator(caller)?;
        self.write_guard()?.issue_credential(holder, credential)
    }

    pub fn revoke_credential(
        &self,
        caller: &Identity,
        credential: &CredentialId,
    ) -> Result<Identity, ElectionError> {
        self.ensure_operator(caller)?;
        self.write_guard()?.revoke_credential(credential)
    }

    pub fn register_candidate(
        &self,
        caller: &Identity,
        candidate: CandidateId,
    ) -> Result<(), ElectionError> {
        self.ensure_operator(caller)?;
        self.write_guard()?.register_candidate(candidate)
    }

    /// Returns whether the candidate was registered before the call.
    pub fn remove_candidate(
        &self,
        caller: &Identity,
        candidate: &CandidateId,
    ) -> Result<bool, ElectionError> {
        self.ensure_operator(caller)?;
        Ok(self.write_guard()?.remove_candidate(candidate))
    }

    // ── Voting ──────────────────────────────────────────────────────────

    /// Cast a vote. Anyone may submit; the signature decides.
    pub fn cast_vote(
        &self,
        credential: &CredentialId,
        candidate: &CandidateId,
        signature: &[u8],
    ) -> Result<(), ElectionError> {
        let mut election = self.write_guard()?;
        let now = self.clock.now();
        match election.cast_vote(credential, candidate, signature, now) {
            Ok(()) => {
                self.stats.increment(STAT_VOTES_ACCEPTED);
                Ok(())
            }
            Err(e) => {
                self.stats.increment(STAT_VOTES_REJECTED);
                Err(e)
            }
        }
    }

    pub fn subscribe(
        &self,
        listener: Box<dyn Fn(&ElectionEvent) + Send + Sync>,
    ) -> Result<(), ElectionError> {
        self.write_guard()?.subscribe(listener);
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Run `f` against a consistent view of the election.
    pub fn snapshot<R>(&self, f: impl FnOnce(&Election<C>) -> R) -> Result<R, ElectionError> {
        Ok(f(&*self.read_guard()?))
    }

    pub fn start_time(&self) -> Result<Timestamp, ElectionError> {
        self.snapshot(|e| e.start_time())
    }

    pub fn end_time(&self) -> Result<Timestamp, ElectionError> {
        self.snapshot(|e| e.end_time())
    }

    pub fn is_open(&self) -> Result<bool, ElectionError> {
        let now = self.clock.now();
        self.snapshot(|e| e.is_open(now))
    }

    pub fn candidates(&self) -> Result<Vec<CandidateId>, ElectionError> {
        self.snapshot(|e| e.candidates().to_vec())
    }

    pub fn has_voted(&self, credential: &CredentialId) -> Result<bool, ElectionError> {
        self.snapshot(|e| e.has_voted(credential))
    }

    pub fn votes_for(&self, candidate: &CandidateId) -> Result<u64, ElectionError> {
        self.snapshot(|e| e.votes_for(candidate))
    }

    pub fn tally(&self) -> Result<HashMap<CandidateId, u64>, ElectionError> {
        self.snapshot(|e| e.tally().clone())
    }

    pub fn holder_of(&self, credential: &CredentialId) -> Result<Option<Identity>, ElectionError> {
        self.snapshot(|e| e.holder_of(credential))
    }

    pub fn state_of(&self, credential: &CredentialId) -> Result<CredentialState, ElectionError> {
        self.snapshot(|e| e.state_of(credential))
    }

    /// Log the current tally at info level.
    pub fn log_summary(&self) -> Result<(), ElectionError> {
        self.snapshot(|e| {
            let mut rows: Vec<_> = e.tally().iter().collect();
            rows.sort();
            for (candidate, votes) in rows {
                info!(%candidate, votes, "tally");
            }
            info!(
                total = e.total_votes(),
                accepted = self.stats.get(STAT_VOTES_ACCEPTED),
                rejected = self.stats.get(STAT_VOTES_REJECTED),
                "election summary"
            );
        })
    }
}
