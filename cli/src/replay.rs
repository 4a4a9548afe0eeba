//! Apply a [`ReplayConfig`] to a fresh election on a deterministic clock.

use std::sync::Arc;

use ballotbox_election::{ElectionError, ElectionService};
use ballotbox_nullables::NullClock;
use ballotbox_types::{CandidateId, Identity};
use tracing::{debug, info};

use crate::config::{CliError, ReplayConfig};

/// Outcome of one vote entry.
#[derive(Debug)]
pub struct VoteOutcome {
    pub voter_id: String,
    pub candidate: CandidateId,
    pub result: Result<(), ElectionError>,
}

#[derive(Debug)]
pub struct ReplayReport {
    pub outcomes: Vec<VoteOutcome>,
    /// Final counts, sorted by candidate.
    pub tally: Vec<(CandidateId, u64)>,
    pub accepted: u64,
    pub rejected: u64,
    /// Candidates still eligible when voting ended.
    pub eligible: usize,
}

/// Run the configured election. Vote rejections are reported per entry;
/// only malformed input and failed setup steps abort the replay.
pub fn run_replay(config: &ReplayConfig) -> Result<ReplayReport, CliError> {
    let operator = parse_identity(&config.operator, "operator")?;
    let clock = Arc::new(NullClock::new(config.start_secs));
    let svc = ElectionService::new(operator, Arc::clone(&clock));

    for entry in &config.credentials {
        let holder = parse_identity(&entry.holder, "holder")?;
        let credential = ElectionService::<Arc<NullClock>>::derive_credential_id(&entry.voter_id);
        svc.issue_credential(&operator, holder, credential)?;
    }
    for candidate in &config.candidates {
        svc.register_candidate(&operator, CandidateId::from(candidate.as_str()))?;
    }
    for candidate in &config.removals {
        svc.remove_candidate(&operator, &CandidateId::from(candidate.as_str()))?;
    }
    let window = svc.configure_election(&operator, config.duration_hours)?;
    info!(start = %window.start(), end = %window.end(), "replay window");

    let mut outcomes = Vec::with_capacity(config.votes.len());
    for vote in &config.votes {
        let signature = decode_signature(&vote.signature)?;
        let credential = ElectionService::<Arc<NullClock>>::derive_credential_id(&vote.voter_id);
        let candidate = CandidateId::from(vote.candidate.as_str());

        clock.set(config.start_secs.saturating_add(vote.at_secs));
        let result = svc.cast_vote(&credential, &candidate, &signature);
        debug!(voter_id = %vote.voter_id, ok = result.is_ok(), "replayed vote");
        outcomes.push(VoteOutcome {
            voter_id: vote.voter_id.clone(),
            candidate,
            result,
        });
    }

    let mut tally: Vec<_> = svc.tally()?.into_iter().collect();
    tally.sort();
    svc.log_summary()?;

    Ok(ReplayReport {
        outcomes,
        tally,
        accepted: svc.stats().get("votes_accepted"),
        rejected: svc.stats().get("votes_rejected"),
        eligible: svc.snapshot(|e| e.candidate_count())?,
    })
}

fn parse_identity(text: &str, field: &'static str) -> Result<Identity, CliError> {
    text.parse().map_err(CliError::parse(field))
}

/// Signatures are passed to the engine unchecked so that a wrong length is
/// reported as a vote rejection, not a config error.
fn decode_signature(text: &str) -> Result<Vec<u8>, CliError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|_| CliError::Parse {
        field: "signature",
        source: ballotbox_types::ParseError::BadHex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CredentialEntry, VoteEntry};
    use ballotbox_crypto::{derive_credential_id, keypair_from_seed, message_digest, sign_vote};
    use ballotbox_types::KeyPair;

    fn entry(voter_id: &str, holder: &KeyPair) -> CredentialEntry {
        CredentialEntry {
            voter_id: voter_id.into(),
            holder: holder.identity.to_string(),
        }
    }

    fn vote(kp: &KeyPair, voter_id: &str, candidate: &str, at_secs: u64) -> VoteEntry {
        let digest = message_digest(&derive_credential_id(voter_id), &candidate.into());
        VoteEntry {
            voter_id: voter_id.into(),
            candidate: candidate.into(),
            signature: sign_vote(&digest, &kp.secret).unwrap().to_string(),
            at_secs,
        }
    }

    fn config(
        operator: Identity,
        credentials: Vec<CredentialEntry>,
        votes: Vec<VoteEntry>,
    ) -> ReplayConfig {
        ReplayConfig {
            operator: operator.to_string(),
            duration_hours: 1,
            start_secs: 1_000,
            candidates: vec!["alice".into(), "bob".into(), "carol".into()],
            removals: vec!["carol".into()],
            credentials,
            votes,
            log_format: "human".into(),
            log_level: "info".into(),
        }
    }

    #[test]
    fn replay_counts_and_reports_each_vote() {
        let operator = keypair_from_seed(&[0xF0; 32]).identity;
        let a = keypair_from_seed(&[1; 32]);
        let b = keypair_from_seed(&[2; 32]);
        let credentials = vec![entry("a", &a), entry("b", &b)];
        let votes = vec![
            vote(&a, "a", "alice", 10),
            vote(&a, "a", "bob", 20),
            vote(&b, "b", "carol", 30),
            vote(&b, "b", "bob", 7200),
            vote(&b, "b", "bob", 40),
        ];

        let report = run_replay(&config(operator, credentials, votes)).unwrap();

        let results: Vec<_> = report.outcomes.iter().map(|o| o.result.clone()).collect();
        assert_eq!(results[0], Ok(()));
        let credential_a = derive_credential_id("a");
        assert_eq!(results[1], Err(ElectionError::AlreadyVoted(credential_a)));
        assert_eq!(
            results[2],
            Err(ElectionError::InvalidCandidate("carol".into()))
        );
        assert_eq!(results[3], Err(ElectionError::ElectionClosed));
        assert_eq!(results[4], Ok(()));
        let (alice, bob) = (CandidateId::from("alice"), CandidateId::from("bob"));
        assert_eq!(report.tally, vec![(alice, 1), (bob, 1)]);
        assert_eq!((report.accepted, report.rejected), (2, 3));
        assert_eq!(report.eligible, 2);
    }

    #[test]
    fn short_signature_is_a_vote_rejection() {
        let operator = keypair_from_seed(&[0xF1; 32]).identity;
        let a = keypair_from_seed(&[3; 32]);
        let credentials = vec![entry("a", &a)];
        let mut short = vote(&a, "a", "alice", 1);
        short.signature = "0xdeadbeef".into();

        let report = run_replay(&config(operator, credentials, vec![short])).unwrap();
        let result = &report.outcomes[0].result;
        assert_eq!(*result, Err(ElectionError::InvalidSignatureLength(4)));
    }

    #[test]
    fn bad_operator_aborts() {
        let mut cfg = config(keypair_from_seed(&[0xF2; 32]).identity, vec![], vec![]);
        cfg.operator = "0x1234".into();
        let Err(CliError::Parse { field, .. }) = run_replay(&cfg) else {
            panic!("a malformed operator should abort the replay");
        };
        assert_eq!(field, "operator");
    }

    #[test]
    fn duplicate_credential_aborts() {
        let operator = keypair_from_seed(&[0xF3; 32]).identity;
        let a = keypair_from_seed(&[4; 32]);
        let cfg = config(operator, vec![entry("a", &a), entry("a", &a)], vec![]);
        assert!(matches!(
            run_replay(&cfg),
            Err(CliError::Election(ElectionError::AlreadyIssued(_)))
        ));
    }
}
