use ballotbox_crypto::{derive_credential_id, keypair_from_seed, message_digest, sign_vote};
use ballotbox_election::{Election, ElectionError};
use ballotbox_types::{CandidateId, Timestamp};
use proptest::prelude::*;

const CANDIDATES: [&str; 3] = ["alice", "bob", "carol"];

/// A vote attempt: which voter, which candidate, and whether to corrupt the
/// signature.
#[derive(Clone, Debug)]
struct Attempt {
    voter: usize,
    candidate: usize,
    corrupt: bool,
}

fn attempt() -> impl Strategy<Value = Attempt> {
    let fields = (0..5usize, 0..CANDIDATES.len(), any::<bool>());
    fields.prop_map(|(voter, candidate, corrupt)| Attempt {
        voter,
        candidate,
        corrupt,
    })
}

proptest! {
    #[test]
    fn each_credential_votes_at_most_once_and_tally_matches(
        attempts in prop::collection::vec(attempt(), 1..40)
    ) {
        let voters: Vec<_> = (0..5u8).map(|i| keypair_from_seed(&[i + 1; 32])).collect();
        let creds: Vec<_> = (0..5).map(|i| derive_credential_id(&format!("voter-{i}"))).collect();

        let mut election = Election::new();
        for (kp, cred) in voters.iter().zip(&creds) {
            election.issue_credential(kp.identity, *cred).unwrap();
        }
        for c in CANDIDATES {
            election.register_candidate(c.into()).unwrap();
        }
        election.configure(1, Timestamp::new(1_000)).unwrap();
        let now = Timestamp::new(1_001);

        let mut accepted = [0u64; 3];
        let mut voted = [false; 5];
        for a in &attempts {
            let cred = creds[a.voter];
            let candidate = CandidateId::from(CANDIDATES[a.candidate]);
            let mut sig = sign_vote(&message_digest(&cred, &candidate), &voters[a.voter].secret)
                .unwrap()
                .as_bytes()
                .to_vec();
            if a.corrupt {
                sig[10] ^= 0x01;
            }

            match election.cast_vote(&cred, &candidate, &sig, now) {
                Ok(()) => {
                    prop_assert!(!voted[a.voter]);
                    prop_assert!(!a.corrupt);
                    voted[a.voter] = true;
                    accepted[a.candidate] += 1;
                }
                Err(ElectionError::AlreadyVoted(c)) => {
                    prop_assert!(voted[a.voter]);
                    prop_assert_eq!(c, cred);
                }
                Err(_) => prop_assert!(a.corrupt),
            }
        }

        for (i, c) in CANDIDATES.iter().enumerate() {
            prop_assert_eq!(election.votes_for(&(*c).into()), accepted[i]);
        }
        prop_assert_eq!(election.total_votes(), accepted.iter().sum::<u64>());
    }

    #[test]
    fn closed_window_rejects_everything(offset in 0u64..10_000, hours in 1u64..4) {
        let kp = keypair_from_seed(&[42; 32]);
        let cred = derive_credential_id("v");
        let mut election = Election::new();
        election.issue_credential(kp.identity, cred).unwrap();
        election.register_candidate("alice".into()).unwrap();
        election.configure(hours, Timestamp::new(50_000)).unwrap();

        let end = 50_000 + hours * 3600;
        let sig = sign_vote(&message_digest(&cred, &"alice".into()), &kp.secret).unwrap();
        for at in [50_000 - offset.min(50_000), end + offset] {
            prop_assert_eq!(
                election.cast_vote(&cred, &"alice".into(), sig.as_bytes(), Timestamp::new(at)),
                Err(ElectionError::ElectionClosed)
            );
        }
        prop_assert!(!election.has_voted(&cred));
    }
}
