#![no_main]

use libfuzzer_sys::fuzz_target;

use ballotbox_crypto::{derive_credential_id, keypair_from_seed};
use ballotbox_election::{Election, ElectionError};
use ballotbox_types::{CandidateId, CredentialId, Identity, Timestamp};

// Arbitrary vote submissions against a small open election. Whatever the
// input, at most one vote per credential may land.
fuzz_target!(|data: &[u8]| {
    let holder = keypair_from_seed(&[7u8; 32]);
    let credential = derive_credential_id("fuzz-voter");

    let mut election = Election::new();
    if setup(&mut election, holder.identity, credential).is_err() {
        return;
    }

    for chunk in data.chunks(67) {
        let pick = chunk.first().copied().unwrap_or(0);
        let candidate = CandidateId::from(if pick & 1 == 0 { "a" } else { "b" });
        let at = Timestamp::new(1_000 + u64::from(chunk.get(1).copied().unwrap_or(1)));
        let signature = chunk.get(2..).unwrap_or(&[]);
        let _ = election.cast_vote(&credential, &candidate, signature, at);
    }

    assert!(election.total_votes() <= 1);
});

fn setup(
    election: &mut Election,
    holder: Identity,
    credential: CredentialId,
) -> Result<(), ElectionError> {
    election.issue_credential(holder, credential)?;
    election.register_candidate("a".into())?;
    election.register_candidate("b".into())?;
    election.configure(1, Timestamp::new(1_000))?;
    Ok(())
}
