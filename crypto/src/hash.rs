//! Keccak-256 hashing for credential ids and vote digests.

use ballotbox_types::{CandidateId, CredentialId, MessageDigest};
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive the credential id for an external voter identifier.
///
/// Deterministic and one-way: the same voter always maps to the same
/// credential, and the voter id cannot be read back from it.
pub fn derive_credential_id(voter_id: &str) -> CredentialId {
    CredentialId::new(keccak256(voter_id.as_bytes()))
}

/// The digest a holder signs to vote for `candidate` with `credential`.
///
/// Packed encoding: the 32-byte credential id followed by the candidate's
/// UTF-8 bytes. The credential part is fixed-width, so no two distinct pairs
/// share an encoding.
pub fn message_digest(credential: &CredentialId, candidate: &CandidateId) -> MessageDigest {
    let packed = keccak256_multi(&[credential.as_bytes(), candidate.as_bytes()]);
    MessageDigest::new(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_empty_vector() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak256_multi_equivalent() {
        let single = keccak256(b"helloworld");
        let multi = keccak256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn credential_id_is_deterministic() {
        let first = derive_credential_id("voter-17");
        assert_eq!(first, derive_credential_id("voter-17"));
    }

    #[test]
    fn credential_id_differs_per_voter() {
        let first = derive_credential_id("voter-17");
        assert_ne!(first, derive_credential_id("voter-18"));
    }

    #[test]
    fn digest_binds_candidate() {
        let cred = derive_credential_id("voter");
        let a = message_digest(&cred, &CandidateId::from("alice"));
        let b = message_digest(&cred, &CandidateId::from("bob"));
        assert_ne!(a, b);
    }

    #[test]
    fn digest_binds_credential() {
        let candidate = CandidateId::from("alice");
        let a = message_digest(&derive_credential_id("v1"), &candidate);
        let b = message_digest(&derive_credential_id("v2"), &candidate);
        assert_ne!(a, b);
    }

    #[test]
    fn digest_matches_packed_encoding() {
        let cred = CredentialId::new([3u8; 32]);
        let digest = message_digest(&cred, &CandidateId::from("bob"));
        let mut packed = vec![3u8; 32];
        packed.extend_from_slice(b"bob");
        assert_eq!(digest.as_bytes(), &keccak256(&packed));
    }
}
