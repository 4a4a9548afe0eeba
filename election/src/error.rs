use ballotbox_types::{CandidateId, CredentialId, Identity};
use thiserror::Error;

/// Every way an election operation can be rejected.
///
/// A rejection never leaves partial effects behind, and the election stays
/// usable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("election is not open")]
    ElectionClosed,

    #[error("credential {0} has already voted")]
    AlreadyVoted(CredentialId),

    #[error("candidate {0} is not registered")]
    InvalidCandidate(CandidateId),

    #[error("signature must be 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("signature does not recover a signer")]
    InvalidSignature,

    #[error("signer {signer} does not hold credential {credential}")]
    UnauthorizedVoter {
        credential: CredentialId,
        signer: Identity,
    },

    #[error("candidate {0} is already registered")]
    AlreadyRegistered(CandidateId),

    #[error("credential {0} is already issued")]
    AlreadyIssued(CredentialId),

    #[error("credential {0} is not issued")]
    NotIssued(CredentialId),

    #[error("election duration of {0}h is zero or overflows the clock")]
    InvalidDuration(u64),

    #[error("caller {0} is not the election operator")]
    NotOperator(Identity),

    #[error("election state lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_errors_show_the_bare_id() {
        let id = CandidateId::from("alice");
        assert_eq!(
            ElectionError::InvalidCandidate(id.clone()).to_string(),
            "candidate alice is not registered"
        );
        assert_eq!(
            ElectionError::AlreadyRegistered(id).to_string(),
            "candidate alice is already registered"
        );
    }
}
