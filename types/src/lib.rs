//! Fundamental types for the ballotbox voting protocol.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! credential ids, signer identities, candidate ids, message digests, vote signatures,
//! and timestamps.

pub mod candidate;
pub mod credential;
pub mod error;
pub mod hash;
pub mod identity;
pub mod keys;
pub mod time;

pub use candidate::CandidateId;
pub use credential::CredentialId;
pub use error::ParseError;
pub use hash::MessageDigest;
pub use identity::Identity;
pub use keys::{KeyPair, SecretKey, VoteSignature, SIGNATURE_LEN};
pub use time::{Clock, SystemClock, Timestamp};

/// Decode an optionally `0x`-prefixed hex string into a fixed-size array.
pub(crate) fn decode_hex_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|_| ParseError::BadHex)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| ParseError::BadLength {
        expected: N,
        actual: len,
    })
}
