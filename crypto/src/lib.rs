//! Cryptographic primitives for the ballotbox protocol.
//!
//! - **Keccak-256** for credential derivation and vote digests
//! - **secp256k1 recoverable ECDSA** for vote signatures; the signer is
//!   recovered from the signature rather than looked up
//! - Identity derivation as a 20-byte account address of the public key
//!
//! Vote digests are signed under the personal-message convention: the digest
//! is prefixed with `"\x19Ethereum Signed Message:\n32"` before hashing, so a
//! vote signature can never be replayed as a signature over raw data.

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{derive_identity, identity_from_secret};
pub use error::CryptoError;
pub use hash::{derive_credential_id, keccak256, keccak256_multi, message_digest};
pub use keys::{generate_keypair, keypair_from_secret, keypair_from_seed};
pub use sign::{
    personal_message_hash, recover_signer, recover_signer_from_slice, sign_vote,
    PERSONAL_MESSAGE_PREFIX,
};
