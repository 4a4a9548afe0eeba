//! secp256k1 key generation.

use ballotbox_types::{KeyPair, SecretKey};

use crate::address::identity_from_secret;
use crate::error::CryptoError;
use crate::hash::keccak256;

/// Generate a new key pair from OS randomness.
pub fn generate_keypair() -> Result<KeyPair, CryptoError> {
    let mut secret = SecretKey([0u8; 32]);
    loop {
        getrandom::getrandom(&mut secret.0).map_err(|e| CryptoError::Entropy(e.to_string()))?;
        // ~2^-128 chance of landing outside [1, n); draw again
        if let Ok(identity) = identity_from_secret(&secret) {
            return Ok(KeyPair { identity, secret });
        }
    }
}

/// Derive a key pair from a 32-byte seed (deterministic).
///
/// A seed that is not a valid scalar (zero, or not below the group order) is
/// re-hashed with Keccak-256 until it is.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let mut secret = SecretKey(*seed);
    loop {
        if let Ok(identity) = identity_from_secret(&secret) {
            return KeyPair { identity, secret };
        }
        secret.0 = keccak256(&secret.0);
    }
}

/// Reconstruct a full key pair from a secret key.
pub fn keypair_from_secret(secret: SecretKey) -> Result<KeyPair, CryptoError> {
    let identity = identity_from_secret(&secret)?;
    Ok(KeyPair { identity, secret })
}
