//! Identity derivation from secp256k1 public keys.
//!
//! Identity format: the last 20 bytes of Keccak-256 over the 64-byte
//! uncompressed public key (x ‖ y, without the SEC1 `0x04` tag). This is the
//! account-address convention, so identities match what common wallets show.

use ballotbox_types::{Identity, SecretKey};
use k256::ecdsa::{SigningKey, VerifyingKey};

use crate::error::CryptoError;
use crate::hash::keccak256;

/// Derive the identity of a public key.
pub fn derive_identity(key: &VerifyingKey) -> Identity {
    let point = key.to_encoded_point(false);
    // skip the 0x04 uncompressed tag
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; Identity::LEN];
    bytes.copy_from_slice(&hash[32 - Identity::LEN..]);
    Identity::new(bytes)
}

/// Derive the identity a secret key signs as.
pub fn identity_from_secret(secret: &SecretKey) -> Result<Identity, CryptoError> {
    let signing_key =
        SigningKey::from_slice(&secret.0).map_err(|_| CryptoError::InvalidSecretKey)?;
    Ok(derive_identity(signing_key.verifying_key()))
}
