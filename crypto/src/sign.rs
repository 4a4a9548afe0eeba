//! Vote signing and signer recovery.
//!
//! Signatures are 65 bytes, `r ‖ s ‖ v`, over the personal-message hash of a
//! [`MessageDigest`]. `v` may be given as 27/28 or 0/1. Recovery refuses
//! high-`s` signatures so each vote has exactly one valid encoding.

use ballotbox_types::{Identity, MessageDigest, SecretKey, VoteSignature};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::address::derive_identity;
use crate::error::CryptoError;
use crate::hash::keccak256_multi;

/// Prefix prepended (followed by the decimal message length) before hashing.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Offset added to the recovery id in the legacy `v` encoding.
const LEGACY_V_OFFSET: u8 = 27;

/// Hash `message` under the personal-message convention:
/// `keccak256(prefix ‖ decimal(len) ‖ message)`.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let len = message.len().to_string();
    keccak256_multi(&[PERSONAL_MESSAGE_PREFIX, len.as_bytes(), message])
}

/// Sign a vote digest, producing a 65-byte signature with `v` in 27/28 form.
///
/// Nonces are deterministic (RFC 6979), so signing is repeatable.
pub fn sign_vote(digest: &MessageDigest, secret: &SecretKey) -> Result<VoteSignature, CryptoError> {
    let signing_key =
        SigningKey::from_slice(&secret.0).map_err(|_| CryptoError::InvalidSecretKey)?;
    let prehash = personal_message_hash(digest.as_bytes());
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(&prehash)
        .map_err(|_| CryptoError::SigningFailed)?;

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    let rs = signature.to_bytes();
    r.copy_from_slice(&rs[..32]);
    s.copy_from_slice(&rs[32..]);
    let v = LEGACY_V_OFFSET + recovery_id.to_byte();
    Ok(VoteSignature::from_parts(r, s, v))
}

/// Recover the identity that signed `digest`.
///
/// Returns `None` when the signature is malformed: unknown `v`, `r` or `s`
/// zero or out of range, high `s`, or no point recoverable.
pub fn recover_signer(digest: &MessageDigest, signature: &VoteSignature) -> Option<Identity> {
    let recovery_byte = match signature.v() {
        v @ (27 | 28) => v - LEGACY_V_OFFSET,
        v @ (0 | 1) => v,
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(recovery_byte)?;
    let parsed = Signature::from_slice(signature.rs()).ok()?;
    if parsed.normalize_s().is_some() {
        return None;
    }

    let prehash = personal_message_hash(digest.as_bytes());
    let key = VerifyingKey::recover_from_prehash(&prehash, &parsed, recovery_id).ok()?;
    Some(derive_identity(&key))
}

/// [`recover_signer`] over raw bytes; anything but 65 bytes yields `None`.
pub fn recover_signer_from_slice(digest: &MessageDigest, signature: &[u8]) -> Option<Identity> {
    let signature = VoteSignature::from_slice(signature).ok()?;
    recover_signer(digest, &signature)
}
