//! Key material and the fixed-width vote signature encoding.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ParseError;

/// Length of an encoded vote signature: `r (32) ‖ s (32) ‖ v (1)`.
pub const SIGNATURE_LEN: usize = 65;

/// A 32-byte secp256k1 secret scalar.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub [u8; 32]);

/// A secp256k1 key pair: the secret scalar and the identity it signs as.
///
/// Use `ballotbox_crypto::generate_keypair()` or `ballotbox_crypto::keypair_from_seed()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub identity: crate::Identity,
    pub secret: SecretKey,
}

/// A 65-byte recoverable ECDSA signature.
///
/// `r` and `s` are big-endian scalars, `v` is the recovery id. Construction
/// only checks the length; whether the components form a valid signature is
/// decided at recovery time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VoteSignature([u8; SIGNATURE_LEN]);

impl VoteSignature {
    pub fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode from a byte slice that must be exactly 65 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| ParseError::BadLength {
            expected: SIGNATURE_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn from_parts(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// The `r ‖ s` half, 64 bytes.
    pub fn rs(&self) -> &[u8] {
        &self.0[..64]
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Debug for VoteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoteSignature({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for VoteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for VoteSignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::decode_hex_fixed(s).map(Self)
    }
}

impl Serialize for VoteSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for VoteSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SigVisitor;

        impl<'de> serde::de::Visitor<'de> for SigVisitor {
            type Value = VoteSignature;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{} bytes", SIGNATURE_LEN)
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                VoteSignature::from_slice(v).map_err(|_| E::invalid_length(v.len(), &self))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; SIGNATURE_LEN];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(VoteSignature(arr))
            }
        }

        deserializer.deserialize_bytes(SigVisitor)
    }
}
