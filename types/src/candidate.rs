//! Candidate identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A candidate identifier.
///
/// Equality is an exact byte-sequence match: no case folding, no Unicode
/// normalization, no trimming.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for CandidateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
