//! The set of eligible candidates.

use ballotbox_types::CandidateId;

use crate::error::ElectionError;

/// Duplicate-free, order-insensitive set of eligible candidates.
///
/// Stored as a plain `Vec` with linear membership scans: elections have tens
/// of candidates, not millions. Enumeration order is not stable across
/// removals.
#[derive(Debug, Default, Clone)]
pub struct CandidateRegistry {
    candidates: Vec<CandidateId>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Fails with `AlreadyRegistered` on an exact-match duplicate.
    pub fn register(&mut self, candidate: CandidateId) -> Result<(), ElectionError> {
        if self.is_registered(&candidate) {
            return Err(ElectionError::AlreadyRegistered(candidate));
        }
        self.candidates.push(candidate);
        Ok(())
    }

    /// Remove a candidate by swapping it with the last entry. Returns whether
    /// it was present; removing an absent candidate changes nothing.
    pub fn remove(&mut self, candidate: &CandidateId) -> bool {
        match self.candidates.iter().position(|c| c == candidate) {
            Some(index) => {
                self.candidates.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, candidate: &CandidateId) -> bool {
        self.candidates.iter().any(|c| c == candidate)
    }

    pub fn as_slice(&self) -> &[CandidateId] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
