//! Nullable randomness: deterministic key seeds.

use std::sync::Mutex;

/// A deterministic source of 32-byte seeds for test key pairs.
///
/// Seed `i` is the little-endian counter `i + 1` spread over the first 8
/// bytes with the label byte in the last position, so two sources with
/// different labels never hand out the same seed.
pub struct NullSeeds {
    label: u8,
    next: Mutex<u64>,
}

impl NullSeeds {
    pub fn new(label: u8) -> Self {
        Self {
            label,
            next: Mutex::new(0),
        }
    }

    /// The next seed in the sequence.
    pub fn next_seed(&self) -> [u8; 32] {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *next += 1;
        let mut seed = [0u8; 32];
        seed[..8].copy_from_slice(&next.to_le_bytes());
        seed[31] = self.label;
        seed
    }
}
