//! Nullable infrastructure for deterministic testing.
//!
//! External inputs (wall-clock time, key randomness) are swapped for
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the OS
//!
//! The CLI's replay mode also runs on these, so a replay file always produces
//! the same outcome.

pub mod clock;
pub mod random;

pub use clock::NullClock;
pub use random::NullSeeds;
