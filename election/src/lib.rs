//! Vote authorization and tallying for credential-gated elections.
//!
//! Holders of a non-transferable credential cast exactly one vote for a
//! registered candidate while the election window is open. A vote is
//! authorized by a signature over `(credential, candidate)`: the signer is
//! recovered from the signature and must be the credential's current holder.
//!
//! Layers:
//! - [`CredentialRegistry`]: who holds which credential (capability trait,
//!   in-memory implementation provided)
//! - [`CandidateRegistry`]: the set of eligible candidates
//! - [`ElectionWindow`]: when votes are accepted
//! - [`Election`]: the engine that owns vote records and the tally
//! - [`ElectionService`]: serializes mutations behind a lock, reads time from
//!   a [`Clock`](ballotbox_types::Clock), and gates operator-only calls

pub mod candidates;
pub mod clock;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod events;
pub mod service;

pub use candidates::CandidateRegistry;
pub use clock::{ElectionWindow, SECS_PER_HOUR};
pub use credentials::{CredentialRegistry, InMemoryCredentials};
pub use engine::{CredentialState, Election};
pub use error::ElectionError;
pub use events::{ElectionEvent, EventBus};
pub use service::ElectionService;
