//! Credential ownership: the narrow capability the engine consumes.
//!
//! The engine only ever needs "who holds credential X right now", plus the
//! operator's issue and revoke entry points. Transfer, approval and
//! enumeration of an underlying token model are not part of it.

use ballotbox_types::{CredentialId, Identity};
use std::collections::HashMap;

use crate::error::ElectionError;

/// Holder bindings for voting credentials.
///
/// At most one live holder per credential at any time. A credential that was
/// never issued, or has been revoked, has no holder.
pub trait CredentialRegistry {
    /// The current holder of `credential`, if any. No side effects.
    fn holder_of(&self, credential: &CredentialId) -> Option<Identity>;

    /// Bind `credential` to `holder`. Fails with `AlreadyIssued` if it is bound.
    fn issue(&mut self, holder: Identity, credential: CredentialId) -> Result<(), ElectionError>;

    /// Unbind `credential`, returning the former holder. Fails with `NotIssued`
    /// if it has no holder.
    fn revoke(&mut self, credential: &CredentialId) -> Result<Identity, ElectionError>;
}

/// A credential registry backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentials {
    holders: HashMap<CredentialId, Identity>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently issued credentials.
    pub fn issued_count(&self) -> usize {
        self.holders.len()
    }
}

impl CredentialRegistry for InMemoryCredentials {
    fn holder_of(&self, credential: &CredentialId) -> Option<Identity> {
        self.holders.get(credential).copied()
    }

    fn issue(&mut self, holder: Identity, credential: CredentialId) -> Result<(), ElectionError> {
        if self.holders.contains_key(&credential) {
            return Err(ElectionError::AlreadyIssued(credential));
        }
        self.holders.insert(credential, holder);
        Ok(())
    }

    fn revoke(&mut self, credential: &CredentialId) -> Result<Identity, ElectionError> {
        self.holders
            .remove(credential)
            .ok_or(ElectionError::NotIssued(*credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred(b: u8) -> CredentialId {
        CredentialId::new([b; 32])
    }

    fn holder(b: u8) -> Identity {
        Identity::new([b; 20])
    }

    #[test]
    fn unissued_credential_has_no_holder() {
        let registry = InMemoryCredentials::new();
        assert_eq!(registry.holder_of(&cred(1)), None);
    }

    #[test]
    fn issue_binds_holder() {
        let mut registry = InMemoryCredentials::new();
        registry.issue(holder(7), cred(1)).unwrap();
        assert_eq!(registry.holder_of(&cred(1)), Some(holder(7)));
        assert_eq!(registry.issued_count(), 1);
    }

    #[test]
    fn double_issue_is_rejected_and_keeps_first_holder() {
        let mut registry = InMemoryCredentials::new();
        registry.issue(holder(7), cred(1)).unwrap();
        let err = registry.issue(holder(8), cred(1)).unwrap_err();
        assert_eq!(err, ElectionError::AlreadyIssued(cred(1)));
        assert_eq!(registry.holder_of(&cred(1)), Some(holder(7)));
    }

    #[test]
    fn revoke_unbinds_and_returns_holder() {
        let mut registry = InMemoryCredentials::new();
        registry.issue(holder(7), cred(1)).unwrap();
        assert_eq!(registry.revoke(&cred(1)).unwrap(), holder(7));
        assert_eq!(registry.holder_of(&cred(1)), None);
    }

    #[test]
    fn revoke_unissued_fails() {
        let mut registry = InMemoryCredentials::new();
        assert_eq!(
            registry.revoke(&cred(1)).unwrap_err(),
            ElectionError::NotIssued(cred(1))
        );
    }

    #[test]
    fn revoked_credential_can_be_reissued() {
        let mut registry = InMemoryCredentials::new();
        registry.issue(holder(7), cred(1)).unwrap();
        registry.revoke(&cred(1)).unwrap();
        registry.issue(holder(9), cred(1)).unwrap();
        assert_eq!(registry.holder_of(&cred(1)), Some(holder(9)));
    }
}
