//! Fixed identity for single-user front ends and tests.

use crate::task::{domain::OwnerId, ports::IdentityProvider};

/// Identity provider that always reports the same owner (or nobody).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    owner: Option<OwnerId>,
}

impl StaticIdentity {
    /// Creates a provider reporting `owner` as signed in.
    #[must_use]
    pub const fn signed_in(owner: OwnerId) -> Self {
        Self { owner: Some(owner) }
    }

    /// Creates a provider reporting that nobody is signed in.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { owner: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_owner(&self) -> Option<OwnerId> {
        self.owner.clone()
    }
}
