//! Identity provider port.

use crate::task::domain::OwnerId;

/// Supplies the currently authenticated user, if any.
pub trait IdentityProvider {
    /// Returns the current owner, or `None` when nobody is signed in.
    fn current_owner(&self) -> Option<OwnerId>;
}
