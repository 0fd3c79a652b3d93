//! Session provider: who is creating records

use recform_core::OwnerId;

/// Source of the authenticated principal.
///
/// Only consulted when creating a record. There is no anonymous create path,
/// so an implementation must always have an owner available.
pub trait SessionProvider: Send + Sync {
    fn current_owner_id(&self) -> OwnerId;
}

/// Session with a fixed principal, for the headless driver and tests
#[derive(Debug, Clone)]
pub struct StaticSession {
    owner: OwnerId,
}

impl StaticSession {
    pub fn new(owner: impl Into<OwnerId>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_owner_id(&self) -> OwnerId {
        self.owner.clone()
    }
}
