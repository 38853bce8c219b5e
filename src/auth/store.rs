// SPDX-License-Identifier: GPL-3.0-or-later

//! Lookup of known Identities by user name.

use crate::{
    MyError,
    auth::{AuthError, Identity, Role},
};
use tracing::debug;

/// User name of the only Identity known to [SingleUserStore].
pub const KNOWN_USERNAME: &str = "user";

// plain password of the known Identity. hashed once on construction; never
// kept around in clear.
const KNOWN_PASSWORD: &str = "pass";

/// Capability to find an [Identity] given its user name.
///
/// The [Authenticator][crate::Authenticator] only relies on this trait so a
/// persistent store can replace the hard-wired one w/o touching it.
pub trait CredentialStore: Send + Sync {
    /// Return the Identity known by `username` or [AuthError::UnknownUser].
    fn find(&self, username: &str) -> Result<Identity, AuthError>;
}

/// An in-memory store holding exactly one hard-wired Identity.
#[derive(Debug)]
pub struct SingleUserStore {
    identity: Identity,
}

impl SingleUserStore {
    /// Create the store, hashing the known user's password w/ the given
    /// `bcrypt` work factor.
    pub fn new(cost: u32) -> Result<Self, MyError> {
        let hash = bcrypt::hash(KNOWN_PASSWORD, cost)?;
        let identity = Identity::new(KNOWN_USERNAME, hash, &[Role::User]);
        debug!("Known identity: {}", identity);
        Ok(Self { identity })
    }
}

impl CredentialStore for SingleUserStore {
    fn find(&self, username: &str) -> Result<Identity, AuthError> {
        if username == self.identity.username() {
            Ok(self.identity.clone())
        } else {
            Err(AuthError::UnknownUser)
        }
    }
}
