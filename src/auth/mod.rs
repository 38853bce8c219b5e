// SPDX-License-Identifier: GPL-3.0-or-later

//! Credential store, authenticator and access policy.

mod authenticator;
mod identity;
mod policy;
mod role;
mod store;

pub use authenticator::{AuthResult, Authenticator};
pub use identity::{Credentials, Identity};
pub use policy::{Access, AccessPolicy, Decision, GateError, HEALTH_PATH, parse_basic};
pub use role::Role;
pub use store::{CredentialStore, KNOWN_USERNAME, SingleUserStore};

use thiserror::Error;

/// Reasons an authentication attempt fails. Only ever logged; callers see a
/// single unauthenticated outcome.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Identity is known by the submitted user name.
    #[error("Unknown user")]
    UnknownUser,
    /// The submitted password doesn't match the Identity's hash.
    #[error("Bad password")]
    BadPassword,
}
