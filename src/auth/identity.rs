// SPDX-License-Identifier: GPL-3.0-or-later

//! Data structures representing a known principal and the transient
//! credentials submitted on its behalf.

use crate::auth::Role;
use core::fmt;
use std::collections::HashSet;

/// A known principal of this server. Immutable once created.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
    /// Salted one-way hash of the password in `bcrypt` modular crypt format.
    password_hash: String,
    roles: HashSet<Role>,
}

impl Identity {
    pub(crate) fn new(username: &str, password_hash: String, roles: &[Role]) -> Self {
        Self {
            username: username.to_owned(),
            password_hash,
            roles: roles.iter().copied().collect(),
        }
    }

    /// This Identity's unique user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Roles granted to this Identity.
    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    /// Return TRUE if this Identity was granted `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

// never leak the hash in logs...
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut roles: Vec<String> = self.roles.iter().map(Role::to_string).collect();
        roles.sort();
        write!(f, "Identity <{}> [{}]", self.username, roles.join(", "))
    }
}

/// A user name + plain password pair submitted for a single authentication
/// attempt. Never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl Credentials {
    /// Construct from a user name and a plain password.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    /// The submitted user name.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let id = Identity::new("user", "$2b$04$secret".into(), &[Role::User]);
        let out = format!("{:?}", id);
        assert!(out.contains("user"));
        assert!(!out.contains("secret"));

        let creds = Credentials::new("user", "pass");
        assert_eq!(creds.username(), "user");
        let out = format!("{:?}", creds);
        assert!(out.contains("user"));
        assert!(!out.contains("pass\""));
        assert!(out.contains("***"));
    }

    #[test]
    fn test_display() {
        let id = Identity::new("user", String::new(), &[Role::User, Role::User]);
        assert_eq!(id.to_string(), "Identity <user> [USER]");
        assert_eq!(id.roles().len(), 1);
        assert!(id.has_role(Role::User));
    }
}
