// SPDX-License-Identifier: GPL-3.0-or-later

//! Verification of submitted credentials against a [CredentialStore].

use crate::{
    MyError,
    auth::{AuthError, CredentialStore, Identity},
};
use tracing::{debug, error, info};

// hashed at construction and verified against when the user name is unknown
// so both failure paths cost the same.
const DUMMY_PASSWORD: &str = "not-a-password";

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// TRUE iff the credentials matched a known Identity.
    pub authenticated: bool,
    /// The resolved Identity when authenticated.
    pub identity: Option<Identity>,
}

impl AuthResult {
    fn granted(identity: Identity) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
        }
    }

    pub(crate) fn denied() -> Self {
        Self {
            authenticated: false,
            identity: None,
        }
    }
}

/// Stateless verifier of user name + password pairs.
pub struct Authenticator {
    store: Box<dyn CredentialStore>,
    dummy_hash: String,
}

impl Authenticator {
    /// Create an Authenticator backed by `store`. `cost` should match the
    /// work factor of the hashes `store` holds.
    pub fn new(store: Box<dyn CredentialStore>, cost: u32) -> Result<Self, MyError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        Ok(Self { store, dummy_hash })
    }

    /// Check `password` against the hash of the Identity known as `username`.
    ///
    /// Callers are never told which part of the pair was wrong.
    pub fn authenticate(&self, username: &str, password: &str) -> AuthResult {
        match self.verify(username, password) {
            Ok(x) => {
                info!("Authenticated {}", x);
                AuthResult::granted(x)
            }
            Err(x) => {
                info!("Failed authenticating '{}': {}", username, x);
                AuthResult::denied()
            }
        }
    }

    /// Same as `authenticate` but keeps the reason of a failure.
    pub(crate) fn verify(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        match self.store.find(username) {
            Ok(identity) => {
                if matches_hash(password, identity.password_hash()) {
                    Ok(identity)
                } else {
                    Err(AuthError::BadPassword)
                }
            }
            Err(x) => {
                debug!("Unknown user; verifying against dummy hash");
                let _ = matches_hash(password, &self.dummy_hash);
                Err(x)
            }
        }
    }
}

fn matches_hash(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(x) => x,
        Err(x) => {
            error!("Failed verifying password hash: {}", x);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{Role, SingleUserStore},
        config::MIN_BCRYPT_COST,
    };
    use tracing_test::traced_test;

    fn authenticator() -> Authenticator {
        let store = SingleUserStore::new(MIN_BCRYPT_COST).unwrap();
        Authenticator::new(Box::new(store), MIN_BCRYPT_COST).unwrap()
    }

    #[traced_test]
    #[test]
    fn test_known_user() {
        let authn = authenticator();

        let result = authn.authenticate("user", "pass");
        assert!(result.authenticated);
        let identity = result.identity.expect("Missing identity");
        assert_eq!(identity.username(), "user");
        assert!(identity.has_role(Role::User));

        let result = authn.authenticate("user", "wrong");
        assert!(!result.authenticated);
        assert!(result.identity.is_none());

        assert!(!authn.authenticate("user", "").authenticated);
        assert!(!authn.authenticate("user", "PASS").authenticated);
    }

    #[test]
    fn test_unknown_users() {
        let authn = authenticator();

        for x in ["", "user1", "USER", "admin", "root", "user\0"] {
            assert_eq!(authn.authenticate(x, "pass"), AuthResult::denied());
        }
        // the inconsistent second user must not be accepted either...
        assert!(!authn.authenticate("user1", "password").authenticated);
    }

    #[test]
    fn test_failure_reasons() {
        let authn = authenticator();

        assert!(matches!(
            authn.verify("nobody", "pass"),
            Err(AuthError::UnknownUser)
        ));
        assert!(matches!(
            authn.verify("user", "nope"),
            Err(AuthError::BadPassword)
        ));
        assert!(authn.verify("user", "pass").is_ok());
    }

    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn find(&self, username: &str) -> Result<Identity, AuthError> {
            Ok(Identity::new(username, "not a bcrypt hash".into(), &[Role::User]))
        }
    }

    #[traced_test]
    #[test]
    fn test_malformed_hash() {
        let authn = Authenticator::new(Box::new(BrokenStore), MIN_BCRYPT_COST).unwrap();
        assert!(!authn.authenticate("anyone", "anything").authenticated);
        assert!(logs_contain("Failed verifying password hash"));
    }
}
