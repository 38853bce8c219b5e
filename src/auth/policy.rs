// SPDX-License-Identifier: GPL-3.0-or-later

//! The rules deciding which request paths require authentication, and the
//! evaluation of a request's `Authorization` header against them.
//!
//! A request path is in one of two states:
//!
//! * [Access::Public]: the request proceeds w/o any credential check.
//! * [Access::Protected]: the request must present valid HTTP Basic
//!   credentials; the [Authenticator] decides.
//!
//! This module knows nothing about Rocket. The web server's gate fairing
//! feeds it the path and header of each request.

use crate::{
    MyError,
    auth::{Authenticator, Credentials, Identity},
    runtime_error,
};
use base64::{Engine, prelude::BASE64_STANDARD};
use thiserror::Error;
use tracing::{debug, warn};

/// Path of the health probe; the only one reachable w/o credentials.
pub const HEALTH_PATH: &str = "/health";

const BASIC_SCHEME: &str = "basic ";

/// Access state of a request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// No credentials needed.
    Public,
    /// Valid Basic credentials needed.
    Protected,
}

/// Why a protected request was turned away. All of them result in the same
/// `401` response.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// No `Authorization` header.
    #[error("Missing credentials")]
    MissingCredentials,
    /// An `Authorization` header that's not a well-formed Basic token.
    #[error("Malformed credentials")]
    MalformedCredentials,
    /// Well-formed credentials the [Authenticator] rejected.
    #[error("Bad credentials")]
    BadCredentials,
}

/// Result of evaluating the policy for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Public path; proceed.
    Open,
    /// Protected path w/ valid credentials; proceed as this Identity.
    Granted(Identity),
    /// Protected path; halt w/ `401`.
    Denied(GateError),
}

impl Decision {
    /// TRUE unless the request must be halted.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Denied(_))
    }
}

/// The set of public paths. Everything else is protected.
#[derive(Clone, Debug)]
pub struct AccessPolicy {
    public_paths: Vec<String>,
}

impl Default for AccessPolicy {
    /// Only the health probe is public.
    fn default() -> Self {
        Self {
            public_paths: vec![HEALTH_PATH.to_owned()],
        }
    }
}

impl AccessPolicy {
    /// Classify a request path. Matching is exact; `path` must not include
    /// the query string.
    pub fn classify(&self, path: &str) -> Access {
        if self.public_paths.iter().any(|x| x == path) {
            Access::Public
        } else {
            Access::Protected
        }
    }

    /// Decide whether a request to `path` carrying the given `Authorization`
    /// header value, if any, may proceed.
    pub fn evaluate(
        &self,
        path: &str,
        authorization: Option<&str>,
        authenticator: &Authenticator,
    ) -> Decision {
        if self.classify(path) == Access::Public {
            debug!("'{}' is public", path);
            return Decision::Open;
        }

        let Some(value) = authorization else {
            debug!("No credentials for '{}'", path);
            return Decision::Denied(GateError::MissingCredentials);
        };

        let credentials = match parse_basic(value) {
            Ok(x) => x,
            Err(x) => {
                warn!("Rejected Authorization header: {}", x);
                return Decision::Denied(GateError::MalformedCredentials);
            }
        };

        let result = authenticator.authenticate(&credentials.username, &credentials.password);
        match result.identity {
            Some(identity) if result.authenticated => Decision::Granted(identity),
            _ => Decision::Denied(GateError::BadCredentials),
        }
    }
}

/// Decode the value of an `Authorization` header using the Basic scheme
/// into a user name + password pair.
pub fn parse_basic(value: &str) -> Result<Credentials, MyError> {
    let trimmed = value.trim();
    let scheme = trimmed.get(..BASIC_SCHEME.len()).unwrap_or_default();
    if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
        runtime_error!("Authorization scheme is not Basic")
    }

    let token = trimmed[BASIC_SCHEME.len()..].trim();
    let bytes = BASE64_STANDARD.decode(token)?;
    let decoded = std::str::from_utf8(&bytes)?;
    // the user name can't contain a colon but the password can...
    match decoded.split_once(':') {
        Some((username, password)) => Ok(Credentials::new(username, password)),
        None => runtime_error!("Basic token has no ':' separator"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::SingleUserStore, config::MIN_BCRYPT_COST};

    fn authenticator() -> Authenticator {
        let store = SingleUserStore::new(MIN_BCRYPT_COST).unwrap();
        Authenticator::new(Box::new(store), MIN_BCRYPT_COST).unwrap()
    }

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(user_pass))
    }

    #[test]
    fn test_classify() {
        let policy = AccessPolicy::default();

        assert_eq!(policy.classify("/health"), Access::Public);

        for x in [
            "/", "/test", "/auth/login", "/health/", "/healthz", "/Health", "/api/health", "",
        ] {
            assert_eq!(policy.classify(x), Access::Protected, "path: {:?}", x);
        }
    }

    #[test]
    fn test_parse_basic() {
        let creds = parse_basic(&basic("user:pass")).unwrap();
        assert_eq!(creds, Credentials::new("user", "pass"));

        // scheme is case-insensitive and surrounding blanks are ignored...
        let creds = parse_basic(&format!("  bAsIc   {}  ", BASE64_STANDARD.encode("a:b"))).unwrap();
        assert_eq!(creds, Credentials::new("a", "b"));

        // passwords may contain colons; empty parts are allowed...
        let creds = parse_basic(&basic("user:p:a:s:s")).unwrap();
        assert_eq!(creds.password, "p:a:s:s");
        let creds = parse_basic(&basic(":")).unwrap();
        assert_eq!(creds, Credentials::new("", ""));
    }

    #[test]
    fn test_parse_basic_errors() {
        assert!(matches!(parse_basic(""), Err(MyError::Runtime(_))));
        assert!(matches!(parse_basic("Basic"), Err(MyError::Runtime(_))));
        assert!(matches!(
            parse_basic("Bearer dXNlcjpwYXNz"),
            Err(MyError::Runtime(_))
        ));
        assert!(matches!(
            parse_basic("Basic !!not-base64!!"),
            Err(MyError::Base64(_))
        ));
        let not_utf8 = format!("Basic {}", BASE64_STANDARD.encode([0xff, 0xfe, b':']));
        assert!(matches!(parse_basic(&not_utf8), Err(MyError::UTF8(_))));
        assert!(matches!(
            parse_basic(&basic("userpass")),
            Err(MyError::Runtime(_))
        ));
    }

    #[test]
    fn test_evaluate_public() {
        let policy = AccessPolicy::default();
        let authn = authenticator();

        assert_eq!(policy.evaluate("/health", None, &authn), Decision::Open);
        // even bad credentials are ignored on public paths...
        assert_eq!(
            policy.evaluate("/health", Some("garbage"), &authn),
            Decision::Open
        );
    }

    #[test]
    fn test_evaluate_protected() {
        let policy = AccessPolicy::default();
        let authn = authenticator();

        assert_eq!(
            policy.evaluate("/test", None, &authn),
            Decision::Denied(GateError::MissingCredentials)
        );
        assert_eq!(
            policy.evaluate("/test", Some("Bearer xyz"), &authn),
            Decision::Denied(GateError::MalformedCredentials)
        );
        assert_eq!(
            policy.evaluate("/test", Some(&basic("user:wrong")), &authn),
            Decision::Denied(GateError::BadCredentials)
        );
        assert_eq!(
            policy.evaluate("/test", Some(&basic("user1:password")), &authn),
            Decision::Denied(GateError::BadCredentials)
        );

        let decision = policy.evaluate("/nowhere", Some(&basic("user:pass")), &authn);
        assert!(decision.is_allowed());
        match decision {
            Decision::Granted(x) => assert_eq!(x.username(), "user"),
            x => panic!("Expected Granted; got {:?}", x),
        }
    }
}
