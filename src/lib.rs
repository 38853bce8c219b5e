// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//!
//! A small Rocket service exposing a health probe, a test endpoint and a
//! login endpoint, all but the first protected by HTTP Basic Authentication
//! against a single, hard-wired user.
//!
//! It consists of two modules: (a) an authentication layer holding the
//! known [Identity], the [Authenticator] that verifies submitted credentials
//! and the [AccessPolicy] deciding which paths need them, and (b) a Web
//! server composing that policy in front of every route.
//!
//! # Third-party crates
//!
//! 1. Web server:
//!     * [rocket][1]: for routing, request guards, fairings and JSON bodies.
//!
//! 2. Password hashing and Basic tokens:
//!     * [bcrypt][2]: for salted one-way hashing and constant-time
//!       verification of passwords.
//!     * [base64][3]: for decoding `Authorization: Basic` tokens.
//!
//! 3. Logging:
//!     * [tracing][4] + [tracing-subscriber][5].
//!
//! [1]: https://crates.io/crates/rocket
//! [2]: https://crates.io/crates/bcrypt
//! [3]: https://crates.io/crates/base64
//! [4]: https://crates.io/crates/tracing
//! [5]: https://crates.io/crates/tracing-subscriber
//!

mod auth;
mod config;
mod error;
mod web;

pub use auth::{
    Access, AccessPolicy, AuthError, AuthResult, Authenticator, CredentialStore, Credentials,
    Decision, GateError, HEALTH_PATH, Identity, KNOWN_USERNAME, Role, SingleUserStore,
    parse_basic,
};
pub use config::*;
pub use error::MyError;
pub use web::{
    Principal, STOP_WATCH_HDR, WWW_AUTHENTICATE_HDR, build,
    resources::{
        health::{ALIVE, Health},
        login::{LOGIN_FAILED, LOGIN_OK},
        test::{Message, TEST_MESSAGE},
    },
};

/// Generate a message (in the style of `format!` macro), log it at level
/// _error_ and raise a [runtime error][crate::MyError#variant.Runtime].
#[macro_export]
macro_rules! runtime_error {
    ( $( $arg: tt )* ) => {
        {
            let msg = std::fmt::format(core::format_args!($($arg)*));
            tracing::error!("{}", msg);
            return Err($crate::MyError::Runtime(msg.into()));
        }
    }
}
