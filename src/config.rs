// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{MyError, runtime_error};
use dotenvy::var;
use std::sync::OnceLock;

// NOTE - if these values change make sure the documentation in
// `.env.template` matches...
const DEFAULT_REALM: &str = "Realm";
const DEFAULT_RUST_LOG: &str = "info";

/// Lowest cost `bcrypt` accepts. Used when building a server for tests.
pub(crate) const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

static CONFIG: OnceLock<Config> = OnceLock::new();
/// This server's configuration Singleton.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// A structure that provides the current configuration settings.
#[derive(Debug)]
pub struct Config {
    /// The protection space advertised in `WWW-Authenticate` challenges.
    pub realm: String,
    /// Work factor used when hashing the known user's password.
    pub(crate) bcrypt_cost: u32,
    /// Log filter directives for the file logger.
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        let realm = var("LOJA_REALM").unwrap_or(DEFAULT_REALM.to_string());
        let bcrypt_cost = var("LOJA_BCRYPT_COST")
            .map(|x| parse_cost(&x).expect("Failed parsing LOJA_BCRYPT_COST"))
            .unwrap_or(bcrypt::DEFAULT_COST);
        let rust_log = var("RUST_LOG").unwrap_or(DEFAULT_RUST_LOG.to_string());

        Self {
            realm,
            bcrypt_cost,
            rust_log,
        }
    }
}

impl Config {
    /// Return the cost to use for hashing. When `testing` is TRUE, the
    /// lowest allowed cost is returned regardless of the configured one.
    pub(crate) fn effective_cost(&self, testing: bool) -> u32 {
        if testing {
            MIN_BCRYPT_COST
        } else {
            self.bcrypt_cost
        }
    }

    /// Value of the `WWW-Authenticate` header sent w/ 401 responses.
    pub(crate) fn challenge(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

fn parse_cost(value: &str) -> Result<u32, MyError> {
    match value.trim().parse::<u32>() {
        Ok(x) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&x) => Ok(x),
        Ok(x) => runtime_error!(
            "bcrypt cost {} is outside [{}..{}]",
            x,
            MIN_BCRYPT_COST,
            MAX_BCRYPT_COST
        ),
        Err(x) => runtime_error!("Invalid bcrypt cost '{}': {}", value, x),
    }
}
