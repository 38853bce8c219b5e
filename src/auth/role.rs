// SPDX-License-Identifier: GPL-3.0-or-later

//! Authorization Roles granted to known Identities.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Authorization role variants.
///
/// There's only one for now; every known Identity is a plain user.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Can use every protected resource.
    #[serde(rename = "USER")]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde() {
        const OUT: &str = r#"{"name":"user","roles":["USER"]}"#;

        #[derive(Debug, Deserialize, Serialize, PartialEq)]
        struct Foo<'a> {
            name: &'a str,
            roles: Vec<Role>,
        }

        let x = Foo {
            name: "user",
            roles: vec![Role::User],
        };
        let out = serde_json::to_string(&x).expect("Failed serializing Foo");
        assert_eq!(out, OUT);

        let foo: Foo = serde_json::from_str(&out).expect("Failed deserializing Foo");
        assert_eq!(foo, x);
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::User.to_string(), "USER");
    }
}
