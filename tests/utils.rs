// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use base64::{Engine, prelude::BASE64_STANDARD};
use rocket::http::{Header, hyper::header};

/// A Test Context structure used in integration tests to ensure setting up
/// and tearing down a Local Rocket Client thus ensuring Rocket is gracefully
/// shut down at the end of tests.
pub(crate) struct MyTestContext {
    pub client: rocket::local::blocking::Client,
}

impl test_context::TestContext for MyTestContext {
    fn setup() -> MyTestContext {
        let __rocket = loja::build(true);
        let client = rocket::local::blocking::Client::tracked(__rocket)
            .expect("Failed creating Local Rocket client");
        MyTestContext { client }
    }

    fn teardown(self) {
        self.client.terminate();
    }
}

pub(crate) fn accept_json() -> Header<'static> {
    Header::new(header::ACCEPT.as_str(), "application/json")
}

/// Create and return an _Authorization_ HTTP header w/ the _Basic_ scheme
/// for the known user.
pub(crate) fn authorization() -> Header<'static> {
    act_as("user", "pass")
}

/// An _Authorization_ header w/ the _Basic_ scheme for arbitrary credentials.
pub(crate) fn act_as(username: &str, password: &str) -> Header<'static> {
    let name_password = format!("{}:{}", username, password);
    let b64_encoded = BASE64_STANDARD.encode(name_password);
    Header::new(
        header::AUTHORIZATION.as_str(),
        format!("Basic {}", b64_encoded),
    )
}

/// An _Authorization_ header w/ a verbatim value.
pub(crate) fn raw_authorization(value: &str) -> Header<'static> {
    Header::new(header::AUTHORIZATION.as_str(), value.to_owned())
}
