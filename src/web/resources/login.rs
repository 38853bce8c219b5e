// SPDX-License-Identifier: GPL-3.0-or-later

//! Login Resource (/auth/login)
//! ----------------------------
//! Authenticates the user name + password pair in the request body.
//!
//! Note that, like every other protected route, the request must also carry
//! valid Basic credentials in its `Authorization` header to get here at all.
//! The body's credentials are checked independently of those.

use crate::{
    auth::{Authenticator, Credentials},
    web::{Principal, gate},
};
use rocket::{State, http::Status, post, response::status, routes, serde::json::Json};
use serde::Deserialize;
use std::{fmt, sync::Arc};
use tracing::{debug, info, instrument};

/// Body of a successful login response.
pub const LOGIN_OK: &str = "Login bem-sucedido!";
/// Body of a failed login response.
pub const LOGIN_FAILED: &str = "Falha na autenticação";

/// Expected JSON body of a login request.
#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(value: LoginRequest) -> Self {
        Credentials {
            username: value.username,
            password: value.password,
        }
    }
}

#[doc(hidden)]
pub fn routes() -> Vec<rocket::Route> {
    routes![login]
}

/// Respond w/ `200` and [LOGIN_OK] if the body's credentials are valid, or
/// `401` and [LOGIN_FAILED] otherwise.
///
/// A body that's not valid JSON, or lacks either property, is rejected w/
/// `400` before reaching here.
#[instrument(skip(authn))]
#[post("/login", data = "<body>")]
async fn login(
    principal: Principal,
    authn: &State<Arc<Authenticator>>,
    body: Json<LoginRequest>,
) -> status::Custom<&'static str> {
    debug!("----- login ----- {}", principal.0);

    let credentials = Credentials::from(body.into_inner());
    debug!("Authenticating '{}'", credentials.username());
    let result = gate::authenticate(authn.inner(), credentials).await;
    if result.authenticated {
        info!("Login succeeded");
        status::Custom(Status::Ok, LOGIN_OK)
    } else {
        info!("Login failed");
        status::Custom(Status::Unauthorized, LOGIN_FAILED)
    }
}
