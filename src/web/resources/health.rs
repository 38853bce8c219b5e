// SPDX-License-Identifier: GPL-3.0-or-later

//! Health Resource (/health)
//! -------------------------
//! A liveness probe. Always reachable w/o credentials.

use rocket::{get, routes, serde::json::Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The fixed payload of a successful probe.
pub const ALIVE: &str = "Is Alive";

/// Body of a `GET /health` response.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Health {
    /// Always [ALIVE].
    pub status: String,
}

#[doc(hidden)]
pub fn routes() -> Vec<rocket::Route> {
    routes![get]
}

#[instrument]
#[get("/")]
async fn get() -> Json<Health> {
    debug!("...");
    Json(Health {
        status: ALIVE.to_owned(),
    })
}
