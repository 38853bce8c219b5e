// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{
    auth::HEALTH_PATH,
    web::{
        gate::{Gate, UNAUTHORIZED_BODY, www_authenticate},
        resources,
        stop_watch::StopWatch,
    },
};
use chrono::Local;
use rocket::{
    Build, Request, Responder, Rocket, catch, catchers, fairing::AdHoc, http::Header,
    response::status,
};
use tracing::{debug, error, info, warn};

/// A `401` w/ a Basic challenge.
#[derive(Responder)]
#[response(status = 401, content_type = "plain")]
struct Challenge {
    inner: &'static str,
    challenge: Header<'static>,
}

/// Entry point for constructing a Rocket and use it for either testing or
/// not. When `testing` is TRUE the known user's password is hashed w/ the
/// lowest `bcrypt` cost.
pub fn build(testing: bool) -> Rocket<Build> {
    let figment = rocket::Config::figment();
    rocket::custom(figment)
        .mount(HEALTH_PATH, resources::health::routes())
        .mount("/test", resources::test::routes())
        .mount("/auth", resources::login::routes())
        // stop-watch fairing; ahead of the gate so its timing covers the
        // credential check
        .attach(StopWatch)
        .attach(Gate::fairing(testing))
        // startup hook
        .attach(AdHoc::on_liftoff("Liftoff Hook", |_| {
            Box::pin(async move {
                info!(
                    "Loja {} starting up on {}",
                    env!("CARGO_PKG_VERSION"),
                    Local::now().to_rfc2822()
                );
            })
        }))
        // shutdown hook
        .attach(AdHoc::on_shutdown("Shutdown Hook", |_| {
            Box::pin(async move {
                info!(
                    "Loja {} shutting down on {}",
                    env!("CARGO_PKG_VERSION"),
                    Local::now().to_rfc2822()
                );
            })
        }))
        // wire the catchers...
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}

#[catch(400)]
fn bad_request(req: &Request) -> &'static str {
    error!("----- 400 -----");
    debug!("req = {:?}", req);
    "400 - Bad request :("
}

#[catch(401)]
fn unauthorized(req: &Request) -> Challenge {
    warn!("----- 401 -----");
    debug!("req = {:?}", req);
    Challenge {
        inner: UNAUTHORIZED_BODY,
        challenge: www_authenticate(),
    }
}

#[catch(404)]
fn not_found(req: &Request) -> &'static str {
    error!("----- 404 -----");
    debug!("req = {:?}", req);
    "404 - Resource not found :("
}

// Rocket raises 422 for well-formed JSON bodies that don't match the
// expected shape. report those as plain bad requests...
#[catch(422)]
fn unprocessable(req: &Request) -> status::BadRequest<String> {
    error!("----- 422 -----");
    debug!("req = {:?}", req);
    status::BadRequest(format!("400 - Malformed request body for {}", req.uri()))
}

#[catch(500)]
fn internal_error(req: &Request) -> &'static str {
    error!("----- 500 -----");
    debug!("req = {:?}", req);
    "500 - Internal server error :("
}
