// SPDX-License-Identifier: GPL-3.0-or-later

//! Rocket plumbing that puts the [AccessPolicy] in front of every route.

use crate::{
    auth::{
        Access, AccessPolicy, AuthResult, Authenticator, Credentials, Decision, GateError,
        Identity, SingleUserStore,
    },
    MyError, config,
};
use rocket::{
    Build, Data, Request, Response, Rocket,
    fairing::{self, Fairing, Info, Kind},
    http::{ContentType, Header, Status, hyper::header},
    request::{FromRequest, Outcome},
    tokio::task,
};
use std::{io::Cursor, sync::Arc};
use tracing::{debug, error, info};

/// Challenge header sent w/ every `401` response.
pub const WWW_AUTHENTICATE_HDR: &str = "WWW-Authenticate";

/// Body of every `401` response.
pub(crate) const UNAUTHORIZED_BODY: &str = "401 - Unauthorized :(";

/// The decision reached for a request; kept in its local cache. `None` when
/// the request never went through the gate.
struct Verdict(Option<Decision>);

/// Fairing that (1) builds the [Authenticator] on Rocket Ignition and
/// places it, along w/ the [AccessPolicy], in managed state, (2) evaluates
/// the policy for each incoming request, and (3) replaces the response of
/// any denied request w/ a `401` challenge whether a route matched or not.
#[derive(Debug)]
pub(crate) struct Gate {
    cost: u32,
}

impl Gate {
    /// When `testing` is TRUE, the cheapest hashing cost is used.
    pub(crate) fn fairing(testing: bool) -> Self {
        Gate {
            cost: config().effective_cost(testing),
        }
    }

    fn init(&self) -> Result<Arc<Authenticator>, MyError> {
        debug!("init... cost = {}", self.cost);
        let store = SingleUserStore::new(self.cost)?;
        let authenticator = Authenticator::new(Box::new(store), self.cost)?;
        info!("Authenticator ready!");
        Ok(Arc::new(authenticator))
    }
}

#[rocket::async_trait]
impl Fairing for Gate {
    fn info(&self) -> Info {
        Info {
            name: "Access Gate",
            kind: Kind::Singleton | Kind::Ignite | Kind::Request | Kind::Response,
        }
    }

    async fn on_ignite(&self, r: Rocket<Build>) -> fairing::Result {
        match self.init() {
            Ok(x) => Ok(r.manage(x).manage(AccessPolicy::default())),
            Err(x) => {
                error!("Failed initializing authenticator: {}", x);
                Err(r)
            }
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _: &mut Data<'_>) {
        let decision = decide(req).await;
        debug!("{} {} -> {:?}", req.method(), req.uri().path(), decision);
        req.local_cache(|| Verdict(Some(decision)));
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        if let Some(x) = &req.local_cache(|| Verdict(None)).0
            && !x.is_allowed()
        {
            info!("Halted {} {}: {:?}", req.method(), req.uri().path(), x);
            challenge(res);
        }
    }
}

async fn decide(req: &Request<'_>) -> Decision {
    let rocket = req.rocket();
    let (Some(policy), Some(authn)) = (
        rocket.state::<AccessPolicy>(),
        rocket.state::<Arc<Authenticator>>(),
    ) else {
        error!("Access policy or authenticator missing from managed state");
        return Decision::Denied(GateError::BadCredentials);
    };

    let path = req.uri().path().to_string();
    if policy.classify(&path) == Access::Public {
        return Decision::Open;
    }

    let policy = policy.clone();
    let authn = Arc::clone(authn);
    let authorization = req
        .headers()
        .get_one(header::AUTHORIZATION.as_str())
        .map(String::from);
    // hash verification is CPU bound; keep it off the async workers...
    match task::spawn_blocking(move || policy.evaluate(&path, authorization.as_deref(), &authn))
        .await
    {
        Ok(x) => x,
        Err(x) => {
            error!("Failed evaluating access policy: {}", x);
            Decision::Denied(GateError::BadCredentials)
        }
    }
}

/// Run `authenticator` on a blocking thread for the given `credentials`.
pub(crate) async fn authenticate(
    authenticator: &Arc<Authenticator>,
    credentials: Credentials,
) -> AuthResult {
    let authn = Arc::clone(authenticator);
    match task::spawn_blocking(move || {
        authn.authenticate(&credentials.username, &credentials.password)
    })
    .await
    {
        Ok(x) => x,
        Err(x) => {
            error!("Failed running authenticator: {}", x);
            AuthResult::denied()
        }
    }
}

/// Overwrite `res` w/ a `401` carrying a Basic challenge.
fn challenge(res: &mut Response<'_>) {
    res.set_status(Status::Unauthorized);
    res.set_header(ContentType::Plain);
    res.set_header(www_authenticate());
    res.set_sized_body(UNAUTHORIZED_BODY.len(), Cursor::new(UNAUTHORIZED_BODY));
}

pub(crate) fn www_authenticate() -> Header<'static> {
    Header::new(WWW_AUTHENTICATE_HDR, config().challenge())
}

/// A Rocket Request Guard yielding the [Identity] the gate granted access
/// to. Fails w/ `401` otherwise.
#[derive(Debug)]
pub struct Principal(
    /// The authenticated caller.
    pub Identity,
);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Principal {
    type Error = GateError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match &req.local_cache(|| Verdict(None)).0 {
            Some(Decision::Granted(x)) => Outcome::Success(Principal(x.clone())),
            Some(Decision::Denied(x)) => Outcome::Error((Status::Unauthorized, *x)),
            x => {
                error!("No identity for {}: {:?}", req.uri().path(), x);
                Outcome::Error((Status::Unauthorized, GateError::MissingCredentials))
            }
        }
    }
}
