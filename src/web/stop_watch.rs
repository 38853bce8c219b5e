// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{DateTime, SecondsFormat, Utc};
use rocket::{
    Data, Request, Response,
    fairing::{Fairing, Info, Kind},
};
use tracing::debug;

/// Response header reporting arrival time and processing duration.
pub const STOP_WATCH_HDR: &str = "X-Stop-Watch";

/// Record time when a request arrives.
pub(crate) struct StopWatch;

#[derive(Copy, Clone)]
struct TimerStart(Option<DateTime<Utc>>);

#[rocket::async_trait]
impl Fairing for StopWatch {
    fn info(&self) -> Info {
        Info {
            name: "Stop Watch",
            kind: Kind::Request | Kind::Response,
        }
    }

    /// Store start time in request-local state.
    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| TimerStart(Some(Utc::now())));
    }

    /// Add a response header showing arrival time and how long we took to
    /// process said request, incl. the gate's work.
    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let TimerStart(Some(arrival_time)) = *req.local_cache(|| TimerStart(None)) else {
            res.set_raw_header(STOP_WATCH_HDR, "---");
            return;
        };

        let duration = match Utc::now()
            .signed_duration_since(arrival_time)
            .num_nanoseconds()
        {
            Some(ns) => format!("{:.3}", ns as f64 / 1_000_000.0),
            None => "---".to_string(),
        };
        debug!("{} {} took {} ms", req.method(), req.uri().path(), duration);
        let value = format!(
            "{}; {} ms",
            arrival_time.to_rfc3339_opts(SecondsFormat::Micros, true),
            duration
        );
        res.set_raw_header(STOP_WATCH_HDR, value);
    }
}
