use std::time::Instant;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Data, Request, Response};
use tracing::info;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Per-request id and start time, kept in Rocket's request-local cache.
#[derive(Debug, Clone, Copy)]
pub struct RequestTiming {
    pub id: Uuid,
    pub started: Instant,
}

impl RequestTiming {
    fn start() -> Self {
        Self { id: Uuid::new_v4(), started: Instant::now() }
    }

    pub fn of(req: &Request<'_>) -> Self {
        *req.local_cache(Self::start)
    }
}

/// Tags every response with a request id and logs one line per request.
pub struct RequestTrace;

#[rocket::async_trait]
impl Fairing for RequestTrace {
    fn info(&self) -> Info {
        Info {
            name: "Request trace",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        RequestTiming::of(req);
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let timing = RequestTiming::of(req);
        res.set_header(Header::new(REQUEST_ID_HEADER, timing.id.to_string()));
        info!(
            request_id = %timing.id,
            method = %req.method(),
            path = %req.uri().path(),
            status = res.status().code,
            elapsed_ms = timing.started.elapsed().as_millis() as u64,
            "Request handled"
        );
    }
}
