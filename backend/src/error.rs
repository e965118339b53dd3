use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use tally_shared::error::{ErrorCode, ErrorResponse};
use tally_shared::validation::RoundIdError;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::trace::RequestTiming;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid round id: {0}")]
    InvalidRoundId(#[from] RoundIdError),
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidRoundId(_) => ErrorCode::InvalidInput,
            ApiError::Storage(_) => ErrorCode::SystemError,
        }
    }
}

// The cause is logged here; the client only ever sees the generic body.
impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let request_id = RequestTiming::of(req).id;
        match &self {
            ApiError::Storage(cause) => error!(%request_id, path = %req.uri().path(), "{}", cause),
            ApiError::InvalidRoundId(reason) => warn!(%request_id, path = %req.uri().path(), "{}", reason),
        }

        let status = Status::from_code(code.status()).unwrap_or(Status::InternalServerError);
        rocket::Response::build_from(Json(ErrorResponse::from(code)).respond_to(req)?)
            .status(status)
            .ok()
    }
}
