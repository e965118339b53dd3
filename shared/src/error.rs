use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Client-facing failure categories. The `Display` text is what goes over
/// the wire, so it never carries internal detail.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Invalid request parameters.")]
    InvalidInput,
    #[error("The requested resource was not found.")]
    NotFound,
    #[error("An internal server error occurred.")]
    SystemError,
}

impl ErrorCode {
    pub const fn status(self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::SystemError => 500,
        }
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl From<ErrorCode> for ErrorResponse {
    fn from(code: ErrorCode) -> Self {
        Self {
            error: code.to_string(),
            status: code.status(),
        }
    }
}
