use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nr_core::{Error, ErrorBody};
use tracing::warn;

/// Error returned by handlers; always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidUrl(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Scraping(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Error::Http(_) | Error::External(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = self.status.as_u16(), error = %self.message, "Request failed");
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
