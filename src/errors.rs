//! HTTP-facing error types for the webhook endpoints.

use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

/// Errors surfaced to webhook callers as JSON bodies.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// Verification mode or token mismatch.
    #[display("Forbidden")]
    Forbidden,
    /// The handshake challenge is not an integer.
    #[display("hub.challenge must be an integer")]
    InvalidChallenge,
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        web::HttpResponse::build(self.status_code())
            .json(&serde_json::json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::Forbidden => http::StatusCode::FORBIDDEN,
            ApiError::InvalidChallenge => http::StatusCode::BAD_REQUEST,
        }
    }
}
