//! HTTP error mapping.
//!
//! Every pipeline failure becomes a JSON body with a user-facing `error`
//! field; the status code carries the failure class. Nothing is logged-only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fractal_core::FractalError;
use serde::Serialize;
use tracing::warn;

/// Wire shape of a failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A pipeline error carried across the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub FractalError);

impl From<FractalError> for ApiError {
    fn from(err: FractalError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            FractalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FractalError::Busy => StatusCode::CONFLICT,
            FractalError::Upstream(_) | FractalError::EmptyResult => StatusCode::BAD_GATEWAY,
            FractalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FractalError::Store(_) | FractalError::Io(_) | FractalError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_failure_class() {
        assert_eq!(
            ApiError(FractalError::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError(FractalError::Busy).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError(FractalError::Upstream("x".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(FractalError::EmptyResult).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
