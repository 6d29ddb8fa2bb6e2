//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagecraft_client::{ApiError, ErrorBody, ErrorDetail};
use pagecraft_editor::EditorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<EditorError> for ServerError {
    fn from(e: EditorError) -> Self {
        ServerError::InvalidRequest(e.to_string())
    }
}

impl ServerError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        let detail = |code: &str, current_version: Option<u64>| ErrorDetail {
            code: code.to_string(),
            message: self.to_string(),
            current_version,
        };

        match self {
            ServerError::Api(ApiError::StaleVersion { current, .. }) => (
                StatusCode::CONFLICT,
                detail(ErrorDetail::STALE_VERSION, Some(*current)),
            ),
            ServerError::Api(ApiError::NothingToPublish(_)) => (
                StatusCode::CONFLICT,
                detail(ErrorDetail::NOTHING_TO_PUBLISH, None),
            ),
            ServerError::Api(ApiError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, detail(ErrorDetail::NOT_FOUND, None))
            }
            ServerError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                detail(ErrorDetail::INVALID_REQUEST, None),
            ),
            ServerError::Api(_) => (StatusCode::INTERNAL_SERVER_ERROR, detail("internal", None)),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody { error })).into_response()
    }
}
