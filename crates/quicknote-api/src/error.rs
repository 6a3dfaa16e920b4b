//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Errors are converted into a
//! `{error, kind}` JSON body with a status code derived from the kind.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use quicknote_core::{ErrorKind, ErrorResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the persistence layer.
    #[error(transparent)]
    Persistence(#[from] quicknote_core::Error),

    #[error("{0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Persistence(err) => err.kind(),
            ApiError::BadRequest(_) | ApiError::PayloadTooLarge(_) => ErrorKind::InvalidInput,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            other => status_for(other.kind()),
        }
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = self.status();

        // Persistence details stay in the logs.
        let message = match kind {
            ErrorKind::Internal => {
                error!(error = %self, error_kind = %kind, "Request failed");
                "Internal server error".to_string()
            }
            ErrorKind::Unavailable => {
                warn!(error = %self, error_kind = %kind, "Persistence unavailable");
                "Persistence service unavailable".to_string()
            }
            ErrorKind::InvalidInput | ErrorKind::NotFound => match self {
                ApiError::Persistence(quicknote_core::Error::InvalidInput(msg))
                | ApiError::BadRequest(msg)
                | ApiError::PayloadTooLarge(msg) => msg,
                other => other.to_string(),
            },
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                kind,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_is_400_with_message() {
        let err: ApiError = quicknote_core::Error::InvalidInput("text is required".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "text is required");
        assert_eq!(body.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_unavailable_is_503() {
        let err: ApiError = quicknote_core::Error::Unavailable("pool timed out".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.kind, ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let err: ApiError =
            quicknote_core::Error::Internal("relation \"note\" does not exist".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.kind, ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_payload_too_large_is_413_with_json_body() {
        let (status, body) =
            body_of(ApiError::PayloadTooLarge("length limit exceeded".into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body.kind, ErrorKind::InvalidInput);
        assert_eq!(body.error, "length limit exceeded");
    }

    #[test]
    fn test_status_for_covers_every_kind() {
        assert_eq!(status_for(ErrorKind::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorKind::Unavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
