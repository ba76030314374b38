use crate::models::ValidationError;
use crate::store::StoreError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure of a single data source adapter
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed payload from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Network-side fetch failures are worth retrying; storage faults are not
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SourceError::Store(_))
    }
}

/// Error surfaced at the HTTP boundary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Property not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Storage fault reported to the caller with a generic message
    pub fn upstream(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Upstream { message, source }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { source, .. } => {
                error!(error = %source, "Document store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_not_retryable_fetch_failures() {
        let store = SourceError::Store(StoreError::Duplicate("x".into()));
        assert!(!store.is_retryable());

        let status = SourceError::Status {
            url: "http://listings.test".into(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert!(status.is_retryable());
    }

    #[test]
    fn maps_kinds_to_status_codes() {
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(ValidationError::MissingField("host")).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        let upstream = AppError::upstream("Failed to fetch properties")(StoreError::Duplicate("x".into()));
        assert_eq!(upstream.to_string(), "Failed to fetch properties");
        assert_eq!(upstream.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
