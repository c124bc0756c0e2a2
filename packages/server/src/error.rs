use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::editor::{BatchRejected, EditError};
use common::storage::StoreError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `INVALID_CREDENTIALS`, `NOT_FOUND`, `CONFIRMATION_REQUIRED`,
    /// `BACKEND_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "hackathon 'winter-2030' not found")]
    pub message: String,
    /// Position of the rejected edit within a batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub edit_index: Option<usize>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    InvalidCredentials,
    NotFound(String),
    /// A destructive edit was submitted without `confirmed`. Carries the
    /// warning the operator has to accept.
    ConfirmationRequired(String),
    BackendUnavailable(String),
    /// An edit batch was rejected at `index`.
    EditRejected {
        index: usize,
        source: Box<AppError>,
    },
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid admin password".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::ConfirmationRequired(msg) => {
                (StatusCode::CONFLICT, "CONFIRMATION_REQUIRED", msg)
            }
            AppError::BackendUnavailable(msg) => {
                tracing::warn!("Storage backend unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE", msg)
            }
            AppError::EditRejected { index, source } => {
                let (status, mut body) = source.status_and_body();
                body.edit_index = Some(index);
                return (status, body);
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".into(),
                )
            }
        };

        (
            status,
            ErrorBody {
                code,
                message,
                edit_index: None,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            StoreError::Unavailable(detail) => AppError::BackendUnavailable(detail),
            StoreError::InvalidPath(name) => {
                AppError::Internal(format!("registry names an invalid data file: {name}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::Validation(msg) => AppError::Validation(msg),
            EditError::NotFound { .. } => AppError::NotFound(err.to_string()),
            EditError::ConfirmationRequired(msg) => AppError::ConfirmationRequired(msg),
        }
    }
}

impl From<BatchRejected> for AppError {
    fn from(err: BatchRejected) -> Self {
        AppError::EditRejected {
            index: err.index,
            source: Box::new(err.error.into()),
        }
    }
}
