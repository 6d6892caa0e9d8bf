use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::models::UserId;

pub type AppResult<T> = Result<T, AppError>;

/// Failures of a single publish call.
///
/// Kinds are kept apart so the HTTP layer can tell a lookup miss from a
/// broker failure without inspecting messages.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Sender or recipient id is not in the directory. Nothing was sent.
    #[error("user not found")]
    UserNotFound(UserId),

    #[error("failed to marshal notification: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker rejected the record or did not acknowledge it. The record
    /// may still have been persisted.
    #[error(transparent)]
    Broker(anyhow::Error),
}

/// Error returned from HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    PublishFailure(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PublishFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "bad_request",
            AppError::NotFound => "not_found",
            AppError::PublishFailure(_) => "internal",
        }
    }

    /// Text placed in the `message` field of the response body
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %self.error_code(),
                status = %status.as_u16(),
                "Failed to publish notification"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %self.error_code(),
                status = %status.as_u16(),
                "Rejected notification request"
            );
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::UserNotFound(_) => AppError::NotFound,
            other => AppError::PublishFailure(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        crate::metrics::record_outcome(self.error_code());

        let status = self.status_code();
        (status, Json(json!({ "message": self.user_message() }))).into_response()
    }
}
