//! Error taxonomy and HTTP mapping
//!
//! Client-caused conditions (missing input, unknown id, expired link) map to
//! 4xx responses with the exact error messages the web client expects;
//! storage and notification failures are logged server-side and surface as
//! opaque 5xx responses.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::notify::NotifyError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Resolve called without a link id
    #[error("link ID is required")]
    MissingLinkId,

    /// Submission missing its link id or a non-empty parts list
    #[error("link ID and parts data are required")]
    MissingSubmissionFields,

    /// Notification dispatch requested without a recipient
    #[error("email recipient is required")]
    MissingRecipient,

    /// No document exists for the requested link id
    #[error("link not found")]
    LinkNotFound,

    /// The link exists but its deadline has passed
    #[error("link has expired")]
    LinkExpired,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Notification(#[from] NotifyError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::MissingLinkId => (StatusCode::BAD_REQUEST, "Link ID is required"),
            AppError::MissingSubmissionFields => (
                StatusCode::BAD_REQUEST,
                "Link ID and parts data are required",
            ),
            AppError::MissingRecipient => {
                (StatusCode::BAD_REQUEST, "Email recipient is required")
            }
            AppError::LinkNotFound => (StatusCode::NOT_FOUND, "Link not found"),
            AppError::LinkExpired => (StatusCode::GONE, "Link has expired"),
            AppError::Storage(err) => {
                error!("storage error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Notification(err) => {
                error!("notification error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
