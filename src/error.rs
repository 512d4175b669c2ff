use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jwt_auth::error::MissingRoleError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("auth error: {0}")]
    Auth(#[from] MissingRoleError),

    #[error("VAPID keys not configured")]
    VapidNotConfigured,

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    ///
    /// This error should be returned only in situations
    /// that should never occur when system is setup correctly.
    ///
    #[error("unexpected error: {0}")]
    UnexpectedError(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status_code = match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Auth(_) => StatusCode::FORBIDDEN,
            Error::VapidNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
