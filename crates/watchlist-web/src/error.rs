//! Request Errors
//!
//! Every handler failure becomes an `AppError`, which maps onto an HTTP
//! status. The rendered error page is produced later by the
//! `render_error_pages` middleware, which has access to the views.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};
use watchlist_models::ModelError;
use watchlist_sources::ClientError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad user input, rejected before any remote call
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    /// A write carried a stale revision
    #[error("{0}")]
    Conflict(String),

    /// The metadata API or the store failed or answered with an error
    #[error("{0}")]
    Upstream(String),

    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        if err.is_conflict() {
            AppError::Conflict(format!("{}; reload the list and try again", err))
        } else if err.is_not_found() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

// Extractor rejections go through the same error page as handler failures

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            // A detail response without a title is the upstream's fault, not the user's
            ModelError::MissingField { .. } => AppError::Upstream(err.to_string()),
            other => AppError::InvalidArgument(other.to_string()),
        }
    }
}

/// Marker left in response extensions so the error page middleware can
/// replace the plain-text body with a rendered page.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(operation = "request_failed", status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(operation = "request_rejected", status = status.as_u16(), error = %self, "Request rejected");
        }

        let message = self.to_string();
        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage { message });
        response
    }
}
