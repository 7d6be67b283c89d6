use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used by every handler and repository method.
pub type ApiResult<T> = Result<T, ApiError>;

/// ApiError
///
/// The three caller-visible failure kinds of the API, plus an internal bucket
/// for database faults. Every error is surfaced to the client as a structured
/// JSON body (`{"success": false, "message": "..."}`) with the matching HTTP
/// status code. Nothing is retried or recovered locally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation failure: bad pagination bounds, taken username, malformed input.
    #[error("{0}")]
    BadRequest(String),

    /// Ownership or role failure, or bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The addressed entity does not exist.
    #[error("{resource} not found with {field}: {value}")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Database or other infrastructure fault. Details are logged, the
    /// client only sees a generic message.
    #[error("internal server error")]
    Internal(#[from] sqlx::Error),
}

impl ApiError {
    /// Shorthand for the standard owner-or-admin rejection message.
    pub fn no_permission() -> Self {
        Self::Unauthorized("You don't have permission to make this operation".to_string())
    }

    /// NotFound constructor for the common by-id lookup case.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            field: "id",
            value: id.to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire format of an error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!("database error: {:?}", e);
        }
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
