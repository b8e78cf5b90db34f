//! The single error boundary of the HTTP API.
//!
//! Every handler returns [`ApiError`] on failure; its `IntoResponse` impl is the
//! only place an error becomes a response. Typed task errors render their kind
//! and message; server-side failures are logged and degraded to a generic 500.

use std::any::Any;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use taskhub_core::TaskError;

const UNKNOWN_MESSAGE: &str = "Something went wrong!";

/// JSON shape of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `"error"`.
    pub status: &'static str,
    /// `ValidationError`, `NotFoundError` or `Unknown`.
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Task(TaskError),
    RouteNotFound { method: Method, path: String },
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        ApiError::Task(err)
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Task(TaskError::validation(message))
    }

    fn unknown() -> (StatusCode, ErrorBody) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                status: "error",
                error: "Unknown",
                message: UNKNOWN_MESSAGE.to_string(),
            },
        )
    }

    fn parts(self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Task(err) if err.is_client_error() => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::BAD_REQUEST);
                (
                    status,
                    ErrorBody {
                        status: "error",
                        error: err.kind(),
                        message: err.to_string(),
                    },
                )
            }
            ApiError::Task(err) => {
                error!(error = %err, "Unhandled task error");
                Self::unknown()
            }
            ApiError::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    status: "error",
                    error: "NotFoundError",
                    message: format!("Route {method} {path} not found."),
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

/// Fallback for requests that match no route.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}

/// Render a handler panic as the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("(non-string panic payload)");
    error!(panic = detail, "Handler panicked");

    let (status, body) = ApiError::unknown();
    (status, Json(body)).into_response()
}
