//! HTTP error response mapping.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roomhub_domain::error::RoomHubError;

/// JSON error body returned by API endpoints.
///
/// Validation failures also list every offending field under `fields`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl ErrorBody {
    fn new(error: String) -> Self {
        Self {
            error,
            fields: None,
        }
    }
}

/// Maps [`RoomHubError`] and request body rejections to an HTTP response
/// with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    Domain(RoomHubError),
    /// The body was not the JSON the handler expects.
    Body(JsonRejection),
}

impl From<RoomHubError> for ApiError {
    fn from(err: RoomHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

fn internal() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("internal server error".to_string()),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Domain(err) => err,
            Self::Body(rejection) => {
                let body = ErrorBody::new(rejection.body_text());
                return (rejection.status(), Json(body)).into_response();
            }
        };

        let (status, body) = match &err {
            RoomHubError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    fields: Some(err.by_field()),
                },
            ),
            RoomHubError::Parse(err) => (StatusCode::BAD_REQUEST, ErrorBody::new(err.to_string())),
            RoomHubError::NotFound(err) => (StatusCode::NOT_FOUND, ErrorBody::new(err.to_string())),
            RoomHubError::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, ErrorBody::new(err.to_string()))
            }
            RoomHubError::PermissionDenied => {
                (StatusCode::FORBIDDEN, ErrorBody::new(err.to_string()))
            }
            RoomHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                internal()
            }
            RoomHubError::Credential(err) => {
                tracing::error!(error = %err, "could not issue API token");
                internal()
            }
        };

        (status, Json(body)).into_response()
    }
}
