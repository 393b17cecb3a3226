use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// HTTP-boundary wrapper around the domain error: picks a status code and
/// serializes the message as `{"error": ...}`.
#[derive(Debug)]
pub struct AppError(mealmind_shared::Error);

impl From<mealmind_shared::Error> for AppError {
    fn from(value: mealmind_shared::Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use mealmind_shared::Error;

        let (status, message) = match &self.0 {
            Error::Validate(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()),
            Error::User(message) => (StatusCode::UNPROCESSABLE_ENTITY, message.to_owned()),
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Error::Server(_) | Error::Unknown(_) => {
                tracing::error!("{}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, AppError>;
