use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::{discovery::Outcome, error::Error};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);

        let body = match &self {
            Error::Config(msg) => json!({ "error": msg }),
            other => json!({ "success": false, "error": other.to_string() }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<T: serde::Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Found(body) => Json(body).into_response(),
            Outcome::NotFound { message } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "success": false, "message": message })),
            )
                .into_response(),
        }
    }
}
