//! JSON error responses: `{ "message": ..., "error"?: ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::route_finder::RouteFinderError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.error = if error.is_empty() { None } else { Some(error) };
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "message": self.message });
        if let Some(error) = self.error {
            body["error"] = json!(error);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<RouteFinderError> for ApiError {
    fn from(err: RouteFinderError) -> Self {
        match err {
            RouteFinderError::NoRoutes => ApiError::not_found(err.to_string()),
            _ => ApiError::internal(err.to_string()).with_error(err.detail()),
        }
    }
}
