use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success { data: T, error: Option<()> },
    Error { data: Option<()>, error: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data, error: None }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            data: None,
            error: error.into(),
        }
    }
}

// Type-safe wrapper for axum responses that enforces our API response format
pub struct ApiResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self(StatusCode::OK, ApiResponse::success(data))
    }

    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self(status, ApiResponse::error(error))
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        (self.0, axum::Json(self.1)).into_response()
    }
}
