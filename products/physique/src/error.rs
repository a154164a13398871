use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    meshgen::GenerateError,
    serde_json::json,
    std::fmt,
};

/// An HTTP error answered with `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        if err.is_client_error() {
            ApiError::bad_request(err.detail())
        } else {
            ApiError::internal(err.detail())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
