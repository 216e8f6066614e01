use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nr_core::Error;
use serde_json::json;

/// Maps pipeline and storage failures onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::EmptyQuery => StatusCode::BAD_REQUEST,
            Error::NoArticles => StatusCode::NOT_FOUND,
            e if e.is_provider() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("⚠️ Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
