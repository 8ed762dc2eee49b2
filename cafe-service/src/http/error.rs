use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorKind, ServiceError};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Request => {
                tracing::warn!(error = %self, "rejected request");
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => {
                tracing::warn!(error = %self, "unknown cafe");
                StatusCode::NOT_FOUND
            }
            ErrorKind::Internal => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}
