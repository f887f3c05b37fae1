//! Maps lookup errors to HTTP responses with a structured error body.

use crate::utils::error::{CepError, ErrorCategory};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl ErrorCategory {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            // unreachable upstream, or upstream data the service cannot represent
            ErrorCategory::Upstream | ErrorCategory::Mapping => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CepError {
    fn into_response(self) -> Response {
        let category = self.category();
        let status = category.status_code();

        if status.is_server_error() {
            tracing::error!(kind = category.as_str(), "Request failed: {}", self);
        } else {
            tracing::debug!(kind = category.as_str(), "Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "kind": category.as_str(),
                "message": self.user_friendly_message(),
            }
        });
        (status, Json(body)).into_response()
    }
}
