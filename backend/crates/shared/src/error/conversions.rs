//! Error conversions
//!
//! Renders [`AppError`] as the JSON failure envelope shared by all endpoints:
//! `{ "success": false, "error_message": "..." }`.

use super::app_error::AppError;

impl AppError {
    /// Failure envelope body
    pub fn envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error_message": self.message(),
        })
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_envelope_shape() {
        let body = AppError::new(ErrorKind::BadRequest, "Please fill in all fields.").envelope();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_message"], "Please fill in all fields.");
        assert!(body.get("redirect").is_none());
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::new(ErrorKind::Forbidden, "Invalid CSRF token.").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);

        let response = AppError::new(ErrorKind::InternalServerError, "boom").into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
