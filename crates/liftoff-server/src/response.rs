use axum::Json;
use axum::response::{IntoResponse, Response};
use liftoff_core::HttpError;

/// Error response wrapper that implements `IntoResponse`
///
/// Lets handlers return `Result<_, ErrorResponse<ServiceError>>` and use `?`
/// on any `HttpError`.
#[derive(Debug)]
pub struct ErrorResponse<E>(pub E);

impl<E: HttpError> From<E> for ErrorResponse<E> {
    fn from(e: E) -> Self {
        Self(e)
    }
}

impl<E: HttpError> IntoResponse for ErrorResponse<E> {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self.0, "request failed");
        }

        let body = serde_json::json!({
            "error": {
                "type": self.0.error_type(),
                "message": self.0.client_message(),
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use http::StatusCode;
    use liftoff_core::{ServiceError, ServiceErrorKind};

    use super::*;

    #[tokio::test]
    async fn service_error_becomes_json() {
        let error = ServiceError::with_message(ServiceErrorKind::PreconditionRequired, "send If-Match");

        let response = ErrorResponse::from(error).into_response();

        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "precondition_required");
        assert_eq!(json["error"]["message"], "send If-Match");
    }
}
