use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode};

/// Answer `GET <path>` with `ok` before the request reaches the application
///
/// Runs as middleware rather than a route so it cannot collide with the
/// application's own routes.
pub async fn health_middleware(path: &str, request: Request, next: Next) -> Response {
    if request.method() == Method::GET && request.uri().path() == path {
        return (StatusCode::OK, "ok").into_response();
    }

    next.run(request).await
}
