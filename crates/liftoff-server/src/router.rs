use axum::Router;
use liftoff_config::Configuration;
use tower_http::trace::TraceLayer;

use crate::health;

/// Wrap the application router according to `config`
///
/// Mounts it under the root path, adds the health check and request tracing.
pub fn assemble(application: Router, config: &Configuration) -> Router {
    let root = config.root_path().trim_end_matches('/');
    let mut app = if root.is_empty() {
        application
    } else {
        Router::new().nest(root, application)
    };

    if let Some(path) = config.health_path() {
        let path = path.to_owned();
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let path = path.clone();
            async move { health::health_middleware(&path, req, next).await }
        }));
    }

    app.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::routing::get;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn hello() -> Router {
        Router::new().route("/hello", get(|| async { "hello" }))
    }

    async fn status(app: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn root_path_prefixes_routes() {
        let config = Configuration::builder().root_path("/api/").build().unwrap();
        let app = assemble(hello(), &config);

        assert_eq!(status(app.clone(), "/api/hello").await, StatusCode::OK);
        assert_eq!(status(app, "/hello").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn default_root_serves_routes_unchanged() {
        let config = Configuration::builder().build().unwrap();
        let app = assemble(hello(), &config);

        assert_eq!(status(app.clone(), "/hello").await, StatusCode::OK);
        assert_eq!(status(app, "/health").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_path_is_answered_outside_root() {
        let config = Configuration::builder()
            .root_path("/api")
            .property("HEALTH_PATH", "/healthz")
            .build()
            .unwrap();
        let app = assemble(hello(), &config);

        assert_eq!(status(app.clone(), "/healthz").await, StatusCode::OK);
        assert_eq!(status(app, "/api/hello").await, StatusCode::OK);
    }
}
