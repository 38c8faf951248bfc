//! Test applications and configuration helpers

use axum::Router;
use axum::routing::get;
use liftoff_config::{Configuration, ConfigurationBuilder};
use liftoff_core::{ServiceError, ServiceErrorKind};
use liftoff_server::{Application, ErrorResponse, RuntimeInstance};

/// Router with a greeting and a route that always times out upstream
pub fn hello() -> Router {
    Router::new()
        .route("/hello", get(|| async { "hello" }))
        .route("/timeout", get(timeout))
}

async fn timeout() -> Result<&'static str, ErrorResponse<ServiceError>> {
    Err(ServiceError::with_message(ServiceErrorKind::GatewayTimeout, "upstream stalled").into())
}

/// Application whose definition is rejected at startup
pub struct Broken;

impl Application for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn into_router(self) -> anyhow::Result<Router> {
        anyhow::bail!("no routes declared")
    }
}

/// Builder bound to the IPv4 loopback on an automatic port
pub fn loopback() -> ConfigurationBuilder {
    Configuration::builder().host("127.0.0.1")
}

/// Absolute URL of `path` under the instance's root path
pub fn url(instance: &RuntimeInstance, path: &str) -> String {
    let base = instance.configuration().base_url().unwrap();
    format!("{}{path}", base.as_str().trim_end_matches('/'))
}

/// A port that was free a moment ago
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
