#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use liftoff_config::{Configuration, EnvPropertySource, FilePropertySource, chain};
use liftoff_core::{ServiceError, ServiceErrorKind};
use liftoff_server::{ErrorResponse, ShutdownReport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    liftoff_telemetry::init(args.log_format, &args.log_filter)?;

    let configuration = resolve_configuration(&args)?;

    let instance = liftoff_server::start(application(), configuration).await?;

    let actual = instance.configuration();
    let connections = instance.unwrap::<axum_server::Handle>()?.connection_count();
    tracing::info!(
        url = %actual.base_url()?,
        local_addr = %instance.local_addr(),
        connections,
        "instance running, send SIGINT or SIGTERM to stop"
    );

    // Stop from the signal task; the instance itself stays on this one
    let stop = instance.stop_handle();
    let stopping = tokio::spawn(async move {
        shutdown_signal().await;
        stop.stop().await
    });

    let stop_result = stopping.await??;
    match stop_result.unwrap::<ShutdownReport>() {
        Ok(report) => tracing::info!(
            uptime = ?report.uptime,
            open_connections = report.open_connections,
            "liftoff stopped"
        ),
        Err(e) => tracing::warn!(error = %e, "liftoff stopped without a native result"),
    }

    Ok(())
}

/// Environment first, then the optional property file; flags are explicit
fn resolve_configuration(args: &Args) -> anyhow::Result<Configuration> {
    let file = args.config.as_deref().map(FilePropertySource::load).transpose()?;
    let source = chain(EnvPropertySource::with_prefix(args.env_prefix.clone()), file);

    let mut builder = Configuration::builder().from_property_source(source);
    if let Some(protocol) = args.protocol {
        builder = builder.protocol(protocol);
    }

    Ok(builder.build()?)
}

fn application() -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, world!" }))
        .route("/upstream", get(upstream))
}

/// Demonstrates a status-bound error reaching the client
async fn upstream() -> Result<&'static str, ErrorResponse<ServiceError>> {
    Err(ServiceError::with_message(ServiceErrorKind::GatewayTimeout, "upstream did not answer in time").into())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
