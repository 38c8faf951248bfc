use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use std::time::{Duration, Instant};

use axum_server::tls_rustls::RustlsConfig;
use liftoff_config::{Configuration, Protocol, TlsPaths};
use tokio::task::JoinHandle;

use crate::lifecycle::Lifecycle;
use crate::{Application, LifecycleState, RuntimeInstance, ShutdownReport, StartupError, StopHandle, StopResult, router};

/// Start serving `application` with `configuration`
///
/// Returns immediately; startup runs on a spawned tokio task. Await the
/// returned `Starting` for the `RuntimeInstance`. Dropping it does not
/// cancel startup.
pub fn start<A: Application>(application: A, configuration: Configuration) -> Starting {
    let lifecycle = Arc::new(Lifecycle::new());

    let task = match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            lifecycle.transition(LifecycleState::Starting);
            Some(runtime.spawn(launch(application, configuration, Arc::clone(&lifecycle))))
        }
        Err(_) => {
            lifecycle.transition(LifecycleState::Failed);
            None
        }
    };

    Starting { lifecycle, task }
}

/// Pending startup, resolving to the running instance
#[must_use = "startup continues in the background, but its outcome is only observable by awaiting"]
pub struct Starting {
    lifecycle: Arc<Lifecycle>,
    task: Option<JoinHandle<Result<RuntimeInstance, StartupError>>>,
}

impl Starting {
    /// Handle that can stop the instance before startup has completed
    ///
    /// A stop requested now is queued until the instance is running.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(Arc::clone(&self.lifecycle))
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }
}

impl Future for Starting {
    type Output = Result<RuntimeInstance, StartupError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(task) = self.task.as_mut() else {
            return Poll::Ready(Err(StartupError::NoRuntime));
        };

        match ready!(Pin::new(task).poll(cx)) {
            Ok(result) => Poll::Ready(result),
            Err(e) => {
                self.lifecycle.transition(LifecycleState::Failed);
                Poll::Ready(Err(StartupError::Aborted(e)))
            }
        }
    }
}

async fn launch<A: Application>(
    application: A,
    configuration: Configuration,
    lifecycle: Arc<Lifecycle>,
) -> Result<RuntimeInstance, StartupError> {
    let name = application.name().to_owned();
    tracing::info!(
        application = %name,
        protocol = %configuration.protocol(),
        host = %configuration.host(),
        port = %configuration.port(),
        root_path = %configuration.root_path(),
        "starting"
    );

    match serve(application, configuration, &lifecycle).await {
        Ok(instance) => Ok(instance),
        Err(e) => {
            tracing::error!(application = %name, error = %e, "startup failed");
            lifecycle.transition(LifecycleState::Failed);
            Err(e)
        }
    }
}

/// Bind, hand the listener to the native server and wait until it accepts
async fn serve<A: Application>(
    application: A,
    requested: Configuration,
    lifecycle: &Arc<Lifecycle>,
) -> Result<RuntimeInstance, StartupError> {
    let name = application.name().to_owned();
    let app = application
        .into_router()
        .map_err(|source| StartupError::Application { name, source })?;
    let app = router::assemble(app, &requested);

    let tls = match (requested.protocol(), requested.tls()) {
        (Protocol::Https, Some(paths)) => Some(load_tls(paths).await?),
        _ => None,
    };

    let host = requested.host();
    let port = requested.port().bind_port();
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|source| StartupError::Bind {
            address: format!("{host}:{port}"),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(StartupError::Runtime)?;
    let listener = listener.into_std().map_err(StartupError::Runtime)?;

    let handle = axum_server::Handle::new();
    let service = app.into_make_service();
    let server = match tls {
        Some(tls) => tokio::spawn(
            axum_server::from_tcp_rustls(listener, tls)
                .handle(handle.clone())
                .serve(service),
        ),
        None => tokio::spawn(axum_server::from_tcp(listener).handle(handle.clone()).serve(service)),
    };

    if handle.listening().await.is_none() {
        let error = match server.await {
            Ok(Err(e)) => e,
            Ok(Ok(())) => io::Error::other("server exited before accepting connections"),
            Err(e) => io::Error::other(e),
        };
        return Err(StartupError::Runtime(error));
    }

    let configuration = requested.with_port(local_addr.port());
    tracing::info!(%local_addr, url = %display_url(&configuration), "listening");

    lifecycle.transition(LifecycleState::Running);
    tokio::spawn(supervise(
        server,
        handle.clone(),
        Arc::clone(lifecycle),
        configuration.shutdown_grace_period(),
    ));

    Ok(RuntimeInstance::new(configuration, local_addr, handle, Arc::clone(lifecycle)))
}

async fn load_tls(paths: &TlsPaths) -> Result<RustlsConfig, StartupError> {
    // Several rustls providers may be compiled in; pin the one axum-server expects
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    RustlsConfig::from_pem_file(paths.certificate(), paths.private_key())
        .await
        .map_err(StartupError::Tls)
}

/// Own the server task until it ends, then record the stop result
///
/// The only place the native handle is shut down, so concurrent stop
/// requests collapse into a single shutdown.
async fn supervise(
    mut server: JoinHandle<io::Result<()>>,
    handle: axum_server::Handle,
    lifecycle: Arc<Lifecycle>,
    grace_period: Option<Duration>,
) {
    let started = Instant::now();

    let (joined, open_connections) = tokio::select! {
        () = lifecycle.stop_requested() => {
            lifecycle.transition(LifecycleState::Stopping);
            let open_connections = handle.connection_count();
            handle.graceful_shutdown(grace_period);
            ((&mut server).await, open_connections)
        }
        joined = &mut server => {
            lifecycle.transition(LifecycleState::Stopping);
            (joined, 0)
        }
    };

    let report = match joined {
        Ok(Ok(())) => Some(ShutdownReport {
            uptime: started.elapsed(),
            open_connections,
        }),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "server terminated with an error");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "server task aborted");
            None
        }
    };

    lifecycle.finish(StopResult::new(report));
    tracing::info!(uptime = ?started.elapsed(), "stopped");
}

fn display_url(configuration: &Configuration) -> String {
    configuration
        .base_url()
        .map_or_else(|_| configuration.host().to_owned(), |url| url.to_string())
}
