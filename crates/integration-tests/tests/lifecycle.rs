mod harness;

use std::time::Duration;

use harness::app::{hello, loopback, url};
use liftoff_config::Port;
use liftoff_server::{LifecycleError, LifecycleState, ShutdownReport};

#[tokio::test]
async fn auto_port_becomes_concrete() {
    let config = loopback().build().unwrap();
    assert_eq!(config.port(), Port::Auto);

    let instance = liftoff_server::start(hello(), config).await.unwrap();

    let port = instance.configuration().port();
    assert_eq!(port, Port::Fixed(instance.local_addr().port()));
    assert_ne!(port, Port::Fixed(0));
    assert_eq!(instance.state(), LifecycleState::Running);

    let body = reqwest::get(url(&instance, "/hello")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "hello");

    instance.stop().await;
}

#[tokio::test]
async fn stop_twice_returns_the_same_result() {
    let instance = liftoff_server::start(hello(), loopback().build().unwrap()).await.unwrap();

    let first = instance.stop().await;
    let second = instance.stop().await;

    assert_eq!(instance.state(), LifecycleState::Stopped);
    let first = first.unwrap::<ShutdownReport>().unwrap();
    let second = second.unwrap::<ShutdownReport>().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn stopped_instance_refuses_connections() {
    let instance = liftoff_server::start(hello(), loopback().build().unwrap()).await.unwrap();
    let target = url(&instance, "/hello");

    instance.stop().await;

    assert!(reqwest::get(target).await.is_err());
}

#[tokio::test]
async fn unwrap_exposes_the_native_handle_until_stopped() {
    let instance = liftoff_server::start(hello(), loopback().build().unwrap()).await.unwrap();

    let handle = instance.unwrap::<axum_server::Handle>().unwrap();
    assert_eq!(handle.connection_count(), 0);

    let err = instance.unwrap::<String>().unwrap_err();
    assert!(matches!(err, LifecycleError::UnsupportedCapability { .. }), "{err}");

    instance.stop().await;

    let err = instance.unwrap::<axum_server::Handle>().unwrap_err();
    assert_eq!(
        err,
        LifecycleError::IllegalState {
            operation: "unwrap",
            state: LifecycleState::Stopped,
        }
    );
}

#[tokio::test]
async fn stop_requested_during_startup_is_queued() {
    let starting = liftoff_server::start(hello(), loopback().build().unwrap());
    let stop = starting.stop_handle();

    let stopping = tokio::spawn(stop.stop());
    let instance = starting.await.unwrap();

    let result = stopping.await.unwrap().unwrap();
    assert!(result.unwrap::<ShutdownReport>().is_ok());
    assert_eq!(instance.state(), LifecycleState::Stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_stops_from_other_threads() {
    let instance = liftoff_server::start(hello(), loopback().build().unwrap()).await.unwrap();
    let handle = instance.stop_handle();

    let threads: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            let runtime = tokio::runtime::Handle::current();
            std::thread::spawn(move || runtime.block_on(handle.stop()))
        })
        .collect();

    let reports: Vec<ShutdownReport> = threads
        .into_iter()
        .map(|thread| *thread.join().unwrap().unwrap().unwrap::<ShutdownReport>().unwrap())
        .collect();

    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(handle.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn grace_period_bounds_shutdown() {
    let config = loopback().property("SHUTDOWN_GRACE_PERIOD", "100ms").build().unwrap();
    let instance = liftoff_server::start(hello(), config).await.unwrap();
    assert_eq!(
        instance.configuration().shutdown_grace_period(),
        Some(Duration::from_millis(100))
    );

    let result = tokio::time::timeout(Duration::from_secs(5), instance.stop()).await.unwrap();

    assert!(result.has_native());
}
