mod harness;

use std::error::Error as _;

use harness::app::{Broken, free_port, hello, loopback};
use liftoff_config::Port;
use liftoff_server::{LifecycleError, LifecycleState, StartupError};

#[tokio::test]
async fn port_in_use_fails_with_bind_error() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();
    let config = loopback().port(port).build().unwrap();

    let err = liftoff_server::start(hello(), config).await.unwrap_err();

    let StartupError::Bind { ref address, ref source } = err else {
        panic!("expected a bind error, got {err}");
    };
    assert_eq!(address, &format!("127.0.0.1:{port}"));
    assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
    assert!(err.source().is_some());
}

#[tokio::test]
async fn fixed_port_is_reported_exactly() {
    let port = free_port();
    let config = loopback().port(port).build().unwrap();

    let instance = liftoff_server::start(hello(), config).await.unwrap();

    assert_eq!(instance.configuration().port(), Port::Fixed(port));
    assert_eq!(instance.configuration().host(), "127.0.0.1");
    instance.stop().await;
}

#[tokio::test]
async fn invalid_application_fails_startup() {
    let starting = liftoff_server::start(Broken, loopback().build().unwrap());
    let stop = starting.stop_handle();

    let err = starting.await.unwrap_err();

    assert!(matches!(err, StartupError::Application { ref name, .. } if name == "broken"), "{err}");
    assert!(err.to_string().contains("no routes declared"));
    assert_eq!(stop.state(), LifecycleState::Failed);
}

#[tokio::test]
async fn stop_after_failed_startup_is_illegal() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();
    let starting = liftoff_server::start(hello(), loopback().port(port).build().unwrap());
    let stop = starting.stop_handle();

    assert!(starting.await.is_err());

    let err = stop.stop().await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::IllegalState {
            operation: "stop",
            state: LifecycleState::Failed,
        }
    );
}

#[test]
fn start_outside_a_runtime_fails() {
    let starting = liftoff_server::start(hello(), loopback().build().unwrap());
    assert_eq!(starting.state(), LifecycleState::Failed);

    let err = futures::executor::block_on(starting).unwrap_err();

    assert!(matches!(err, StartupError::NoRuntime));
}

#[tokio::test]
async fn missing_tls_material_fails_startup() {
    let config = loopback()
        .protocol(liftoff_config::Protocol::Https)
        .property("TLS_CERTIFICATE", "/nonexistent/cert.pem")
        .property("TLS_PRIVATE_KEY", "/nonexistent/key.pem")
        .build()
        .unwrap();

    let err = liftoff_server::start(hello(), config).await.unwrap_err();

    assert!(matches!(err, StartupError::Tls(_)), "{err}");
}

#[test]
fn route_parameter_root_path_is_rejected_before_startup() {
    let err = loopback().root_path("/:tenant").build().unwrap_err();

    assert!(
        matches!(
            err,
            liftoff_config::ConfigurationError::InvalidValue {
                option: liftoff_config::ConfigOption::RootPath,
                ..
            }
        ),
        "{err}"
    );
}
