use thiserror::Error;

use crate::LifecycleState;

/// Failure of the `Starting` future
#[derive(Debug, Error)]
pub enum StartupError {
    /// `start` was called outside a tokio runtime
    #[error("no tokio runtime is available to start the instance")]
    NoRuntime,

    /// The application could not produce its router
    #[error("invalid application '{name}': {source}")]
    Application {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Certificate or key could not be loaded
    #[error("failed to load TLS material: {0}")]
    Tls(#[source] std::io::Error),

    /// The configured host and port could not be bound
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The native runtime failed before it accepted connections
    #[error("native runtime failed: {0}")]
    Runtime(#[source] std::io::Error),

    /// The startup task panicked or was cancelled with its runtime
    #[error("startup task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Misuse of a running or finished instance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The requested native type is not the one the runtime provides
    #[error("requested native type {requested} but the runtime provides {actual}")]
    UnsupportedCapability {
        requested: &'static str,
        actual: &'static str,
    },

    /// The operation cannot run, or be queued, in the current state
    #[error("cannot {operation} an instance that is {state}")]
    IllegalState {
        operation: &'static str,
        state: LifecycleState,
    },
}
