use std::any::{Any, type_name};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::LifecycleError;
use crate::LifecycleState;
use crate::lifecycle::Lifecycle;

/// What the native runtime reports once it has shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Time between accepting connections and finishing shutdown
    pub uptime: Duration,
    /// Connections still open when the stop was requested
    pub open_connections: usize,
}

/// Outcome of stopping an instance
///
/// Every caller of `stop` on the same instance receives a clone of the same
/// result.
#[derive(Clone, Default)]
pub struct StopResult {
    native: Option<Arc<dyn Any + Send + Sync>>,
    native_type: &'static str,
}

impl StopResult {
    pub(crate) fn new<T: Any + Send + Sync>(native: Option<T>) -> Self {
        match native {
            Some(native) => Self {
                native: Some(Arc::new(native)),
                native_type: type_name::<T>(),
            },
            None => Self::default(),
        }
    }

    /// Whether the runtime produced a native result
    pub const fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// The native result as `T`
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnsupportedCapability` if there is no native
    /// result or it is not a `T`
    pub fn unwrap<T: Any>(&self) -> Result<&T, LifecycleError> {
        self.native
            .as_deref()
            .and_then(|native| (native as &dyn Any).downcast_ref::<T>())
            .ok_or(LifecycleError::UnsupportedCapability {
                requested: type_name::<T>(),
                actual: if self.native.is_some() { self.native_type } else { "nothing" },
            })
    }
}

impl fmt::Debug for StopResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.native {
            Some(_) => f.debug_struct("StopResult").field("native", &self.native_type).finish(),
            None => f.debug_struct("StopResult").field("native", &"nothing").finish(),
        }
    }
}

/// Cloneable, thread-safe handle that stops an instance
///
/// Obtainable before startup completes; a stop requested while the instance
/// is still starting is carried out as soon as it is running.
#[derive(Clone)]
pub struct StopHandle {
    lifecycle: Arc<Lifecycle>,
}

impl StopHandle {
    pub(crate) const fn new(lifecycle: Arc<Lifecycle>) -> Self {
        Self { lifecycle }
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Request a stop and wait for it to complete
    ///
    /// The request is registered immediately, whether or not the returned
    /// future is polled. Concurrent and repeated calls share one shutdown.
    ///
    /// # Errors
    ///
    /// The future fails with `LifecycleError::IllegalState` if startup failed,
    /// since there is no instance to stop
    pub fn stop(&self) -> impl Future<Output = Result<StopResult, LifecycleError>> + Send + 'static + use<> {
        self.lifecycle.request_stop();
        let lifecycle = Arc::clone(&self.lifecycle);
        async move { lifecycle.stopped().await }
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopHandle").field("state", &self.state()).finish()
    }
}
