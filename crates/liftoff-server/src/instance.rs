use std::any::{Any, type_name};
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use liftoff_config::Configuration;

use crate::lifecycle::Lifecycle;
use crate::{LifecycleError, LifecycleState, StopHandle, StopResult};

/// Native handle type exposed through `RuntimeInstance::unwrap`
type NativeHandle = axum_server::Handle;

/// A started application
///
/// Owns the native server handle exclusively. Dropping the instance does not
/// stop the server; call `stop`, or keep a `StopHandle`.
pub struct RuntimeInstance {
    configuration: Configuration,
    local_addr: SocketAddr,
    native: NativeHandle,
    lifecycle: Arc<Lifecycle>,
}

impl RuntimeInstance {
    pub(crate) const fn new(
        configuration: Configuration,
        local_addr: SocketAddr,
        native: NativeHandle,
        lifecycle: Arc<Lifecycle>,
    ) -> Self {
        Self {
            configuration,
            local_addr,
            native,
            lifecycle,
        }
    }

    /// The configuration actually in effect, with the bound port filled in
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// The native handle as `T`
    ///
    /// The runtime provides an `axum_server::Handle`.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnsupportedCapability` if `T` is not the
    /// native handle type, or `LifecycleError::IllegalState` once the
    /// instance has stopped and released its handle
    pub fn unwrap<T: Any>(&self) -> Result<&T, LifecycleError> {
        let state = self.state();
        if state.is_terminal() {
            return Err(LifecycleError::IllegalState {
                operation: "unwrap",
                state,
            });
        }
        (&self.native as &dyn Any)
            .downcast_ref::<T>()
            .ok_or(LifecycleError::UnsupportedCapability {
                requested: type_name::<T>(),
                actual: type_name::<NativeHandle>(),
            })
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(Arc::clone(&self.lifecycle))
    }

    /// Stop serving and release the native handle
    ///
    /// Safe to call repeatedly and from any task or thread; every call
    /// resolves to the result of the one shutdown.
    pub fn stop(&self) -> impl Future<Output = StopResult> + Send + 'static + use<> {
        let stopping = self.stop_handle().stop();
        async move {
            // An instance only exists once running, so its lifecycle can only end in `Stopped`
            stopping.await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "instance did not reach the stopped state");
                StopResult::default()
            })
        }
    }
}

impl fmt::Debug for RuntimeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeInstance")
            .field("local_addr", &self.local_addr)
            .field("state", &self.state())
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}
