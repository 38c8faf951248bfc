//! Asynchronous bootstrap and lifecycle control for a served application
//!
//! `start` hands an `Application` and a resolved `Configuration` to a
//! background task and returns a `Starting` future. Once the listener
//! accepts connections the future yields a `RuntimeInstance`, which reports
//! the configuration it actually bound and can be stopped from any task.

#![allow(clippy::must_use_candidate)]

mod application;
mod bootstrap;
mod error;
mod health;
mod instance;
mod lifecycle;
mod response;
mod router;
mod stop;

pub use application::Application;
pub use bootstrap::{Starting, start};
pub use error::{LifecycleError, StartupError};
pub use instance::RuntimeInstance;
pub use lifecycle::LifecycleState;
pub use response::ErrorResponse;
pub use stop::{ShutdownReport, StopHandle, StopResult};
