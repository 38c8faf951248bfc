//! Status-coded error taxonomy shared by every Liftoff crate

#![allow(clippy::must_use_candidate)]

mod error;
mod kind;
mod response;
mod service_error;

pub use error::HttpError;
pub use http::StatusCode;
pub use kind::{ErrorFamily, ServiceErrorKind};
pub use response::{ResponseSnapshot, ValidationError, validate};
pub use service_error::ServiceError;
