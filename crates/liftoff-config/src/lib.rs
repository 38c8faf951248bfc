//! Resolution of the effective runtime configuration
//!
//! Three layers are merged when `ConfigurationBuilder::build` runs, lowest
//! precedence first: built-in defaults, an optional `PropertySource`, and
//! explicit setter calls.

#![allow(clippy::must_use_candidate)]

mod builder;
mod configuration;
mod env;
mod error;
mod file;
mod option;
mod source;
mod values;

pub use builder::ConfigurationBuilder;
pub use configuration::{Configuration, TlsPaths};
pub use error::ConfigurationError;
pub use file::FilePropertySource;
pub use option::ConfigOption;
pub use source::{Chain, EnvPropertySource, MapPropertySource, PropertySource, chain};
pub use values::{Port, Protocol};
