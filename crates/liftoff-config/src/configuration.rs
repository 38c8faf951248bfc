use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::{ConfigOption, ConfigurationBuilder, Port, Protocol};

/// Certificate chain and private key for HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub(crate) certificate: PathBuf,
    pub(crate) private_key: PathBuf,
}

impl TlsPaths {
    pub fn certificate(&self) -> &Path {
        &self.certificate
    }

    pub fn private_key(&self) -> &Path {
        &self.private_key
    }
}

/// Immutable, resolved startup parameters
///
/// Only produced by `ConfigurationBuilder::build`; safe to share between
/// threads without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) protocol: Protocol,
    pub(crate) host: String,
    pub(crate) port: Port,
    pub(crate) root_path: String,
    pub(crate) tls: Option<TlsPaths>,
    pub(crate) shutdown_grace_period: Option<Duration>,
    pub(crate) health_path: Option<String>,
    pub(crate) properties: BTreeMap<String, String>,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub const fn tls(&self) -> Option<&TlsPaths> {
        self.tls.as_ref()
    }

    /// How long a stop waits for open connections; `None` waits for all of them
    pub const fn shutdown_grace_period(&self) -> Option<Duration> {
        self.shutdown_grace_period
    }

    pub fn health_path(&self) -> Option<&str> {
        self.health_path.as_deref()
    }

    /// Implementation-specific property by name
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// All implementation-specific properties, including unrecognized ones
    /// set explicitly on the builder
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// URL the instance is reachable at, e.g. `https://127.0.0.1:8443/api`
    ///
    /// An automatically selected port is left out until it is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not valid in a URL
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let authority = match self.port {
            Port::Auto => host,
            Port::Fixed(port) => format!("{host}:{port}"),
        };
        Url::parse(&format!("{}://{authority}{}", self.protocol.scheme(), self.root_path))
    }

    /// Builder seeded with every resolved value as an explicit setting
    pub fn to_builder(&self) -> ConfigurationBuilder {
        let mut builder = ConfigurationBuilder::new()
            .protocol(self.protocol)
            .host(self.host.clone())
            .port(self.port)
            .root_path(self.root_path.clone());
        for (name, value) in &self.properties {
            builder = builder.property(name.clone(), value.clone());
        }
        builder
    }

    /// The same configuration bound to a concrete port
    #[must_use]
    pub fn with_port(self, port: u16) -> Self {
        Self {
            port: Port::Fixed(port),
            ..self
        }
    }

    pub(crate) fn set_property(&mut self, option: ConfigOption, value: &str) {
        self.properties.insert(option.name().to_owned(), value.to_owned());
    }
}
