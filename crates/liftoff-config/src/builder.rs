use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::configuration::{Configuration, TlsPaths};
use crate::{ConfigOption, ConfigurationError, Port, PropertySource, Protocol};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_ROOT_PATH: &str = "/";

/// Accumulates explicit settings and an optional property source
///
/// Nothing is resolved until `build()`, which merges, lowest precedence
/// first, the built-in defaults, the property source and the explicit
/// settings. `build()` only reads the builder, so calling it twice yields
/// the same `Configuration`.
#[derive(Clone, Default)]
pub struct ConfigurationBuilder {
    source: Option<Arc<dyn PropertySource>>,
    explicit: BTreeMap<String, String>,
}

impl fmt::Debug for ConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationBuilder")
            .field("source", &self.source.as_ref().map(|_| ".."))
            .field("explicit", &self.explicit)
            .finish()
    }
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `source` for every recognized option not set explicitly
    ///
    /// Replaces any previously registered source. The source is called during
    /// `build()`, at most once per option.
    #[must_use]
    pub fn from_property_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    #[must_use]
    pub fn protocol(self, protocol: Protocol) -> Self {
        self.set(ConfigOption::Protocol, protocol.as_str())
    }

    #[must_use]
    pub fn host(self, host: impl Into<String>) -> Self {
        self.set(ConfigOption::Host, host)
    }

    #[must_use]
    pub fn port(self, port: impl Into<Port>) -> Self {
        self.set(ConfigOption::Port, port.into().to_string())
    }

    #[must_use]
    pub fn root_path(self, root_path: impl Into<String>) -> Self {
        self.set(ConfigOption::RootPath, root_path)
    }

    /// Set any property by name
    ///
    /// Recognized option names (`PORT`, `TLS_CERTIFICATE`, ...) behave like
    /// the dedicated setters and are coerced during `build()`. Other names
    /// are carried verbatim into `Configuration::properties`.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.explicit.insert(name.into(), value.into());
        self
    }

    fn set(self, option: ConfigOption, value: impl Into<String>) -> Self {
        self.property(option.name(), value)
    }

    /// Resolve one option: explicit setting, then property source
    fn resolve(&self, option: ConfigOption) -> Option<String> {
        if let Some(value) = self.explicit.get(option.name()) {
            return Some(value.clone());
        }
        self.source.as_ref().and_then(|source| source.lookup(option.name()))
    }

    /// Resolve every option into an immutable `Configuration`
    ///
    /// Options are resolved in `ConfigOption::ALL` order: protocol, host,
    /// port, root path, then the implementation-specific options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if a resolved value cannot
    /// be coerced, or `ConfigurationError::MissingTls` if HTTPS lacks
    /// certificate and key paths
    pub fn build(&self) -> Result<Configuration, ConfigurationError> {
        let mut config = Configuration {
            protocol: Protocol::default(),
            host: DEFAULT_HOST.to_owned(),
            port: Port::default(),
            root_path: DEFAULT_ROOT_PATH.to_owned(),
            tls: None,
            shutdown_grace_period: None,
            health_path: None,
            properties: BTreeMap::new(),
        };
        let mut certificate = None;
        let mut private_key = None;

        for option in ConfigOption::ALL {
            let Some(value) = self.resolve(option) else {
                continue;
            };

            match option {
                ConfigOption::Protocol => {
                    config.protocol = value
                        .parse()
                        .map_err(|reason: String| ConfigurationError::invalid(option, &value, reason))?;
                }
                ConfigOption::Host => config.host = parse_host(&value)?,
                ConfigOption::Port => {
                    config.port = value
                        .parse()
                        .map_err(|reason: String| ConfigurationError::invalid(option, &value, reason))?;
                }
                ConfigOption::RootPath => config.root_path = parse_path(option, &value)?,
                ConfigOption::TlsCertificate => certificate = Some(value.clone()),
                ConfigOption::TlsPrivateKey => private_key = Some(value.clone()),
                ConfigOption::ShutdownGracePeriod => {
                    config.shutdown_grace_period = Some(parse_duration(option, &value)?);
                }
                ConfigOption::HealthPath => config.health_path = Some(parse_path(option, &value)?),
            }

            if !option.is_core() {
                config.set_property(option, &value);
            }
        }

        for (name, value) in &self.explicit {
            if ConfigOption::from_name(name).is_none() {
                config.properties.insert(name.clone(), value.clone());
            }
        }

        config.tls = match (certificate, private_key) {
            (Some(certificate), Some(private_key)) => Some(TlsPaths {
                certificate: certificate.into(),
                private_key: private_key.into(),
            }),
            _ => None,
        };
        if config.protocol == Protocol::Https && config.tls.is_none() {
            return Err(ConfigurationError::MissingTls);
        }

        tracing::debug!(
            protocol = %config.protocol,
            host = %config.host,
            port = %config.port,
            root_path = %config.root_path,
            "resolved configuration"
        );

        Ok(config)
    }
}

fn parse_host(value: &str) -> Result<String, ConfigurationError> {
    let host = value.trim();
    if host.is_empty() {
        return Err(ConfigurationError::invalid(ConfigOption::Host, value, "host must not be empty"));
    }
    Ok(host.to_owned())
}

/// Accept absolute paths that can be mounted as a literal route prefix
fn parse_path(option: ConfigOption, value: &str) -> Result<String, ConfigurationError> {
    if !value.starts_with('/') {
        return Err(ConfigurationError::invalid(option, value, "path must start with '/'"));
    }
    if value.contains(['{', '}']) || value.split('/').any(|segment| segment.starts_with([':', '*'])) {
        return Err(ConfigurationError::invalid(option, value, "path must not contain route parameters"));
    }
    Ok(value.to_owned())
}

fn parse_duration(option: ConfigOption, value: &str) -> Result<Duration, ConfigurationError> {
    duration_str::parse(value).map_err(|e| ConfigurationError::invalid(option, value, format!("invalid duration: {e}")))
}
