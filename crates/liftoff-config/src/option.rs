use std::fmt;

/// Options the builder resolves, listed in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    /// `PROTOCOL`: `HTTP` or `HTTPS`
    Protocol,
    /// `HOST`: interface or host name to bind
    Host,
    /// `PORT`: `-1` for an automatically selected port
    Port,
    /// `ROOT_PATH`: path prefix the application is mounted under
    RootPath,
    /// `TLS_CERTIFICATE`: PEM certificate chain, required for HTTPS
    TlsCertificate,
    /// `TLS_PRIVATE_KEY`: PEM private key, required for HTTPS
    TlsPrivateKey,
    /// `SHUTDOWN_GRACE_PERIOD`: how long a stop waits for open connections
    ShutdownGracePeriod,
    /// `HEALTH_PATH`: mounts a health check route when set
    HealthPath,
}

impl ConfigOption {
    /// Every option in the order `build()` resolves them
    pub const ALL: [Self; 8] = [
        Self::Protocol,
        Self::Host,
        Self::Port,
        Self::RootPath,
        Self::TlsCertificate,
        Self::TlsPrivateKey,
        Self::ShutdownGracePeriod,
        Self::HealthPath,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Protocol => "PROTOCOL",
            Self::Host => "HOST",
            Self::Port => "PORT",
            Self::RootPath => "ROOT_PATH",
            Self::TlsCertificate => "TLS_CERTIFICATE",
            Self::TlsPrivateKey => "TLS_PRIVATE_KEY",
            Self::ShutdownGracePeriod => "SHUTDOWN_GRACE_PERIOD",
            Self::HealthPath => "HEALTH_PATH",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.name() == name)
    }

    /// Whether the option is one of the portable core fields
    ///
    /// The rest are specific to this implementation and also show up in
    /// `Configuration::properties`.
    pub const fn is_core(self) -> bool {
        matches!(self, Self::Protocol | Self::Host | Self::Port | Self::RootPath)
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
