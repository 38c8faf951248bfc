use std::fmt;
use std::str::FromStr;

/// Wire protocol the instance serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        }
    }

    /// Lower-case URL scheme
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("http") => Ok(Self::Http),
            v if v.eq_ignore_ascii_case("https") => Ok(Self::Https),
            _ => Err("expected HTTP or HTTPS".to_owned()),
        }
    }
}

/// TCP port to bind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Port {
    /// Let the operating system pick a free port
    #[default]
    Auto,
    Fixed(u16),
}

impl Port {
    /// Numeric form, `-1` meaning auto-select
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Auto => -1,
            Self::Fixed(port) => i32::from(port),
        }
    }

    /// Port number handed to the socket layer, `0` for auto-select
    pub const fn bind_port(self) -> u16 {
        match self {
            Self::Auto => 0,
            Self::Fixed(port) => port,
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Fixed(port)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

impl FromStr for Port {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: i32 = s.trim().parse().map_err(|_| "not an integer".to_owned())?;
        if number == -1 {
            return Ok(Self::Auto);
        }
        u16::try_from(number)
            .map(Self::Fixed)
            .map_err(|_| "expected -1 or a port between 0 and 65535".to_owned())
    }
}
