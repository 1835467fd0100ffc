//! Validated host/port pairs

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use uhppote_core::constants::DEFAULT_PORT;

use crate::error::{Error, Result};

/// Longest accepted host name
pub const MAX_HOST_LEN: usize = 255;

/// Longest accepted label between dots
pub const MAX_LABEL_LEN: usize = 63;

/// Host name or dotted-decimal address
///
/// Each dot-separated label is 1 to 63 characters of `[A-Za-z0-9-]` and
/// neither starts nor ends with a hyphen. A single trailing dot is stripped.
///
/// ```
/// use uhppote_transport::Host;
///
/// assert_eq!(Host::parse("localhost.").unwrap().as_str(), "localhost");
/// assert_eq!(Host::from([192, 168, 0, 10]).as_str(), "192.168.0.10");
/// assert!(Host::parse("Hello*World").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() || input.len() > MAX_HOST_LEN {
            return Err(Error::InvalidHost(input.to_string()));
        }

        let host = input.strip_suffix('.').unwrap_or(input);

        if !host.split('.').all(is_valid_label) {
            return Err(Error::InvalidHost(input.to_string()));
        }

        Ok(Self(host.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_label(label: &str) -> bool {
    (1..=MAX_LABEL_LEN).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

impl From<[u8; 4]> for Host {
    fn from(octets: [u8; 4]) -> Self {
        Self::from(Ipv4Addr::from(octets))
    }
}

impl From<Ipv4Addr> for Host {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.to_string())
    }
}

impl TryFrom<&[u8]> for Host {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let octets: [u8; 4] = bytes
            .try_into()
            .map_err(|_| Error::InvalidHost(format!("{} bytes", bytes.len())))?;
        Ok(Self::from(octets))
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// TCP port in 1..=65535
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Port(u16);

impl Port {
    pub fn new(port: u16) -> Result<Self> {
        if port == 0 {
            return Err(Error::InvalidPort(port.to_string()));
        }
        Ok(Self(port))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for Port {
    fn default() -> Self {
        Self(DEFAULT_PORT)
    }
}

impl FromStr for Port {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPort(s.to_string());

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let port = s.parse::<u16>().map_err(|_| invalid())?;
        Self::new(port)
    }
}

impl TryFrom<i64> for Port {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        let port = u16::try_from(value).map_err(|_| Error::InvalidPort(value.to_string()))?;
        Self::new(port)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a controller listens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: Host,
    port: Port,
}

impl Endpoint {
    pub fn new(host: Host, port: Port) -> Self {
        Self { host, port }
    }

    /// Validate a host string and port number in one go
    pub fn parse(host: &str, port: u16) -> Result<Self> {
        Ok(Self::new(Host::parse(host)?, Port::new(port)?))
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn set_host(&mut self, host: Host) {
        self.host = host;
    }

    pub fn set_port(&mut self, port: Port) {
        self.port = port;
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
