//! `host:port` endpoints for trackers and storage nodes.

use crate::error::{FdfsError, Result};
use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// A remote service instance.
///
/// Parsing only checks the syntax; name resolution happens when a socket is
/// opened so that a DNS failure counts as an unreachable node instead of a
/// configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolves the endpoint to its socket addresses.
    pub fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{} resolved to no addresses", self),
            ));
        }
        Ok(addrs)
    }

    /// Parses a comma-separated address list, trimming blanks around each
    /// entry and skipping duplicates while keeping first-seen order.
    pub fn parse_list(list: &str) -> Result<Vec<Endpoint>> {
        if list.trim().is_empty() {
            return Err(FdfsError::Config("tracker_server_addr is blank".to_string()));
        }
        let mut endpoints: Vec<Endpoint> = Vec::new();
        for item in list.split(',') {
            let endpoint: Endpoint = item.parse()?;
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }
        Ok(endpoints)
    }
}

impl FromStr for Endpoint {
    type Err = FdfsError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| FdfsError::Config(format!("address '{}' has no port", s)))?;
        let host = host.trim();
        let host = match host.strip_prefix('[') {
            Some(inner) => inner
                .strip_suffix(']')
                .ok_or_else(|| FdfsError::Config(format!("address '{}' has an unclosed bracket", s)))?,
            None if host.contains(':') => {
                return Err(FdfsError::Config(format!(
                    "IPv6 address '{}' must be written as [host]:port",
                    s
                )));
            }
            None => host,
        };
        if host.is_empty() {
            return Err(FdfsError::Config(format!("address '{}' has no host", s)));
        }
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| FdfsError::Config(format!("address '{}' has an invalid port: {}", s, e)))?;
        Ok(Endpoint::new(host, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
