//! Client configuration, read once and fixed for the client's lifetime.

use crate::charset::Charset;
use crate::connection::Timeouts;
use crate::endpoint::Endpoint;
use crate::error::{FdfsError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_connect_timeout_ms() -> u64 {
    2_000
}

fn default_read_timeout_ms() -> u64 {
    30_000
}

fn default_fetch_pool_size() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings shared by the tracker group and the download client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Comma-separated `host:port` list of tracker servers.
    pub tracker_server_addr: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Connections opened per download.
    #[serde(default = "default_fetch_pool_size")]
    pub fetch_pool_size: usize,
    #[serde(default)]
    pub charset: Charset,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ClientConfig {
    /// Builds a configuration with default timeouts, pool size and charset.
    pub fn new(tracker_server_addr: impl Into<String>) -> Self {
        Self {
            tracker_server_addr: tracker_server_addr.into(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            fetch_pool_size: default_fetch_pool_size(),
            charset: Charset::default(),
            log_level: default_log_level(),
        }
    }

    /// Reads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FdfsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(content).map_err(|e| FdfsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tracker_endpoints()?;
        if self.fetch_pool_size == 0 {
            return Err(FdfsError::Config("fetch_pool_size must be at least 1".to_string()));
        }
        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 {
            return Err(FdfsError::Config("timeouts must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn tracker_endpoints(&self) -> Result<Vec<Endpoint>> {
        Endpoint::parse_list(&self.tracker_server_addr)
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_millis(self.connect_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
        }
    }

    pub fn with_fetch_pool_size(mut self, size: usize) -> Self {
        self.fetch_pool_size = size;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout_ms = connect.as_millis() as u64;
        self.read_timeout_ms = read.as_millis() as u64;
        self
    }
}
