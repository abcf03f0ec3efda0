//! Failover across the configured tracker servers.
//!
//! Every configured address lives in exactly one of two lists, `available`
//! or `unavailable`. A failed connect demotes an address, a successful
//! connect to a demoted address promotes it back. The lists sit behind one
//! mutex and are only touched through atomic moves, so concurrent callers
//! never observe an address in both lists or in neither.

use fdfs_core::{ClientConfig, Connection, Endpoint, FdfsError, Result, Timeouts};
use log::{debug, error, warn};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct AddressBook {
    available: Vec<Endpoint>,
    unavailable: Vec<Endpoint>,
}

impl AddressBook {
    fn demote(&mut self, endpoint: &Endpoint) -> bool {
        match self.available.iter().position(|e| e == endpoint) {
            Some(index) => {
                let moved = self.available.remove(index);
                self.unavailable.push(moved);
                true
            }
            None => false,
        }
    }

    fn promote(&mut self, endpoint: &Endpoint) -> bool {
        match self.unavailable.iter().position(|e| e == endpoint) {
            Some(index) => {
                let moved = self.unavailable.remove(index);
                self.available.push(moved);
                true
            }
            None => false,
        }
    }
}

/// The set of tracker servers a client talks to.
pub struct TrackerGroup {
    book: Mutex<AddressBook>,
    timeouts: Timeouts,
}

impl TrackerGroup {
    /// Parses the configured tracker list and probes every address.
    ///
    /// Unreachable trackers are demoted. Construction fails only when no
    /// tracker answered at all.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let group = Self::unprobed(config)?;
        group.probe()?;
        Ok(group)
    }

    /// Validates the configuration and parses its tracker list without
    /// touching the network.
    pub fn unprobed(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::from_endpoints(config.tracker_endpoints()?, config.timeouts())
    }

    pub fn from_endpoints(endpoints: Vec<Endpoint>, timeouts: Timeouts) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(FdfsError::Config("tracker_server_addr is blank".to_string()));
        }
        if timeouts.connect.is_zero() || timeouts.read.is_zero() {
            return Err(FdfsError::Config("timeouts must be greater than zero".to_string()));
        }
        Ok(Self {
            book: Mutex::new(AddressBook {
                available: endpoints,
                unavailable: Vec::new(),
            }),
            timeouts,
        })
    }

    /// Connects to every available tracker once and returns how many answered.
    pub fn probe(&self) -> Result<usize> {
        let mut reachable = 0;
        for endpoint in self.available() {
            match Connection::open(&endpoint, &self.timeouts) {
                Ok(connection) => {
                    connection.close();
                    reachable += 1;
                }
                Err(e) => {
                    warn!("tracker {} create socket failed: {}", endpoint, e);
                    self.book.lock().demote(&endpoint);
                }
            }
        }
        if reachable == 0 {
            error!("no tracker server answered the startup probe");
            return Err(FdfsError::NoTrackerAvailable);
        }
        debug!("{} tracker server(s) reachable", reachable);
        Ok(reachable)
    }

    /// Returns a socket to one tracker, or `None` when every address failed.
    ///
    /// Available addresses are tried first and demoted on failure. Only when
    /// none of them connects are the unavailable ones retried; the first of
    /// those that connects is promoted back.
    pub fn get_available_socket(&self) -> Option<Connection> {
        for endpoint in self.available() {
            match Connection::open(&endpoint, &self.timeouts) {
                Ok(connection) => return Some(connection),
                Err(e) => {
                    warn!("tracker {} create socket failed: {}", endpoint, e);
                    self.book.lock().demote(&endpoint);
                }
            }
        }
        error!("available tracker servers have no socket to offer");

        for endpoint in self.unavailable() {
            match Connection::open(&endpoint, &self.timeouts) {
                Ok(connection) => {
                    if self.book.lock().promote(&endpoint) {
                        debug!("tracker {} is reachable again", endpoint);
                    }
                    return Some(connection);
                }
                Err(e) => warn!("tracker {} still unreachable: {}", endpoint, e),
            }
        }
        error!("unavailable tracker servers have no socket to offer either");
        None
    }

    /// Opens one socket per available tracker.
    ///
    /// Falls back to [`TrackerGroup::get_available_socket`] when none of them
    /// connects, so the result is empty only when every address failed.
    pub fn get_group_socket(&self) -> Vec<Connection> {
        let mut sockets = Vec::new();
        for endpoint in self.available() {
            match Connection::open(&endpoint, &self.timeouts) {
                Ok(connection) => sockets.push(connection),
                Err(e) => warn!("group socket to tracker {} failed: {}", endpoint, e),
            }
        }
        if sockets.is_empty() {
            sockets.extend(self.get_available_socket());
        }
        sockets
    }

    /// Snapshot of the addresses currently considered reachable.
    pub fn available(&self) -> Vec<Endpoint> {
        self.book.lock().available.clone()
    }

    /// Snapshot of the addresses currently considered unreachable.
    pub fn unavailable(&self) -> Vec<Endpoint> {
        self.book.lock().unavailable.clone()
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }
}
