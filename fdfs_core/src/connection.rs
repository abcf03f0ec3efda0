//! A single blocking socket to a tracker or storage node.

use crate::endpoint::Endpoint;
use log::{debug, trace};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

/// Connect and read deadlines applied to every socket the client opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            read: Duration::from_secs(30),
        }
    }
}

/// An open socket plus the endpoint it was opened for.
///
/// The socket is shut down when the value is closed or dropped, so every exit
/// path of an exchange releases it.
pub struct Connection {
    endpoint: Endpoint,
    peer: SocketAddr,
    stream: TcpStream,
}

impl Connection {
    /// Connects to `endpoint`, trying each resolved address in turn.
    pub fn open(endpoint: &Endpoint, timeouts: &Timeouts) -> io::Result<Self> {
        let mut last_err = None;
        for addr in endpoint.socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeouts.connect) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(timeouts.read))?;
                    stream.set_write_timeout(Some(timeouts.read))?;
                    let _ = stream.set_nodelay(true);
                    debug!("connected to {} ({})", endpoint, addr);
                    return Ok(Self {
                        endpoint: endpoint.clone(),
                        peer: addr,
                        stream,
                    });
                }
                Err(e) => {
                    trace!("connect {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, format!("connect {} failed", endpoint))
        }))
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.stream.local_addr()
    }

    /// Shuts the socket down in both directions and releases it.
    pub fn close(self) {
        drop(self);
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => trace!("closed connection to {}", self.endpoint),
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
            Err(e) => debug!("close connection to {} failed: {}", self.endpoint, e),
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("peer", &self.peer)
            .finish()
    }
}
