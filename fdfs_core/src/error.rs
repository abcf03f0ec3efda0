//! Error type shared by every crate in the workspace.

use std::io;
use thiserror::Error;

/// Failures surfaced by the client.
///
/// A nonzero status byte in a storage download response is deliberately
/// absent here: the download operations hand it back as a value.
#[derive(Error, Debug)]
pub enum FdfsError {
    /// Bad or missing configuration. Never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument failed a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A socket or stream failed while talking to a remote node.
    #[error("Transport error: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The fetch pool could not be filled to its configured size.
    #[error("Connection pool not filled: {established} of {capacity} connections established")]
    PoolNotFilled { established: usize, capacity: usize },

    /// No tracker address yielded a socket.
    #[error("No tracker server available")]
    NoTrackerAvailable,

    /// The peer sent a frame that does not follow the protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A tracker answered with a nonzero status byte.
    #[error("Tracker rejected request with status {status}")]
    Rejected { status: u8 },

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FdfsError {
    /// Wraps an I/O failure that happened while exchanging frames with a node.
    pub fn transport(context: impl Into<String>, source: io::Error) -> Self {
        FdfsError::Transport {
            context: context.into(),
            source,
        }
    }

    /// Whether this failure belongs to the transport class (connect, timeout,
    /// short read, exhausted candidates).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FdfsError::Transport { .. }
                | FdfsError::PoolNotFilled { .. }
                | FdfsError::NoTrackerAvailable
        )
    }
}

pub type Result<T> = std::result::Result<T, FdfsError>;
