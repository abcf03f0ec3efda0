//! Core library for the FastDFS client.
//!
//! This library provides the binary frame format spoken by trackers and
//! storage nodes, plus the small building blocks shared by the tracker and
//! download crates: endpoints, sockets, endpoint rotation, configuration and
//! the common error type.

pub mod charset;
pub mod circle;
pub mod config;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod protocol;

pub use charset::Charset;
pub use circle::Circle;
pub use config::ClientConfig;
pub use connection::{Connection, Timeouts};
pub use endpoint::Endpoint;
pub use error::{FdfsError, Result};
