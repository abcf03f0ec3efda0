//! Download client for a FastDFS cluster.
//!
//! Resolves storage nodes through the trackers, keeps a small pool of storage
//! connections per download and reads the body into memory, into a local file
//! or through a streaming callback.

pub mod cli;
pub mod downloader;
pub mod logging;
pub mod pool;
pub mod storage;

pub use downloader::{DownloadCallback, DownloadClient, DownloadStatus, Recv};
pub use pool::ConnectionPool;
