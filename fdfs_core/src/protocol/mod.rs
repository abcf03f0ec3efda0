//! The binary frame format shared by trackers and storage nodes.
//!
//! Every exchange is a 10-byte header (8-byte big-endian body length,
//! command byte, status byte) followed by a command-specific body.

pub mod constants;
pub mod download;
pub mod header;
pub mod query;
pub mod writer;

pub use download::DownloadRequest;
pub use header::{ProtoHeader, recv_body, recv_header};
pub use query::{FetchQuery, StorageList};
pub use writer::FrameWriter;
