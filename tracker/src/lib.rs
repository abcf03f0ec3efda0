//! Tracker-side pieces of the client: failover across tracker addresses and
//! the lookup that maps a file to the storage nodes holding it.

pub mod group;
pub mod query;

pub use group::TrackerGroup;
pub use query::FdfsTrackerClient;

use fdfs_core::{Endpoint, Result};

/// Resolves which storage nodes can serve a file.
pub trait TrackerClient: Send + Sync {
    /// Returns the storage endpoints holding `remote` in `group`.
    fn fetch_storages(&self, group: &str, remote: &str) -> Result<Vec<Endpoint>>;
}
