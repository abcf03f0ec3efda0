//! Storage lookup against a tracker server.

use super::TrackerClient;
use super::group::TrackerGroup;
use fdfs_core::protocol::{FetchQuery, StorageList, recv_body, recv_header};
use fdfs_core::{Charset, Endpoint, FdfsError, Result};
use log::debug;
use std::io::Write;
use std::sync::Arc;

/// Asks whichever tracker the group hands out where a file is stored.
pub struct FdfsTrackerClient {
    group: Arc<TrackerGroup>,
    charset: Charset,
}

impl FdfsTrackerClient {
    pub fn new(group: Arc<TrackerGroup>, charset: Charset) -> Self {
        Self { group, charset }
    }

    pub fn group(&self) -> &Arc<TrackerGroup> {
        &self.group
    }

    /// Sends one fetch query and parses the storage list it returns.
    pub fn query(&self, query: &FetchQuery) -> Result<StorageList> {
        let frame = query.encode(self.charset)?;
        let mut connection = self
            .group
            .get_available_socket()
            .ok_or(FdfsError::NoTrackerAvailable)?;
        let tracker = connection.endpoint().clone();

        connection
            .write_all(&frame)
            .map_err(|e| FdfsError::transport(format!("send fetch query to {}", tracker), e))?;

        let header = recv_header(&mut connection, None)?;
        if header.status != 0 {
            debug!("tracker {} answered fetch query with status {}", tracker, header.status);
            return Err(FdfsError::Rejected {
                status: header.status,
            });
        }
        let body = recv_body(&mut connection, header.body_len)?;
        let list = StorageList::decode(&body, self.charset)?;
        debug!(
            "tracker {} lists {} storage node(s) for {}/{}",
            tracker,
            list.endpoints.len(),
            query.group,
            query.remote
        );
        Ok(list)
    }
}

impl TrackerClient for FdfsTrackerClient {
    fn fetch_storages(&self, group: &str, remote: &str) -> Result<Vec<Endpoint>> {
        Ok(self.query(&FetchQuery::new(group, remote))?.endpoints)
    }
}
