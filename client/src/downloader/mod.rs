mod fetch;
mod state;
mod stream;

pub use fetch::fill_fetch_pool;
pub use state::{DownloadCallback, DownloadStatus, Recv};
pub use stream::stream_body;

use crate::storage::write_local_file;
use fdfs_core::protocol::{DownloadRequest, recv_body, recv_header};
use fdfs_core::{ClientConfig, Connection, FdfsError, Result};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;
use tracker::TrackerClient;

/// Response of one download exchange: a body, or the storage node's status.
enum Reply<T> {
    Body(T),
    Rejected(u8),
}

/// Downloads files from storage nodes.
///
/// Every operation resolves the storage nodes through the tracker, opens a
/// fresh connection pool, exchanges one request on one of its connections
/// and closes everything before returning. Nothing per-call is shared, so one
/// client may be used from many threads at once.
pub struct DownloadClient {
    config: ClientConfig,
    tracker: Box<dyn TrackerClient>,
}

impl DownloadClient {
    /// Builds a client; the configuration is validated first.
    pub fn new(config: ClientConfig, tracker: impl TrackerClient + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: Box::new(tracker),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads a whole file into memory.
    ///
    /// Returns `Ok(None)` when the storage node rejects the request.
    pub fn download_file(&self, group: &str, remote: &str) -> Result<Option<Vec<u8>>> {
        self.download_range(group, remote, 0, 0)
    }

    /// Downloads `length` bytes starting at `offset`; a zero length reads to
    /// the end of the file.
    pub fn download_range(
        &self,
        group: &str,
        remote: &str,
        offset: u64,
        length: u64,
    ) -> Result<Option<Vec<u8>>> {
        match self.fetch_bytes(group, remote, offset, length)? {
            Reply::Body(bytes) => Ok(Some(bytes)),
            Reply::Rejected(_) => Ok(None),
        }
    }

    /// Downloads a whole file and writes it to `local`, replacing any
    /// existing content.
    ///
    /// Returns 0 on success or the storage node's status byte; nothing is
    /// written when the request is rejected.
    pub fn download_to_file(&self, group: &str, remote: &str, local: impl AsRef<Path>) -> Result<u8> {
        self.download_range_to_file(group, remote, local, 0, 0)
    }

    pub fn download_range_to_file(
        &self,
        group: &str,
        remote: &str,
        local: impl AsRef<Path>,
        offset: u64,
        length: u64,
    ) -> Result<u8> {
        match self.fetch_bytes(group, remote, offset, length)? {
            Reply::Body(bytes) => {
                write_local_file(&bytes, local)?;
                Ok(0)
            }
            Reply::Rejected(status) => Ok(status),
        }
    }

    /// Streams a whole file to `callback`.
    pub fn download_with_callback<C>(&self, group: &str, remote: &str, callback: C) -> Result<DownloadStatus>
    where
        C: DownloadCallback,
    {
        self.download_range_with_callback(group, remote, 0, 0, callback)
    }

    /// Streams a byte range to `callback` in chunks of at most 2 KiB.
    pub fn download_range_with_callback<C>(
        &self,
        group: &str,
        remote: &str,
        offset: u64,
        length: u64,
        mut callback: C,
    ) -> Result<DownloadStatus>
    where
        C: DownloadCallback,
    {
        let reply = self.exchange(group, remote, offset, length, |connection, body_len| {
            stream_body(connection, body_len, &mut callback)
        })?;
        match reply {
            Reply::Body(status) => Ok(status),
            Reply::Rejected(status) => Ok(DownloadStatus::Rejected(status)),
        }
    }

    fn fetch_bytes(&self, group: &str, remote: &str, offset: u64, length: u64) -> Result<Reply<Vec<u8>>> {
        self.exchange(group, remote, offset, length, |connection, body_len| {
            recv_body(connection, body_len)
        })
    }

    /// The path every variant shares: validate, resolve, fill the pool, send
    /// the request, read the header and let `read_body` consume the body.
    ///
    /// The connection used and the rest of the pool are closed on every exit.
    fn exchange<T, F>(&self, group: &str, remote: &str, offset: u64, length: u64, read_body: F) -> Result<Reply<T>>
    where
        F: FnOnce(&mut Connection, u64) -> Result<T>,
    {
        check_before_download(group, remote)?;
        let frame = DownloadRequest::new(group, remote, offset, length).encode(self.config.charset)?;

        let mut pool = fill_fetch_pool(
            self.tracker.as_ref(),
            &self.config.timeouts(),
            self.config.fetch_pool_size,
            group,
            remote,
        )?;
        let mut connection = pool.get().ok_or(FdfsError::PoolNotFilled {
            established: 0,
            capacity: pool.capacity(),
        })?;

        let result = send_and_receive(&mut connection, &frame, read_body);
        if let Err(e) = &result {
            warn!("download {}/{} from {} failed: {}", group, remote, connection.endpoint(), e);
        }
        connection.close();
        pool.close_all();
        result
    }
}

fn check_before_download(group: &str, remote: &str) -> Result<()> {
    if group.trim().is_empty() {
        return Err(FdfsError::InvalidArgument("groupName is blank".to_string()));
    }
    if remote.trim().is_empty() {
        return Err(FdfsError::InvalidArgument("remoteFileName is blank".to_string()));
    }
    debug!("groupName=[{}]", group);
    debug!("remoteFileName=[{}]", remote);
    Ok(())
}

fn send_and_receive<T, F>(connection: &mut Connection, frame: &[u8], read_body: F) -> Result<Reply<T>>
where
    F: FnOnce(&mut Connection, u64) -> Result<T>,
{
    if let Err(e) = connection.write_all(frame) {
        return Err(FdfsError::transport(
            format!("send download request to {}", connection.endpoint()),
            e,
        ));
    }
    let header = recv_header(connection, None)?;
    if header.status != 0 {
        debug!("response status = [{}]", header.status);
        return Ok(Reply::Rejected(header.status));
    }
    read_body(connection, header.body_len).map(Reply::Body)
}
