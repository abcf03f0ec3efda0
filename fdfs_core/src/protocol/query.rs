use super::constants::{
    FDFS_GROUP_NAME_MAX_LEN, FDFS_PROTO_PKG_LEN_SIZE, IP_ADDRESS_SIZE,
    TRACKER_PROTO_CMD_SERVICE_QUERY_FETCH_ALL,
};
use super::writer::FrameWriter;
use crate::charset::Charset;
use crate::endpoint::Endpoint;
use crate::error::{FdfsError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Asks a tracker for every storage node holding a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub group: String,
    pub remote: String,
}

impl FetchQuery {
    pub fn new(group: &str, remote: &str) -> Self {
        Self {
            group: group.to_string(),
            remote: remote.to_string(),
        }
    }

    pub fn encode(&self, charset: Charset) -> Result<Vec<u8>> {
        let group = charset.encode(&self.group)?;
        let remote = charset.encode(&self.remote)?;
        let body_len = FDFS_GROUP_NAME_MAX_LEN + remote.len();

        let mut writer = FrameWriter::new(TRACKER_PROTO_CMD_SERVICE_QUERY_FETCH_ALL, body_len as u64);
        writer.put_fixed(&group, FDFS_GROUP_NAME_MAX_LEN)?;
        writer.put_bytes(&remote);
        Ok(writer.finish())
    }
}

/// Storage nodes returned by a fetch query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageList {
    pub group: String,
    pub endpoints: Vec<Endpoint>,
}

impl StorageList {
    /// Smallest valid body: group, one address, port.
    pub const MIN_BODY_LEN: usize = FDFS_GROUP_NAME_MAX_LEN + IP_ADDRESS_SIZE + FDFS_PROTO_PKG_LEN_SIZE;

    /// Parses `group(16) ip(15) port(8) [ip(15)]*`; extra addresses share the
    /// first address's port.
    pub fn decode(body: &[u8], charset: Charset) -> Result<Self> {
        if body.len() < Self::MIN_BODY_LEN
            || (body.len() - Self::MIN_BODY_LEN) % IP_ADDRESS_SIZE != 0
        {
            return Err(FdfsError::Protocol(format!(
                "fetch query response body length {} is invalid",
                body.len()
            )));
        }

        let mut rdr = Cursor::new(body);
        let mut group = [0u8; FDFS_GROUP_NAME_MAX_LEN];
        rdr.read_exact(&mut group)?;
        let mut ip = [0u8; IP_ADDRESS_SIZE];
        rdr.read_exact(&mut ip)?;
        let first_ip = charset.decode_field(&ip);
        let port = rdr.read_u64::<BigEndian>()?;
        let port = u16::try_from(port)
            .map_err(|_| FdfsError::Protocol(format!("storage port {} out of range", port)))?;

        let mut endpoints = vec![Endpoint::new(first_ip, port)];
        while (rdr.position() as usize) < body.len() {
            rdr.read_exact(&mut ip)?;
            let endpoint = Endpoint::new(charset.decode_field(&ip), port);
            if !endpoints.contains(&endpoint) {
                endpoints.push(endpoint);
            }
        }

        Ok(Self {
            group: charset.decode_field(&group),
            endpoints,
        })
    }
}
