use super::constants::{FDFS_PROTO_CMD_RESP, FDFS_PROTO_HEADER_LEN};
use crate::error::{FdfsError, Result};
use byteorder::{BigEndian, ByteOrder};
use log::trace;
use std::io::{self, Read};

/// The fixed 10-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtoHeader {
    pub body_len: u64,
    pub cmd: u8,
    /// Zero on requests and on successful responses.
    pub status: u8,
}

impl ProtoHeader {
    pub fn request(cmd: u8, body_len: u64) -> Self {
        Self {
            body_len,
            cmd,
            status: 0,
        }
    }

    pub fn encode(&self) -> [u8; FDFS_PROTO_HEADER_LEN] {
        let mut buf = [0u8; FDFS_PROTO_HEADER_LEN];
        BigEndian::write_u64(&mut buf[..8], self.body_len);
        buf[8] = self.cmd;
        buf[9] = self.status;
        buf
    }

    pub fn decode(bytes: &[u8; FDFS_PROTO_HEADER_LEN]) -> Self {
        Self {
            body_len: BigEndian::read_u64(&bytes[..8]),
            cmd: bytes[8],
            status: bytes[9],
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; FDFS_PROTO_HEADER_LEN];
        reader.read_exact(&mut buf)?;
        trace!("recv header {}", hex::encode(buf));
        Ok(Self::decode(&buf))
    }
}

/// Reads and validates a response header.
///
/// The command byte must be the response command. When the status is zero and
/// `expected_len` is given, the declared body length must match it. A nonzero
/// status is returned as-is for the caller to interpret.
pub fn recv_header<R: Read>(reader: &mut R, expected_len: Option<u64>) -> Result<ProtoHeader> {
    let header = ProtoHeader::read_from(reader)
        .map_err(|e| FdfsError::transport("receive response header", e))?;
    if header.cmd != FDFS_PROTO_CMD_RESP {
        return Err(FdfsError::Protocol(format!(
            "response command {} != {}",
            header.cmd, FDFS_PROTO_CMD_RESP
        )));
    }
    if header.status == 0 {
        if let Some(expected) = expected_len {
            if header.body_len != expected {
                return Err(FdfsError::Protocol(format!(
                    "response body length {} != expected {}",
                    header.body_len, expected
                )));
            }
        }
    }
    Ok(header)
}

/// Reads exactly `len` body bytes; anything shorter is a transport failure.
pub fn recv_body<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let read = reader
        .take(len)
        .read_to_end(&mut body)
        .map_err(|e| FdfsError::transport("receive response body", e))?;
    if read as u64 != len {
        return Err(FdfsError::transport(
            "receive response body",
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("invalid recv package size {} != {}", read, len),
            ),
        ));
    }
    Ok(body)
}
