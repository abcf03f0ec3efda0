use super::constants::{
    FDFS_GROUP_NAME_MAX_LEN, FDFS_PROTO_HEADER_LEN, STORAGE_PROTO_CMD_DOWNLOAD_FILE,
};
use super::header::ProtoHeader;
use super::writer::FrameWriter;
use crate::charset::Charset;
use crate::error::{FdfsError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Body fields of a storage download request.
///
/// A zero `length` asks for everything from `offset` to the end of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub offset: u64,
    pub length: u64,
    pub group: String,
    pub remote: String,
}

impl DownloadRequest {
    pub fn new(group: &str, remote: &str, offset: u64, length: u64) -> Self {
        Self {
            offset,
            length,
            group: group.to_string(),
            remote: remote.to_string(),
        }
    }

    /// Encodes header and body into one frame.
    pub fn encode(&self, charset: Charset) -> Result<Vec<u8>> {
        let group = charset.encode(&self.group)?;
        let remote = charset.encode(&self.remote)?;
        let body_len = 8 + 8 + FDFS_GROUP_NAME_MAX_LEN + remote.len();

        let mut writer = FrameWriter::new(STORAGE_PROTO_CMD_DOWNLOAD_FILE, body_len as u64);
        writer.put_u64(self.offset).put_u64(self.length);
        writer.put_fixed(&group, FDFS_GROUP_NAME_MAX_LEN)?;
        writer.put_bytes(&remote);
        Ok(writer.finish())
    }

    /// Parses a frame produced by [`DownloadRequest::encode`].
    pub fn decode(frame: &[u8], charset: Charset) -> Result<Self> {
        if frame.len() < FDFS_PROTO_HEADER_LEN {
            return Err(FdfsError::Protocol("frame shorter than header".to_string()));
        }
        let mut header_bytes = [0u8; FDFS_PROTO_HEADER_LEN];
        header_bytes.copy_from_slice(&frame[..FDFS_PROTO_HEADER_LEN]);
        let header = ProtoHeader::decode(&header_bytes);
        if header.cmd != STORAGE_PROTO_CMD_DOWNLOAD_FILE {
            return Err(FdfsError::Protocol(format!(
                "unexpected command {} in download request",
                header.cmd
            )));
        }
        let body = &frame[FDFS_PROTO_HEADER_LEN..];
        if header.body_len != body.len() as u64 || body.len() < 16 + FDFS_GROUP_NAME_MAX_LEN {
            return Err(FdfsError::Protocol(format!(
                "download request body of {} bytes, header declares {}",
                body.len(),
                header.body_len
            )));
        }

        let mut rdr = Cursor::new(body);
        let offset = rdr.read_u64::<BigEndian>()?;
        let length = rdr.read_u64::<BigEndian>()?;
        let mut group = [0u8; FDFS_GROUP_NAME_MAX_LEN];
        rdr.read_exact(&mut group)?;
        let mut remote = Vec::new();
        rdr.read_to_end(&mut remote)?;

        Ok(Self {
            offset,
            length,
            group: charset.decode_field(&group),
            remote: charset.decode_field(&remote),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_download_request_layout() {
        let remote = "M00/00/00/abc.txt";
        let frame = DownloadRequest::new("group1", remote, 0, 0)
            .encode(Charset::Utf8)
            .unwrap();

        let body_len = 8 + 8 + FDFS_GROUP_NAME_MAX_LEN + remote.len();
        assert_eq!(frame.len(), FDFS_PROTO_HEADER_LEN + body_len);
        assert_eq!(&frame[..8], &(body_len as u64).to_be_bytes());
        assert_eq!(frame[8], STORAGE_PROTO_CMD_DOWNLOAD_FILE);
        assert_eq!(frame[9], 0);
        assert_eq!(&frame[10..26], &[0u8; 16]);
        assert_eq!(&frame[26..32], b"group1");
        assert_eq!(&frame[32..42], &[0u8; 10]);
        assert_eq!(&frame[42..], remote.as_bytes());
    }

    #[test]
    fn test_offset_and_length_big_endian() {
        let frame = DownloadRequest::new("g", "f", 0x0102_0304, 0xff)
            .encode(Charset::Utf8)
            .unwrap();
        assert_eq!(&frame[10..18], &[0, 0, 0, 0, 1, 2, 3, 4]);
        assert_eq!(&frame[18..26], &[0, 0, 0, 0, 0, 0, 0, 0xff]);
    }

    #[test]
    fn test_group_name_too_long() {
        let result = DownloadRequest::new("group_name_longer_than_16", "f", 0, 0).encode(Charset::Utf8);
        assert!(matches!(result, Err(FdfsError::InvalidArgument(_))));
    }

    #[test]
    fn test_remote_name_uses_charset() {
        let frame = DownloadRequest::new("group1", "caf\u{e9}.txt", 0, 0)
            .encode(Charset::Latin1)
            .unwrap();
        assert_eq!(&frame[42..], b"caf\xe9.txt");
        let decoded = DownloadRequest::decode(&frame, Charset::Latin1).unwrap();
        assert_eq!(decoded.remote, "caf\u{e9}.txt");
    }

    #[test]
    fn test_decode_rejects_truncated_frame() {
        let mut frame = DownloadRequest::new("group1", "a", 0, 0)
            .encode(Charset::Utf8)
            .unwrap();
        frame.truncate(frame.len() - 1);
        assert!(DownloadRequest::decode(&frame, Charset::Utf8).is_err());
    }

    proptest! {
        #[test]
        fn test_encode_decode_recovers_fields(
            offset in any::<u64>(),
            length in any::<u64>(),
            group in "[a-z0-9]{1,16}",
            remote in "M0[0-9]/[0-9A-F]{2}/[0-9A-F]{2}/[A-Za-z0-9_]{1,40}\\.[a-z]{1,4}",
        ) {
            let request = DownloadRequest::new(&group, &remote, offset, length);
            let frame = request.encode(Charset::Utf8).unwrap();
            prop_assert_eq!(DownloadRequest::decode(&frame, Charset::Utf8).unwrap(), request);
        }
    }
}
