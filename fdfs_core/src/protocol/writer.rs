use super::header::ProtoHeader;
use crate::error::{FdfsError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Builds one request frame: header first, then body fields in order.
pub struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    /// Starts a frame whose header declares `body_len` bytes for `cmd`.
    pub fn new(cmd: u8, body_len: u64) -> Self {
        let header = ProtoHeader::request(cmd, body_len);
        let mut buf = Vec::with_capacity(header.encode().len() + body_len as usize);
        buf.extend_from_slice(&header.encode());
        Self { buf }
    }

    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        let mut word = [0u8; 8];
        BigEndian::write_u64(&mut word, value);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Writes exactly `width` bytes: `bytes` right-padded with zeros.
    pub fn put_fixed(&mut self, bytes: &[u8], width: usize) -> Result<&mut Self> {
        if bytes.len() > width {
            return Err(FdfsError::InvalidArgument(format!(
                "field of {} bytes exceeds fixed width {}",
                bytes.len(),
                width
            )));
        }
        self.buf.extend_from_slice(bytes);
        self.buf.resize(self.buf.len() + width - bytes.len(), 0);
        Ok(self)
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_layout() {
        let mut writer = FrameWriter::new(7, 13);
        writer.put_u64(1).put_bytes(b"z");
        writer.put_fixed(b"ab", 4).unwrap();
        let frame = writer.finish();
        assert_eq!(
            frame,
            vec![
                0, 0, 0, 0, 0, 0, 0, 13, 7, 0, // header
                0, 0, 0, 0, 0, 0, 0, 1, b'z', b'a', b'b', 0, 0,
            ]
        );
    }

    #[test]
    fn test_put_fixed_exact_width() {
        let mut writer = FrameWriter::new(1, 3);
        writer.put_fixed(b"abc", 3).unwrap();
        assert_eq!(&writer.finish()[10..], b"abc");
    }

    #[test]
    fn test_put_fixed_too_long() {
        let mut writer = FrameWriter::new(1, 2);
        assert!(matches!(
            writer.put_fixed(b"abc", 2),
            Err(FdfsError::InvalidArgument(_))
        ));
    }
}
