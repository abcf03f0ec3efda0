use super::state::{DownloadCallback, DownloadStatus, Recv};
use fdfs_core::protocol::constants::DOWNLOAD_CHUNK_SIZE;
use fdfs_core::{FdfsError, Result};
use std::io::{self, Read};

/// Feeds a `total`-byte body to `callback` in chunks of at most
/// [`DOWNLOAD_CHUNK_SIZE`] bytes.
///
/// A read that ends before `total` bytes arrived is a transport failure. A
/// `Recv::Stop` from the callback ends the read immediately.
pub fn stream_body<R, C>(reader: &mut R, total: u64, callback: &mut C) -> Result<DownloadStatus>
where
    R: Read + ?Sized,
    C: DownloadCallback + ?Sized,
{
    let mut buf = [0u8; DOWNLOAD_CHUNK_SIZE];
    let mut remaining = total;
    while remaining > 0 {
        let want = remaining.min(buf.len() as u64) as usize;
        let read = match reader.read(&mut buf[..want]) {
            Ok(0) => {
                return Err(FdfsError::transport(
                    "receive download body",
                    io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("invalid recv package size, {} of {} bytes missing", remaining, total),
                    ),
                ));
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FdfsError::transport("receive download body", e)),
        };
        if let Recv::Stop(code) = callback.recv(total, &buf[..read]) {
            return Ok(DownloadStatus::Stopped(code));
        }
        remaining -= read as u64;
    }
    Ok(DownloadStatus::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most `step` bytes per read.
    struct Trickle {
        inner: Cursor<Vec<u8>>,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.step);
            self.inner.read(&mut buf[..n])
        }
    }

    #[test]
    fn test_chunks_sum_to_total() {
        let body: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut chunks = Vec::new();
        let mut collected = Vec::new();
        let status = stream_body(
            &mut Cursor::new(body.clone()),
            body.len() as u64,
            &mut |total: u64, chunk: &[u8]| {
                assert_eq!(total, 5000);
                chunks.push(chunk.len());
                collected.extend_from_slice(chunk);
                Recv::Continue
            },
        )
        .unwrap();

        assert_eq!(status, DownloadStatus::Completed);
        assert_eq!(chunks, vec![2048, 2048, 904]);
        assert_eq!(collected, body);
    }

    #[test]
    fn test_short_reads_are_forwarded() {
        let mut reader = Trickle {
            inner: Cursor::new(vec![7u8; 100]),
            step: 30,
        };
        let mut sizes = Vec::new();
        let status = stream_body(&mut reader, 100, &mut |_: u64, chunk: &[u8]| {
            sizes.push(chunk.len());
            Recv::Continue
        })
        .unwrap();
        assert_eq!(status, DownloadStatus::Completed);
        assert_eq!(sizes, vec![30, 30, 30, 10]);
    }

    #[test]
    fn test_stop_on_first_chunk() {
        let mut reader = Cursor::new(vec![1u8; 4096]);
        let mut calls = 0;
        let status = stream_body(&mut reader, 4096, &mut |_: u64, _: &[u8]| {
            calls += 1;
            Recv::Stop(9)
        })
        .unwrap();
        assert_eq!(status, DownloadStatus::Stopped(9));
        assert_eq!(calls, 1);
        assert_eq!(reader.position(), 2048);
    }

    #[test]
    fn test_stop_with_zero_code() {
        let status = stream_body(&mut Cursor::new(vec![1u8; 10]), 10, &mut |_: u64, _: &[u8]| {
            Recv::Stop(0)
        })
        .unwrap();
        assert_eq!(status, DownloadStatus::Stopped(0));
        assert!(!status.is_completed());
    }

    #[test]
    fn test_truncated_body() {
        let result = stream_body(&mut Cursor::new(vec![0u8; 10]), 20, &mut |_: u64, _: &[u8]| {
            Recv::Continue
        });
        assert!(matches!(result, Err(FdfsError::Transport { .. })));
    }

    #[test]
    fn test_empty_body_never_calls_back() {
        let status = stream_body(&mut Cursor::new(Vec::<u8>::new()), 0, &mut |_: u64, _: &[u8]| -> Recv {
            panic!("no chunk expected")
        })
        .unwrap();
        assert_eq!(status, DownloadStatus::Completed);
    }
}
