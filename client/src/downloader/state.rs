/// What a streaming callback wants after seeing a chunk.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Recv {
    /// Keep reading the body.
    Continue,
    /// Stop reading; the code becomes the result of the download.
    ///
    /// The download ends as [`DownloadStatus::Stopped`] whatever the code,
    /// `Stop(0)` included.
    Stop(i32),
}

/// Outcome of a streaming download.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DownloadStatus {
    /// The whole body was handed to the callback.
    Completed,
    /// The storage node answered with a nonzero status byte.
    Rejected(u8),
    /// The callback asked to stop early.
    Stopped(i32),
}

impl DownloadStatus {
    /// Whether the whole body reached the callback.
    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadStatus::Completed)
    }

    /// Numeric result: 0 when completed, otherwise the server or callback code.
    ///
    /// A callback may stop with code 0, so use [`DownloadStatus::is_completed`]
    /// rather than comparing the code with 0.
    pub fn code(&self) -> i32 {
        match self {
            DownloadStatus::Completed => 0,
            DownloadStatus::Rejected(status) => i32::from(*status),
            DownloadStatus::Stopped(code) => *code,
        }
    }
}

/// Receives a download body chunk by chunk.
pub trait DownloadCallback {
    /// Called once per chunk with the total body length and the chunk bytes.
    fn recv(&mut self, file_size: u64, chunk: &[u8]) -> Recv;
}

impl<F> DownloadCallback for F
where
    F: FnMut(u64, &[u8]) -> Recv,
{
    fn recv(&mut self, file_size: u64, chunk: &[u8]) -> Recv {
        self(file_size, chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DownloadStatus::Completed.code(), 0);
        assert_eq!(DownloadStatus::Rejected(2).code(), 2);
        assert_eq!(DownloadStatus::Stopped(-7).code(), -7);
    }

    #[test]
    fn test_stop_zero_is_not_completed() {
        let stopped = DownloadStatus::Stopped(0);
        assert_eq!(stopped.code(), 0);
        assert!(!stopped.is_completed());
        assert_ne!(stopped, DownloadStatus::Completed);
        assert!(DownloadStatus::Completed.is_completed());
    }

    #[test]
    fn test_closure_is_callback() {
        let mut seen = 0usize;
        let mut callback = |_: u64, chunk: &[u8]| {
            seen += chunk.len();
            Recv::Continue
        };
        assert_eq!(callback.recv(3, b"abc"), Recv::Continue);
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_recv_debug() {
        assert_eq!(format!("{:?}", Recv::Stop(4)), "Stop(4)");
    }
}
