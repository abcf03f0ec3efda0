use crate::downloader::DownloadStatus;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Download a file from a FastDFS cluster", long_about = None)]
pub struct Args {
    /// Path to the client configuration (TOML)
    #[arg(short, long, default_value = "fdfs_client.toml")]
    pub config: String,

    /// Storage group holding the file
    #[arg(short, long)]
    pub group: String,

    /// Remote file name inside the group, e.g. M00/00/00/abc.txt
    #[arg(short, long)]
    pub remote: String,

    /// First byte to download
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Number of bytes to download; 0 reads to the end of the file
    #[arg(long, default_value_t = 0)]
    pub length: u64,

    /// Local file to write; the body goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Overrides the configured log level
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Process exit code for a finished download: 0 when completed, 2 when the
/// storage node rejected the request, 1 when the download was stopped.
pub fn exit_code(status: &DownloadStatus) -> u8 {
    match status {
        DownloadStatus::Completed => 0,
        DownloadStatus::Rejected(_) => 2,
        DownloadStatus::Stopped(_) => 1,
    }
}
