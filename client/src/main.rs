use clap::Parser;
use fdfs_client::cli::{Args, exit_code};
use fdfs_client::logging::setup_logging;
use fdfs_client::{DownloadClient, DownloadStatus, Recv};
use fdfs_core::{ClientConfig, Result};
use log::error;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracker::{FdfsTrackerClient, TrackerGroup};

fn run(args: &Args) -> Result<DownloadStatus> {
    let config = ClientConfig::load(&args.config)?;
    setup_logging(args.log_level.as_deref().unwrap_or(&config.log_level))?;

    let group = Arc::new(TrackerGroup::new(&config)?);
    let tracker = FdfsTrackerClient::new(group, config.charset);
    let client = DownloadClient::new(config, tracker)?;

    match &args.output {
        Some(path) => {
            let status = client.download_range_to_file(&args.group, &args.remote, path, args.offset, args.length)?;
            Ok(if status == 0 {
                DownloadStatus::Completed
            } else {
                DownloadStatus::Rejected(status)
            })
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            let mut write_error = None;
            let status = client.download_range_with_callback(
                &args.group,
                &args.remote,
                args.offset,
                args.length,
                |_: u64, chunk: &[u8]| match stdout.write_all(chunk) {
                    Ok(()) => Recv::Continue,
                    Err(e) => {
                        write_error = Some(e);
                        Recv::Stop(-1)
                    }
                },
            )?;
            if let Some(e) = write_error {
                return Err(e.into());
            }
            stdout.flush()?;
            Ok(status)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(status) => {
            match status {
                DownloadStatus::Completed => {}
                DownloadStatus::Rejected(code) => {
                    error!("{}/{} not downloaded, status {}", args.group, args.remote, code);
                    eprintln!("download rejected with status {}", code);
                }
                DownloadStatus::Stopped(code) => {
                    error!("{}/{} download stopped with code {}", args.group, args.remote, code);
                    eprintln!("download stopped with code {}", code);
                }
            }
            ExitCode::from(exit_code(&status))
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
