use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Writes a downloaded body to `path`, replacing whatever was there.
///
/// Missing parent directories are created. A path that names an existing
/// directory is refused.
///
/// # Arguments
///
/// * `data` - The downloaded bytes.
/// * `path` - Destination file.
///
/// # Examples
///
/// ```
/// use fdfs_client::storage::write_local_file;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("nested").join("abc.txt");
/// write_local_file(b"hello", &path).unwrap();
/// assert_eq!(std::fs::read(&path).unwrap(), b"hello");
/// ```
pub fn write_local_file(data: &[u8], path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is a directory", path.display()),
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
