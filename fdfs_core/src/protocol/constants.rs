//! Command codes and field widths.

/// Width of the body-length field in a header.
pub const FDFS_PROTO_PKG_LEN_SIZE: usize = 8;
/// Length field, command byte, status byte.
pub const FDFS_PROTO_HEADER_LEN: usize = FDFS_PROTO_PKG_LEN_SIZE + 2;

pub const FDFS_GROUP_NAME_MAX_LEN: usize = 16;
/// IP address field width in tracker responses, excluding the C terminator.
pub const IP_ADDRESS_SIZE: usize = 15;

/// Command byte carried by every response.
pub const FDFS_PROTO_CMD_RESP: u8 = 100;
pub const STORAGE_PROTO_CMD_DOWNLOAD_FILE: u8 = 14;
pub const TRACKER_PROTO_CMD_SERVICE_QUERY_FETCH_ALL: u8 = 105;

/// Chunk size used when streaming a download body to a callback.
pub const DOWNLOAD_CHUNK_SIZE: usize = 2 * 1024;
