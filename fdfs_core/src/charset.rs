//! Text encoding used for names carried on the wire.

use crate::error::{FdfsError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Character encoding applied to group names and remote file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per code point.
    Latin1,
}

impl Charset {
    /// Encodes `text` into bytes.
    ///
    /// Latin-1 cannot represent code points above `U+00FF`; those fail with
    /// `InvalidArgument`.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        FdfsError::InvalidArgument(format!(
                            "character {:?} in {:?} is not representable in ISO-8859-1",
                            c, text
                        ))
                    })
                })
                .collect(),
        }
    }

    /// Decodes a fixed-width field, dropping trailing zero padding.
    pub fn decode_field(&self, bytes: &[u8]) -> String {
        let end = bytes
            .iter()
            .rposition(|&b| b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        let bytes = &bytes[..end];
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).to_string(),
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = FdfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Latin1),
            other => Err(FdfsError::Config(format!("unsupported charset '{}'", other))),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = FdfsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Utf8 => write!(f, "UTF-8"),
            Charset::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}
