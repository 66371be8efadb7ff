//! Reading raw file bytes and detecting the input format.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum accepted input size (500 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 500 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Supported input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Reads a file after checking its size against [`MAX_INPUT_FILE_SIZE`].
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|err| IngestError::io(path, err))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_INPUT_FILE_SIZE,
        });
    }
    std::fs::read(path).map_err(|err| IngestError::io(path, err))
}

/// Decodes bytes as UTF-8, falling back to Latin-1 when they are not valid UTF-8.
///
/// A UTF-8 byte order mark is dropped; UTF-16 input is rejected.
pub fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            tracing::debug!(path = %path.display(), "input is not UTF-8, decoding as Latin-1");
            Ok(Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect()))
        }
    }
}
