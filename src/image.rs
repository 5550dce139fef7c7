//! The image-encode boundary.
//!
//! Input is a user-selected file; output is an opaque string embeddable
//! directly as an image source (a base64 data URI). The read runs on a
//! worker thread so a stalled filesystem cannot wedge a submit: the
//! caller waits on a channel with a timeout guard.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use crossbeam::channel;
use thiserror::Error;

/// Default cap on encodable file size. Everything is held in memory and
/// redisplayed inline, so this stays small.
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default encode timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image {path} is {size} bytes, over the {limit}-byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("image encode timed out after {0:?}")]
    Timeout(Duration),
}

/// Encode limits, sourced from config.
#[derive(Clone, Copy, Debug)]
pub struct EncodeLimits {
    pub max_bytes: u64,
    pub timeout: Duration,
}

impl Default for EncodeLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Encode a file to a `data:<mime>;base64,<payload>` string.
///
/// Failures are recoverable: the caller aborts its pending submit and
/// keeps already-entered values. There is no cancellation; on timeout the
/// worker is detached and its eventual result dropped.
pub fn encode_file(path: &Path, limits: EncodeLimits) -> Result<String, ImageError> {
    let (tx, rx) = channel::bounded(1);
    let worker_path = path.to_path_buf();
    std::thread::spawn(move || {
        let result = read_and_encode(&worker_path, limits.max_bytes);
        // Receiver may have timed out and gone away.
        let _ = tx.send(result);
    });

    match rx.recv_timeout(limits.timeout) {
        Ok(result) => result,
        Err(channel::RecvTimeoutError::Timeout) => Err(ImageError::Timeout(limits.timeout)),
        Err(channel::RecvTimeoutError::Disconnected) => Err(ImageError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("encode worker vanished"),
        }),
    }
}

fn read_and_encode(path: &Path, max_bytes: u64) -> Result<String, ImageError> {
    let meta = std::fs::metadata(path).map_err(|e| ImageError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if meta.len() > max_bytes {
        return Err(ImageError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit: max_bytes,
        });
    }
    let bytes = std::fs::read(path).map_err(|e| ImageError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(format!(
        "data:{};base64,{}",
        sniff_mime(&bytes),
        STANDARD.encode(&bytes)
    ))
}

/// Media type from magic bytes. Unknown formats still round-trip, just
/// under a generic type.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00";

    #[test]
    fn sniffs_common_formats() {
        assert_eq!(sniff_mime(PNG_HEADER), "image/png");
        assert_eq!(sniff_mime(b"\xff\xd8\xff\xe0rest"), "image/jpeg");
        assert_eq!(sniff_mime(b"GIF89a..."), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(sniff_mime(b"plain text"), "application/octet-stream");
    }

    #[test]
    fn encodes_to_data_uri() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ref.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let uri = encode_file(&path, EncodeLimits::default()).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let payload = uri.rsplit(',').next().unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = encode_file(&dir.path().join("nope.png"), EncodeLimits::default());
        assert!(matches!(err, Err(ImageError::Io { .. })));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let limits = EncodeLimits {
            max_bytes: 16,
            timeout: DEFAULT_TIMEOUT,
        };
        assert!(matches!(
            encode_file(&path, limits),
            Err(ImageError::TooLarge { size: 64, .. })
        ));
    }
}
