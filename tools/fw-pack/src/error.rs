//! Error types for fw-pack

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while packing firmware or loading the packer configuration
#[derive(Debug, Error)]
pub enum PackError {
    #[error("coprocessor firmware not found: {}", path.display())]
    FirmwareNotFound { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("deflate error: {0}")]
    Deflate(#[source] io::Error),

    #[error("zlib stream too short to strip framing ({0} bytes)")]
    Framing(usize),

    #[error("round-trip mismatch: inflated {actual} bytes, expected {expected}")]
    RoundTrip { expected: usize, actual: usize },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl PackError {
    /// Map a read failure, turning `NotFound` into [`PackError::FirmwareNotFound`]
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            PackError::FirmwareNotFound { path }
        } else {
            PackError::Io { path, source }
        }
    }

    /// Map a write failure
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PackError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
