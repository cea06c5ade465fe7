use std::path::PathBuf;

use enough::StopReason;

use crate::header::Section;

/// Errors from reading, validating, and writing a BMP copy.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpCopyError {
    #[error("incorrect number of arguments")]
    Usage,

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input and output are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input: {section} needs {needed} bytes, got {available}")]
    TruncatedInput {
        section: Section,
        needed: usize,
        available: usize,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl BmpCopyError {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BmpCopyError::File {
            path: path.into(),
            source,
        }
    }
}

impl From<StopReason> for BmpCopyError {
    fn from(r: StopReason) -> Self {
        BmpCopyError::Cancelled(r)
    }
}
