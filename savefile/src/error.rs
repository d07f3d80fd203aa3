use nibble_rle::RleError;
use thiserror::Error;

/// Database save/load errors. Any of them ends the session.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] RleError),

    #[error("invalid database magic")]
    InvalidMagic,

    #[error("unsupported database version {0}")]
    InvalidVersion(u16),

    #[error("element size mismatch: expected {expected}, found {found}")]
    ElementSizeMismatch { expected: usize, found: u32 },

    #[error("section too large: {count} elements of {size} bytes")]
    SectionTooLarge { count: u64, size: u64 },

    #[error("section checksum mismatch")]
    ChecksumMismatch,

    /// A loaded record sorts before the one saved ahead of it
    #[error("record {index} is out of order")]
    OutOfOrder { index: usize },
}

pub type Result<T> = core::result::Result<T, SaveError>;
