use thiserror::Error;

/// Codec errors. Any of them ends the session.
#[derive(Debug, Error)]
pub enum RleError {
    /// The underlying reader or writer failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A block read returned zero bytes while a nibble was still needed
    #[error("unexpected end of nibble stream")]
    UnexpectedEof,

    #[error("value {0:#x} does not fit in a nibble")]
    InvalidNibble(u8),

    #[error("buffer length must be at least 1, got {0}")]
    InvalidBufferLen(usize),

    /// A nibble was written after `flush_buffer` padded the last byte
    #[error("stream already ended with a padding nibble")]
    Padded,

    /// `read_bytes` stopped early; `read` bytes were decoded before the failure
    #[error("read stopped after {read} bytes: {source}")]
    Incomplete {
        read: usize,
        #[source]
        source: Box<RleError>,
    },
}

impl RleError {
    /// The failure underneath an [`RleError::Incomplete`], or `self`.
    pub fn root(&self) -> &RleError {
        match self {
            RleError::Incomplete { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = core::result::Result<T, RleError>;
