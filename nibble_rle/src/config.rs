use crate::{Result, RleError};

/// Size of the block buffer used by both directions.
pub const DEFAULT_BUFFER_LEN: usize = 4096;

/// Tunables shared by [`NibbleReader`](crate::NibbleReader) and
/// [`NibbleWriter`](crate::NibbleWriter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    buffer_len: usize,
}

impl CodecConfig {
    /// Blocks of `buffer_len` bytes are read from or written to the file.
    pub fn with_buffer_len(buffer_len: usize) -> Result<Self> {
        if buffer_len == 0 {
            return Err(RleError::InvalidBufferLen(buffer_len));
        }
        Ok(CodecConfig { buffer_len })
    }

    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            buffer_len: DEFAULT_BUFFER_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_buffer_rejected() {
        assert!(matches!(
            CodecConfig::with_buffer_len(0),
            Err(RleError::InvalidBufferLen(0))
        ));
        assert_eq!(CodecConfig::with_buffer_len(1).unwrap().buffer_len(), 1);
        assert_eq!(CodecConfig::default().buffer_len(), DEFAULT_BUFFER_LEN);
    }
}
