//! # nibble_rle
//!
//! Run-length compression working on 4-bit nibbles instead of bytes.
//!
//! Every byte is split into two nibbles, high nibble first. The nibble
//! stream is then encoded as:
//!
//! | input                          | output           |
//! |--------------------------------|------------------|
//! | nibble `v`, `v != 0xF`         | `v`              |
//! | nibble `0xF`                   | `0xF, 0x0`       |
//! | `v` repeated `k` times, 2..=16 | `0xF, k - 1, v`  |
//!
//! and packed back two nibbles per byte. A half-filled last byte is padded
//! with a zero nibble, so a reader must know how many bytes to ask for.
//!
//! ```rust
//! use nibble_rle::{compress, decompress};
//!
//! let data = [0x00, 0x00, 0x00, 0x00, 0x12, 0xFF];
//! let packed = compress(&data).unwrap();
//! assert!(packed.len() < data.len());
//!
//! let unpacked = decompress(&packed, data.len()).unwrap();
//! assert_eq!(unpacked, data);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use nibble_rle::{NibbleReader, NibbleWriter};
//!
//! let mut writer = NibbleWriter::new(Vec::new());
//! writer.write_bytes(b"aaaaaaaabbbb").unwrap();
//! writer.finish().unwrap();
//! let file = writer.into_inner();
//!
//! let mut reader = NibbleReader::new(file.as_slice());
//! let mut out = [0u8; 12];
//! reader.read_bytes(&mut out).unwrap();
//! assert_eq!(&out, b"aaaaaaaabbbb");
//! ```

pub mod config;
pub mod error;
pub mod nibble;
pub mod reader;
pub mod writer;

pub use config::{CodecConfig, DEFAULT_BUFFER_LEN};
pub use error::{Result, RleError};
pub use reader::NibbleReader;
pub use writer::{MAX_RUN, NibbleWriter, WriteStats};

/// Nibble value that introduces a run or an escaped literal.
pub const ESCAPE: u8 = 0x0F;

/// Encodes `data` into a fresh buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut writer = NibbleWriter::new(Vec::with_capacity(data.len()));
    writer.write_bytes(data)?;
    writer.finish()?;
    Ok(writer.into_inner())
}

/// Decodes `len` bytes from the start of `encoded`.
pub fn decompress(encoded: &[u8], len: usize) -> Result<Vec<u8>> {
    let mut reader = NibbleReader::new(encoded);
    let mut out = vec![0u8; len];
    reader.read_bytes(&mut out)?;
    Ok(out)
}
