//! Decoding side of the nibble RLE stream.

use std::io::{ErrorKind, Read};

use tracing::trace;

use crate::config::CodecConfig;
use crate::nibble;
use crate::{ESCAPE, Result, RleError};

/// A run being replayed: `value` is returned `remaining` more times.
#[derive(Clone, Copy, Debug)]
struct Run {
    value: u8,
    remaining: u8,
}

/// Reads a nibble RLE stream from a sequential byte source.
///
/// # Examples
///
/// ```
/// use nibble_rle::NibbleReader;
///
/// // escape, count 5, value 0xA: six nibbles of 0xA
/// let encoded: &[u8] = &[0xF5, 0xA0];
/// let mut reader = NibbleReader::new(encoded);
///
/// let mut out = [0u8; 3];
/// reader.read_bytes(&mut out).unwrap();
/// assert_eq!(out, [0xAA, 0xAA, 0xAA]);
/// ```
#[derive(Debug)]
pub struct NibbleReader<R> {
    inner: R,
    buf: Box<[u8]>,
    filled: usize,
    pos: usize,
    high: bool,
    run: Option<Run>,
}

impl<R: Read> NibbleReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    pub fn with_config(inner: R, config: CodecConfig) -> Self {
        NibbleReader {
            inner,
            buf: vec![0u8; config.buffer_len()].into_boxed_slice(),
            filled: 0,
            pos: 0,
            high: true,
            run: None,
        }
    }

    /// Next nibble of the raw stream, high half of each byte first.
    pub fn read_raw_nibble(&mut self) -> Result<u8> {
        loop {
            if self.pos < self.filled {
                let byte = self.buf[self.pos];
                if self.high {
                    self.high = false;
                    return Ok(nibble::high(byte));
                }
                self.high = true;
                self.pos += 1;
                return Ok(nibble::low(byte));
            }
            self.refill()?;
        }
    }

    /// Next nibble of the decoded stream.
    ///
    /// - `v` (not the escape) is a literal
    /// - escape, 0 is a literal escape value
    /// - escape, `c`, `v` is `v` repeated `c + 1` times
    pub fn read_rle_nibble(&mut self) -> Result<u8> {
        if let Some(run) = self.run.as_mut() {
            let value = run.value;
            run.remaining -= 1;
            if run.remaining == 0 {
                self.run = None;
            }
            return Ok(value);
        }

        let n = self.read_raw_nibble()?;
        if n != ESCAPE {
            return Ok(n);
        }

        let count = self.read_raw_nibble()?;
        if count == 0 {
            return Ok(ESCAPE);
        }

        let value = self.read_raw_nibble()?;
        self.run = Some(Run {
            value,
            remaining: count,
        });
        Ok(value)
    }

    /// Fills `out` with decoded bytes.
    ///
    /// On failure returns [`RleError::Incomplete`] holding how many bytes of
    /// `out` were filled before the stream broke.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<()> {
        for (read, slot) in out.iter_mut().enumerate() {
            *slot = self.read_byte().map_err(|source| RleError::Incomplete {
                read,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        let high = self.read_rle_nibble()?;
        let low = self.read_rle_nibble()?;
        Ok(nibble::join(high, low))
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gives the source back. Buffered but unread bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn refill(&mut self) -> Result<()> {
        self.pos = 0;
        self.high = true;
        self.filled = 0;
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Err(RleError::UnexpectedEof),
                Ok(n) => {
                    trace!(bytes = n, "nibble reader refilled");
                    self.filled = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
