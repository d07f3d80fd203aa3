//! Encoding side of the nibble RLE stream.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::config::CodecConfig;
use crate::nibble;
use crate::{ESCAPE, Result, RleError};

/// Longest run one escape sequence can carry, stored as `MAX_RUN - 1`.
pub const MAX_RUN: usize = 16;

const MAX_EXTRA: u8 = (MAX_RUN - 1) as u8;

/// Encoder state between two nibbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    /// Nothing seen since the stream started or was last flushed
    Start,
    /// One nibble held back in case the next one repeats it
    Literal(u8),
    /// `value` seen `extra + 1` times in a row
    Run { value: u8, extra: u8 },
}

/// Running totals for one write session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Nibbles handed to the encoder
    pub nibbles_in: u64,
    /// Nibbles placed in the output stream
    pub nibbles_out: u64,
    /// Bytes passed to the underlying writer
    pub bytes_written: u64,
}

impl WriteStats {
    /// Encoded size over input size, `1.0` for an empty session.
    pub fn ratio(&self) -> f64 {
        if self.nibbles_in == 0 {
            1.0
        } else {
            self.nibbles_out as f64 / self.nibbles_in as f64
        }
    }
}

/// Writes a nibble RLE stream to a sequential byte sink.
///
/// [`finish`](Self::finish) must be called once the last byte has been
/// written, otherwise the held-back nibbles never reach the sink.
///
/// # Examples
///
/// ```
/// use nibble_rle::NibbleWriter;
///
/// let mut writer = NibbleWriter::new(Vec::new());
/// writer.write_bytes(&[0xAA, 0xAA, 0xAA]).unwrap();
/// writer.finish().unwrap();
///
/// // escape, count 5, value 0xA, padding
/// assert_eq!(writer.into_inner(), vec![0xF5, 0xA0]);
/// ```
#[derive(Debug)]
pub struct NibbleWriter<W> {
    inner: W,
    buf: Box<[u8]>,
    pos: usize,
    high: bool,
    pending: Pending,
    stats: WriteStats,
    padded: bool,
}

impl<W: Write> NibbleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    pub fn with_config(inner: W, config: CodecConfig) -> Self {
        debug!(buffer_len = config.buffer_len(), "nibble writer opened");
        NibbleWriter {
            inner,
            buf: vec![0u8; config.buffer_len()].into_boxed_slice(),
            pos: 0,
            high: true,
            pending: Pending::Start,
            stats: WriteStats::default(),
            padded: false,
        }
    }

    /// Packs `n` into the block buffer, writing the block out once it is full.
    pub fn write_raw_nibble(&mut self, n: u8) -> Result<()> {
        let n = nibble::check(n)?;
        self.ensure_open()?;
        if self.pos == self.buf.len() {
            self.inner.write_all(&self.buf)?;
            trace!(bytes = self.buf.len(), "nibble writer block flushed");
            self.stats.bytes_written += self.buf.len() as u64;
            self.pos = 0;
            self.high = true;
        }
        if self.high {
            self.buf[self.pos] = n << 4;
            self.high = false;
        } else {
            self.buf[self.pos] |= n;
            self.high = true;
            self.pos += 1;
        }
        self.stats.nibbles_out += 1;
        Ok(())
    }

    /// Feeds one nibble through the run-length encoder.
    ///
    /// Output lags input by at least one nibble; see [`flush_rle`](Self::flush_rle).
    pub fn write_rle_nibble(&mut self, n: u8) -> Result<()> {
        let n = nibble::check(n)?;
        self.ensure_open()?;
        self.stats.nibbles_in += 1;
        let state = self.pending;
        self.pending = match state {
            Pending::Start => Pending::Literal(n),
            Pending::Run { value, extra } if value == n && extra < MAX_EXTRA => Pending::Run {
                value,
                extra: extra + 1,
            },
            Pending::Run { value, extra } => {
                self.emit_run(value, extra)?;
                Pending::Literal(n)
            }
            Pending::Literal(value) if value == n => Pending::Run { value, extra: 1 },
            Pending::Literal(value) => {
                self.emit_literal(value)?;
                Pending::Literal(n)
            }
        };
        Ok(())
    }

    /// Emits whatever the encoder is holding back and returns it to its
    /// initial state. Does nothing when nothing is pending.
    pub fn flush_rle(&mut self) -> Result<()> {
        match core::mem::replace(&mut self.pending, Pending::Start) {
            Pending::Start => Ok(()),
            Pending::Literal(value) => self.emit_literal(value),
            Pending::Run { value, extra } => self.emit_run(value, extra),
        }
    }

    /// Writes the partly filled block to the sink and flushes it.
    ///
    /// A half-filled last byte goes out with a zero low nibble. That pad
    /// ends the stream: later nibble writes fail with [`RleError::Padded`].
    /// A flush on a byte boundary leaves the writer open.
    pub fn flush_buffer(&mut self) -> Result<()> {
        self.padded |= !self.high;
        let len = self.pos + usize::from(!self.high);
        if len > 0 {
            self.inner.write_all(&self.buf[..len])?;
            self.stats.bytes_written += len as u64;
            trace!(bytes = len, "nibble writer partial block flushed");
        }
        self.pos = 0;
        self.high = true;
        self.inner.flush()?;
        Ok(())
    }

    /// Ends the write session: [`flush_rle`](Self::flush_rle) then
    /// [`flush_buffer`](Self::flush_buffer). Calling it again writes nothing.
    pub fn finish(&mut self) -> Result<()> {
        self.flush_rle()?;
        self.flush_buffer()?;
        debug!(
            nibbles_in = self.stats.nibbles_in,
            nibbles_out = self.stats.nibbles_out,
            bytes = self.stats.bytes_written,
            ratio = self.stats.ratio(),
            "nibble writer finished"
        );
        Ok(())
    }

    /// Encodes every byte of `data`, high nibble first.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.write_rle_nibble(nibble::high(byte))?;
            self.write_rle_nibble(nibble::low(byte))?;
        }
        Ok(())
    }

    pub fn stats(&self) -> WriteStats {
        self.stats
    }

    /// True when nothing is held back in the encoder or the block buffer.
    pub fn is_drained(&self) -> bool {
        self.pending == Pending::Start && self.pos == 0 && self.high
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gives the sink back. Anything not yet flushed by
    /// [`finish`](Self::finish) is discarded.
    pub fn into_inner(self) -> W {
        if !self.is_drained() {
            warn!("nibble writer released with unflushed data; finish() was not called");
        }
        self.inner
    }

    fn ensure_open(&self) -> Result<()> {
        if self.padded {
            return Err(RleError::Padded);
        }
        Ok(())
    }

    fn emit_literal(&mut self, value: u8) -> Result<()> {
        self.write_raw_nibble(value)?;
        if value == ESCAPE {
            self.write_raw_nibble(0)?;
        }
        Ok(())
    }

    fn emit_run(&mut self, value: u8, extra: u8) -> Result<()> {
        self.write_raw_nibble(ESCAPE)?;
        self.write_raw_nibble(extra)?;
        self.write_raw_nibble(value)
    }
}
