use std::io::Write;

use bytemuck::{Pod, bytes_of, cast_slice};
use nibble_rle::{CodecConfig, NibbleWriter, WriteStats};
use ordered_list::{Comparator, Disposal, OrderedList};
use tracing::debug;

use crate::Result;
use crate::format::{FileHeader, SectionHeader};

/// Writes ordered lists into one compressed database stream.
///
/// The stream is only complete after [`finish`](Self::finish).
#[derive(Debug)]
pub struct DatabaseWriter<W: Write> {
    codec: NibbleWriter<W>,
    sections: usize,
}

impl<W: Write> DatabaseWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Starts a session and writes the file header.
    pub fn with_config(inner: W, config: CodecConfig) -> Result<Self> {
        let mut codec = NibbleWriter::with_config(inner, config);
        codec.write_bytes(bytes_of(&FileHeader::current()))?;
        Ok(DatabaseWriter { codec, sections: 0 })
    }

    /// Appends one section holding `records` as they are laid out in memory.
    pub fn write_records<T: Pod>(&mut self, records: &[T]) -> Result<()> {
        let payload: &[u8] = cast_slice(records);
        let header = SectionHeader::describe(core::mem::size_of::<T>(), records.len(), payload)?;

        self.codec.write_bytes(bytes_of(&header))?;
        self.codec.write_bytes(payload)?;
        self.sections += 1;

        debug!(
            section = self.sections,
            records = records.len(),
            bytes = payload.len(),
            "database section written"
        );
        Ok(())
    }

    /// Appends one section holding the list in its current order.
    pub fn write_list<T, C, D>(&mut self, list: &OrderedList<T, C, D>) -> Result<()>
    where
        T: Pod,
        C: Comparator<T>,
        D: Disposal<T>,
    {
        self.write_records(list.as_slice())
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn stats(&self) -> WriteStats {
        self.codec.stats()
    }

    /// Flushes the codec and hands the sink back.
    pub fn finish(mut self) -> Result<W> {
        self.codec.finish()?;
        debug!(sections = self.sections, "database written");
        Ok(self.codec.into_inner())
    }
}
