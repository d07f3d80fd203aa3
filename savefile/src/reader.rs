use std::io::Read;

use bytemuck::{Pod, Zeroable, bytes_of_mut, cast_slice, cast_slice_mut};
use nibble_rle::{CodecConfig, NibbleReader};
use ordered_list::{Comparator, Disposal, DropDisposal, NaturalOrder, OrderedList};
use tracing::debug;

use crate::format::{FileHeader, SectionHeader};
use crate::{Result, SaveError};

/// Payload bytes decoded per step while reading a section.
const READ_CHUNK: usize = 64 * 1024;

/// Reads the sections of a database stream back, in the order they were written.
#[derive(Debug)]
pub struct DatabaseReader<R: Read> {
    codec: NibbleReader<R>,
    sections: usize,
}

impl<R: Read> DatabaseReader<R> {
    pub fn new(inner: R) -> Result<Self> {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Starts a session and validates the file header.
    pub fn with_config(inner: R, config: CodecConfig) -> Result<Self> {
        let mut codec = NibbleReader::with_config(inner, config);
        let mut header = FileHeader::zeroed();
        codec.read_bytes(bytes_of_mut(&mut header))?;
        header.validate()?;
        Ok(DatabaseReader { codec, sections: 0 })
    }

    /// Reads the next section as raw records and checks its hash.
    pub fn read_records<T: Pod>(&mut self) -> Result<Vec<T>> {
        let mut header = SectionHeader::zeroed();
        self.codec.read_bytes(bytes_of_mut(&mut header))?;

        let expected = core::mem::size_of::<T>();
        if header.element_size() as usize != expected {
            return Err(SaveError::ElementSizeMismatch {
                expected,
                found: header.element_size(),
            });
        }
        header.payload_len()?;

        // grow with the data actually decoded; the count itself is not hashed
        let count = header.element_count() as usize;
        let step = (READ_CHUNK / expected.max(1)).max(1);
        let mut records: Vec<T> = Vec::with_capacity(count.min(step));
        while records.len() < count {
            let start = records.len();
            records.resize(start + step.min(count - start), T::zeroed());
            self.codec.read_bytes(cast_slice_mut(&mut records[start..]))?;
        }
        header.verify(cast_slice(&records))?;

        self.sections += 1;
        debug!(
            section = self.sections,
            records = records.len(),
            "database section read"
        );
        Ok(records)
    }

    /// Reads the next section into a list, keeping the saved order exactly.
    pub fn read_list<T, C, D>(&mut self, comparator: C, disposal: D) -> Result<OrderedList<T, C, D>>
    where
        T: Pod,
        C: Comparator<T>,
        D: Disposal<T>,
    {
        let records = self.read_records::<T>()?;
        let mut list = OrderedList::with_policies(comparator, disposal);
        for (index, record) in records.into_iter().enumerate() {
            list.push_sorted(record)
                .map_err(|_| SaveError::OutOfOrder { index })?;
        }
        Ok(list)
    }

    pub fn read_list_natural<T: Pod + Ord>(&mut self) -> Result<OrderedList<T>> {
        self.read_list(NaturalOrder, DropDisposal)
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn into_inner(self) -> R {
        self.codec.into_inner()
    }
}
