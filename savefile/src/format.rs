//! On-disk layout. Every byte below goes through the nibble RLE codec.
//!
//! ```text
//! FileHeader
//! SectionHeader, payload   (one per saved list)
//! SectionHeader, payload
//! ...
//! ```

use bytemuck_derive::{Pod, Zeroable};

use crate::{Result, SaveError};

pub const MAGIC: u32 = u32::from_le_bytes(*b"ODB1");
pub const VERSION: u16 = 1;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FileHeader {
    pub magic: u32,
    pub version: u16,
    pub reserved: u16,
}

impl FileHeader {
    pub fn current() -> Self {
        FileHeader {
            magic: MAGIC.to_le(),
            version: VERSION.to_le(),
            reserved: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if u32::from_le(self.magic) != MAGIC {
            return Err(SaveError::InvalidMagic);
        }
        let version = u16::from_le(self.version);
        if version != VERSION {
            return Err(SaveError::InvalidVersion(version));
        }
        Ok(())
    }
}

/// Describes the payload that follows: `element_count` records of
/// `element_size` bytes, hashed with blake3.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct SectionHeader {
    pub element_size: u32,
    pub element_count: u32,
    pub checksum: [u8; 32],
}

impl SectionHeader {
    pub fn describe(element_size: usize, element_count: usize, payload: &[u8]) -> Result<Self> {
        let too_large = || SaveError::SectionTooLarge {
            count: element_count as u64,
            size: element_size as u64,
        };
        Ok(SectionHeader {
            element_size: u32::try_from(element_size).map_err(|_| too_large())?.to_le(),
            element_count: u32::try_from(element_count).map_err(|_| too_large())?.to_le(),
            checksum: *blake3::hash(payload).as_bytes(),
        })
    }

    pub fn element_size(&self) -> u32 {
        u32::from_le(self.element_size)
    }

    pub fn element_count(&self) -> u32 {
        u32::from_le(self.element_count)
    }

    /// Payload length in bytes.
    pub fn payload_len(&self) -> Result<usize> {
        (self.element_size() as usize)
            .checked_mul(self.element_count() as usize)
            .ok_or(SaveError::SectionTooLarge {
                count: self.element_count() as u64,
                size: self.element_size() as u64,
            })
    }

    pub fn verify(&self, payload: &[u8]) -> Result<()> {
        if blake3::hash(payload).as_bytes() != &self.checksum {
            return Err(SaveError::ChecksumMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sizes() {
        assert_eq!(core::mem::size_of::<FileHeader>(), 8);
        assert_eq!(core::mem::size_of::<SectionHeader>(), 40);
    }

    #[test]
    fn file_header_checks() {
        assert!(FileHeader::current().validate().is_ok());

        let mut bad = FileHeader::current();
        bad.magic = 0;
        assert!(matches!(bad.validate(), Err(SaveError::InvalidMagic)));

        let mut future = FileHeader::current();
        future.version = 9u16.to_le();
        assert!(matches!(future.validate(), Err(SaveError::InvalidVersion(9))));
    }

    #[test]
    fn section_checksum() {
        let payload = [1u8, 2, 3, 4];
        let header = SectionHeader::describe(2, 2, &payload).unwrap();
        assert_eq!(header.payload_len().unwrap(), 4);
        assert!(header.verify(&payload).is_ok());
        assert!(matches!(header.verify(&[1, 2, 3, 5]), Err(SaveError::ChecksumMismatch)));
    }
}
